//! Form runtime - owns state, executes effects, collects async results.
//!
//! This is the effect boundary: the reducer in [`crate::update`] stays pure
//! and returns effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Submissions run on spawned tasks, but their outcomes are never applied
//! there. Each task sends a `FormEvent` to `inbox_tx`; the runtime drains
//! `inbox_rx` and feeds the events through the reducer on the task that
//! owns the state. Field edits and settlements therefore never race.
//!
//! There is no cancellation: once a submission is spawned the runtime waits
//! for it to settle.

mod handlers;

use std::future::Future;
use std::sync::Arc;

use signin_core::auth::AuthSubmitter;
use signin_core::validation::Field;
use tokio::sync::mpsc;

use crate::effects::FormEffect;
use crate::events::FormEvent;
use crate::state::FormState;
use crate::update;

pub type FormEventSender = mpsc::UnboundedSender<FormEvent>;
pub type FormEventReceiver = mpsc::UnboundedReceiver<FormEvent>;

/// Drives one form instance against an auth backend.
///
/// Must be used from within a tokio runtime: submissions are spawned with
/// `tokio::spawn`.
pub struct FormRuntime<S> {
    /// Form state, mutated only through the reducer.
    pub state: FormState,
    submitter: Arc<S>,
    /// Inbox sender - spawned submissions send their outcome here.
    inbox_tx: FormEventSender,
    /// Inbox receiver - drained on the state-owning task.
    inbox_rx: FormEventReceiver,
    /// Email handed over to session management after a successful sign-in.
    session: Option<String>,
}

impl<S> FormRuntime<S>
where
    S: AuthSubmitter + 'static,
{
    pub fn new(submitter: S) -> Self {
        Self::with_state(submitter, FormState::new())
    }

    pub fn with_state(submitter: S, state: FormState) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state,
            submitter: Arc::new(submitter),
            inbox_tx,
            inbox_rx,
            session: None,
        }
    }

    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(FormEvent::FieldChanged {
            field,
            value: value.into(),
        });
    }

    pub fn on_toggle_password_visibility(&mut self) {
        self.dispatch(FormEvent::TogglePasswordVisibility);
    }

    /// Attempts a submission. Returns whether one was started.
    pub fn on_submit_attempt(&mut self) -> bool {
        let was_submitting = self.state.is_submitting();
        self.dispatch(FormEvent::SubmitRequested);
        !was_submitting && self.state.is_submitting()
    }

    /// Runs an event through the reducer and executes the resulting effects.
    pub fn dispatch(&mut self, event: FormEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Applies every result already waiting in the inbox without blocking.
    ///
    /// Returns the number of events processed.
    pub fn drain_inbox(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Waits until the outstanding submission (if any) has settled.
    pub async fn wait_until_settled(&mut self) {
        while self.state.is_submitting() {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
    }

    /// Submits and waits for the outcome. Returns false if the submit
    /// control was disabled.
    pub async fn submit_and_wait(&mut self) -> bool {
        let started = self.on_submit_attempt();
        if started {
            self.wait_until_settled().await;
        }
        started
    }

    /// Email of the signed-in user, once credentials were accepted.
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Spawns an async effect and sends its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = FormEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: FormEffect) {
        match effect {
            FormEffect::SubmitCredentials { task, credentials } => {
                let submitter = Arc::clone(&self.submitter);
                self.spawn_effect(move || handlers::submit_credentials(submitter, task, credentials));
            }
            FormEffect::SessionEstablished { email } => {
                tracing::info!(%email, "session established");
                self.session = Some(email);
            }
        }
    }
}
