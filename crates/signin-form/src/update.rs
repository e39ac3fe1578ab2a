//! Form reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects. The `on_*` functions are the
//! individual transitions and can be driven directly.

use signin_core::auth::{Credentials, SubmitOutcome};
use signin_core::validation::Field;

use crate::common::TaskId;
use crate::effects::FormEffect;
use crate::events::FormEvent;
use crate::state::{Banner, FormState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut FormState, event: FormEvent) -> Vec<FormEffect> {
    match event {
        FormEvent::FieldChanged { field, value } => {
            on_field_change(state, field, value);
            vec![]
        }
        FormEvent::TogglePasswordVisibility => {
            on_toggle_password_visibility(state);
            vec![]
        }
        FormEvent::SubmitRequested => on_submit_attempt(state).into_iter().collect(),
        FormEvent::SubmissionSettled(completed) => {
            on_settled(state, completed.id, completed.result)
                .into_iter()
                .collect()
        }
    }
}

/// Replaces a field value and revalidates the whole form.
///
/// The form is dirty while its values differ from the baseline. Ignored
/// while a submission is outstanding. Returns whether the change was applied.
pub fn on_field_change(state: &mut FormState, field: Field, value: String) -> bool {
    if state.is_submitting() {
        tracing::debug!(%field, "ignoring field change while submitting");
        return false;
    }
    state.values.set(field, value);
    state.is_dirty = state.values != state.baseline;
    state.revalidate();
    true
}

/// Flips password visibility. Cosmetic only: values and validation are untouched.
pub fn on_toggle_password_visibility(state: &mut FormState) {
    state.show_password = !state.show_password;
}

/// Starts a submission if the submit control is enabled.
///
/// A guarded attempt is a no-op: no effect and no state change.
pub fn on_submit_attempt(state: &mut FormState) -> Option<FormEffect> {
    if !state.can_submit() {
        tracing::debug!(
            valid = state.is_valid(),
            dirty = state.is_dirty(),
            submitting = state.is_submitting(),
            "submit attempt blocked"
        );
        return None;
    }

    state.banner = None;
    let task = state.task_seq.next_id();
    state.submission.start(task);
    tracing::info!(task = task.0, email = %state.values.email, "submitting credentials");

    Some(FormEffect::SubmitCredentials {
        task,
        credentials: Credentials::from(&state.values),
    })
}

/// Applies the outcome of submission `task`.
///
/// Outcomes for anything but the active submission are dropped.
pub fn on_settled(state: &mut FormState, task: TaskId, outcome: SubmitOutcome) -> Option<FormEffect> {
    if !state.submission.finish_if_active(task) {
        tracing::debug!(task = task.0, "ignoring stale submission outcome");
        return None;
    }

    let effect = match &outcome {
        SubmitOutcome::Success => {
            tracing::info!(task = task.0, "credentials accepted");
            Some(FormEffect::SessionEstablished {
                email: state.values.email.clone(),
            })
        }
        SubmitOutcome::InvalidCredentials => {
            tracing::info!(task = task.0, "credentials rejected");
            reject(state, Banner::InvalidCredentials);
            None
        }
        SubmitOutcome::ServiceError { detail } => {
            tracing::warn!(task = task.0, %detail, "auth service failed");
            reject(state, Banner::ServiceFailure);
            None
        }
    };
    state.last_outcome = Some(outcome);
    effect
}

/// Shows `banner` and clears the password against a new clean baseline.
///
/// The emptied password fails validation and the form is clean again, so
/// the submit control stays disabled until the user edits a field.
fn reject(state: &mut FormState, banner: Banner) {
    state.banner = Some(banner);
    state.values.password.clear();
    state.revalidate();
    state.reset_baseline();
}
