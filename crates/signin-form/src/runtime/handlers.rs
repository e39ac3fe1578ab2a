//! Effect handlers.
//!
//! Handlers are pure async functions that return a `FormEvent`. The runtime
//! spawns them and routes the result through its inbox; handlers never
//! touch `FormState`.

use std::sync::Arc;

use signin_core::auth::{AuthSubmitter, Credentials, SubmitOutcome};

use crate::common::{TaskCompleted, TaskId};
use crate::events::FormEvent;

/// Runs one submission against the backend.
///
/// The backend call runs on its own task. If it panics the submission still
/// settles, as a service error, so the form never stays stuck submitting.
pub async fn submit_credentials<S>(submitter: Arc<S>, task: TaskId, credentials: Credentials) -> FormEvent
where
    S: AuthSubmitter + 'static,
{
    let call = tokio::spawn(async move { submitter.submit(credentials).await });
    let result = match call.await {
        Ok(outcome) => outcome,
        // JoinError: panic or cancellation
        Err(err) => {
            tracing::error!(task = task.0, "submission task failed: {err}");
            SubmitOutcome::service_error(format!("Submission task failed: {err}"))
        }
    };
    FormEvent::SubmissionSettled(TaskCompleted { id: task, result })
}
