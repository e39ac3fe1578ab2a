//! Form events.
//!
//! Everything that can change `FormState` arrives as a `FormEvent`: user
//! input from the front end and submission results from the runtime inbox.

use signin_core::auth::SubmitOutcome;
use signin_core::validation::Field;

use crate::common::TaskCompleted;

#[derive(Debug)]
pub enum FormEvent {
    /// A field's value was replaced by user input.
    FieldChanged { field: Field, value: String },

    /// The password visibility toggle was pressed.
    TogglePasswordVisibility,

    /// The user triggered the submit control.
    SubmitRequested,

    /// A submission task produced its final outcome.
    SubmissionSettled(TaskCompleted<SubmitOutcome>),
}
