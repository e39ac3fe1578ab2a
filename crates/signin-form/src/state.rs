//! Form state.
//!
//! `FormState` owns the field values and everything derived from them.
//! It is only mutated by the reducer in [`crate::update`]; readers go through
//! the accessors so derived values can never be observed out of sync.

use serde::Serialize;
use signin_core::auth::SubmitOutcome;
use signin_core::validation::{Field, FieldError, FieldValues, ValidationResult, ValidationSchema};

use crate::common::{TaskId, TaskSeq, TaskState};

/// Banner text after the backend rejected the credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";

/// Banner text after the backend could not be reached or failed.
pub const SERVICE_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Global message shown for submission-level outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Banner {
    InvalidCredentials,
    ServiceFailure,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            Banner::ServiceFailure => SERVICE_FAILURE_MESSAGE,
        }
    }
}

/// Lifecycle phase, derived from the flags.
///
/// - `Idle`: clean form, nothing submitted yet
/// - `Editing`: at least one field changed since the last baseline
/// - `Submitting`: a submission is outstanding
/// - `Settled`: clean form after a submission settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Idle,
    Editing,
    Submitting,
    Settled,
}

#[derive(Debug)]
pub struct FormState {
    pub(crate) schema: ValidationSchema,
    pub(crate) values: FieldValues,
    /// Values the form was last reset to; dirtiness is relative to this.
    pub(crate) baseline: FieldValues,
    pub(crate) validation: ValidationResult,
    pub(crate) is_dirty: bool,
    pub(crate) show_password: bool,
    pub(crate) banner: Option<Banner>,
    pub(crate) submission: TaskState,
    pub(crate) task_seq: TaskSeq,
    pub(crate) last_outcome: Option<SubmitOutcome>,
}

impl FormState {
    /// Creates an empty, clean form with the sign-in rules.
    pub fn new() -> Self {
        Self::with_schema(ValidationSchema::SIGN_IN)
    }

    pub fn with_schema(schema: ValidationSchema) -> Self {
        let values = FieldValues::default();
        let validation = schema.validate(&values);
        Self {
            schema,
            baseline: values.clone(),
            values,
            validation,
            is_dirty: false,
            show_password: false,
            banner: None,
            submission: TaskState::default(),
            task_seq: TaskSeq::default(),
            last_outcome: None,
        }
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn baseline(&self) -> &FieldValues {
        &self.baseline
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.validation.error(field)
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// True strictly while a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submission.is_running()
    }

    pub fn active_submission(&self) -> Option<TaskId> {
        self.submission.active
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn banner(&self) -> Option<Banner> {
        self.banner
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.is_dirty && !self.is_submitting()
    }

    pub fn phase(&self) -> FormPhase {
        if self.is_submitting() {
            FormPhase::Submitting
        } else if self.is_dirty {
            FormPhase::Editing
        } else if self.last_outcome.is_some() {
            FormPhase::Settled
        } else {
            FormPhase::Idle
        }
    }

    /// Recomputes the full validation result from the current values.
    pub(crate) fn revalidate(&mut self) {
        self.validation = self.schema.validate(&self.values);
    }

    /// Makes the current values the new clean baseline.
    pub(crate) fn reset_baseline(&mut self) {
        self.baseline = self.values.clone();
        self.is_dirty = false;
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_idle_and_clean() {
        let state = FormState::new();

        assert_eq!(state.phase(), FormPhase::Idle);
        assert!(!state.is_dirty());
        assert!(!state.is_submitting());
        assert!(!state.can_submit());
        assert_eq!(state.banner(), None);
        assert_eq!(state.values(), &FieldValues::default());
    }

    #[test]
    fn test_new_form_carries_full_validation() {
        let state = FormState::new();

        assert_eq!(state.error(Field::Email), Some(FieldError::Required));
        assert_eq!(
            state.error(Field::Password),
            Some(FieldError::TooShort { min: 6 })
        );
    }

    #[test]
    fn test_banner_texts_are_distinct() {
        assert_eq!(
            Banner::InvalidCredentials.text(),
            "Invalid email or password. Please try again."
        );
        assert_eq!(
            Banner::ServiceFailure.text(),
            "Something went wrong. Please try again later."
        );
    }
}
