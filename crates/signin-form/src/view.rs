//! Render-ready snapshot of the form.
//!
//! `FormView` is a pure function of `FormState`. Front ends draw it as-is;
//! nothing here feeds back into the state machine.

use serde::Serialize;
use signin_core::validation::Field;

use crate::state::{FormPhase, FormState};

/// Mask character for hidden password input.
const MASK: char = '\u{2022}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Email,
    Password,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub input_kind: InputKind,
    pub display_value: String,
    pub aria_invalid: bool,
    /// Id of the inline error element; only present while an error is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub phase: FormPhase,
    pub email: FieldView,
    pub password: FieldView,
    pub password_toggle_label: &'static str,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
}

impl FormView {
    pub fn new(state: &FormState) -> Self {
        Self {
            phase: state.phase(),
            email: field_view(state, Field::Email),
            password: field_view(state, Field::Password),
            password_toggle_label: if state.show_password() {
                "Hide password"
            } else {
                "Show password"
            },
            submit_enabled: state.can_submit(),
            submit_label: if state.is_submitting() {
                "Signing In..."
            } else {
                "Login"
            },
            banner: state.banner().map(|banner| banner.text()),
        }
    }

    pub fn field(&self, field: Field) -> &FieldView {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }
}

fn field_view(state: &FormState, field: Field) -> FieldView {
    let value = state.value(field);
    let (input_kind, display_value) = match field {
        Field::Email => (InputKind::Email, value.to_string()),
        Field::Password if state.show_password() => (InputKind::Text, value.to_string()),
        Field::Password => (
            InputKind::Password,
            std::iter::repeat_n(MASK, value.chars().count()).collect(),
        ),
    };
    let error = state.error(field);

    FieldView {
        field,
        input_kind,
        display_value,
        aria_invalid: error.is_some(),
        error_id: error.map(|_| field.error_id()),
        error_code: error.map(|err| err.code()),
        error_message: error.map(|err| err.message(field)),
    }
}

#[cfg(test)]
mod tests {
    use signin_core::auth::SubmitOutcome;

    use super::*;
    use crate::update::{on_field_change, on_settled, on_submit_attempt, on_toggle_password_visibility};

    fn filled(email: &str, password: &str) -> FormState {
        let mut state = FormState::new();
        on_field_change(&mut state, Field::Email, email.to_string());
        on_field_change(&mut state, Field::Password, password.to_string());
        state
    }

    #[test]
    fn test_errors_are_associated_with_inputs() {
        let view = FormView::new(&filled("bad", "123"));

        assert!(view.email.aria_invalid);
        assert_eq!(view.email.error_id, Some("email-error"));
        assert_eq!(view.email.error_code, Some("invalid format"));
        assert_eq!(view.email.error_message.as_deref(), Some("Enter a valid email"));
        assert_eq!(view.password.error_id, Some("password-error"));
        assert_eq!(view.password.error_code, Some("too short"));
        assert!(!view.submit_enabled);
    }

    #[test]
    fn test_valid_fields_have_no_error_association() {
        let view = FormView::new(&filled("user@example.com", "secret1"));

        assert!(!view.email.aria_invalid);
        assert_eq!(view.email.error_id, None);
        assert_eq!(view.password.error_message, None);
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, "Login");
    }

    #[test]
    fn test_password_masked_until_toggled() {
        let mut state = filled("user@example.com", "secret1");

        let hidden = FormView::new(&state);
        assert_eq!(hidden.password.input_kind, InputKind::Password);
        assert_eq!(hidden.password.display_value, "\u{2022}".repeat(7));
        assert_eq!(hidden.password_toggle_label, "Show password");

        on_toggle_password_visibility(&mut state);
        let shown = FormView::new(&state);
        assert_eq!(shown.password.input_kind, InputKind::Text);
        assert_eq!(shown.password.display_value, "secret1");
        assert_eq!(shown.password_toggle_label, "Hide password");
        assert_eq!(shown.password.error_code, hidden.password.error_code);
    }

    #[test]
    fn test_submitting_label_and_banner() {
        let mut state = filled("user@example.com", "secret1");
        let Some(crate::effects::FormEffect::SubmitCredentials { task, .. }) =
            on_submit_attempt(&mut state)
        else {
            panic!("submit should start");
        };

        let view = FormView::new(&state);
        assert_eq!(view.submit_label, "Signing In...");
        assert!(!view.submit_enabled);
        assert_eq!(view.phase, FormPhase::Submitting);

        on_settled(&mut state, task, SubmitOutcome::InvalidCredentials);
        let view = FormView::new(&state);
        assert_eq!(
            view.banner,
            Some("Invalid email or password. Please try again.")
        );
        assert_eq!(view.submit_label, "Login");
        assert_eq!(view.password.display_value, "");
    }

    #[test]
    fn test_view_serializes_for_front_ends() {
        let json = serde_json::to_value(FormView::new(&filled("bad", "secret1"))).unwrap();

        assert_eq!(json["phase"], "editing");
        assert_eq!(json["email"]["field"], "email");
        assert_eq!(json["email"]["error_code"], "invalid format");
        assert!(json["password"].get("error_code").is_none());
        assert!(json.get("banner").is_none());
    }
}
