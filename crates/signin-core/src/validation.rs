//! Field validation for the sign-in form.
//!
//! Validation is a pure function of the current field values: no state is
//! consulted and every call returns a result covering every field. Callers
//! re-run it on each change instead of patching a previous result, so the
//! email and password verdicts can never drift apart.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Address grammar: local part, one `@`, dotted domain with an alphabetic TLD.
///
/// The leading-dot and double-dot rules are checked separately because the
/// regex engine has no lookaround.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A field of the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Password,
}

impl Field {
    /// Returns all fields in display order.
    pub fn all() -> &'static [Field] {
        &[Field::Email, Field::Password]
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    /// Element id of the inline error text, used to associate it with the input.
    pub fn error_id(self) -> &'static str {
        match self {
            Field::Email => "email-error",
            Field::Password => "password-error",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw values of every form field.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub email: String,
    pub password: String,
}

impl FieldValues {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }
}

// Passwords never reach logs.
impl fmt::Debug for FieldValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValues")
            .field("email", &self.email)
            .field("password", &format_args!("<{} chars>", self.password.chars().count()))
            .finish()
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The field is empty.
    Required,
    /// The value does not match the expected format.
    InvalidFormat,
    /// The value is shorter than `min` characters.
    TooShort { min: usize },
}

impl FieldError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidFormat => "invalid format",
            FieldError::TooShort { .. } => "too short",
        }
    }

    /// Inline text shown next to `field`.
    pub fn message(&self, field: Field) -> String {
        match (self, field) {
            (FieldError::Required, Field::Email) => "Email is required".to_string(),
            (FieldError::Required, Field::Password) => "Password is required".to_string(),
            (FieldError::InvalidFormat, Field::Email) => "Enter a valid email".to_string(),
            (FieldError::InvalidFormat, Field::Password) => "Enter a valid password".to_string(),
            (FieldError::TooShort { min }, Field::Email) => {
                format!("Email must be at least {min} characters")
            }
            (FieldError::TooShort { min }, Field::Password) => {
                format!("Password must be at least {min} characters")
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verdict for every field. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub email: Option<FieldError>,
    pub password: Option<FieldError>,
}

impl ValidationResult {
    pub fn error(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Email => self.email,
            Field::Password => self.password,
        }
    }

    /// True when no field has an error.
    pub fn is_valid(&self) -> bool {
        Field::all().iter().all(|field| self.error(*field).is_none())
    }

    /// Iterates over the failing fields in display order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        Field::all()
            .iter()
            .filter_map(|field| self.error(*field).map(|err| (*field, err)))
    }
}

/// Static rule set applied to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSchema {
    pub min_password_len: usize,
}

impl ValidationSchema {
    /// Rules of the sign-in form.
    pub const SIGN_IN: ValidationSchema = ValidationSchema {
        min_password_len: 6,
    };

    pub fn validate(&self, values: &FieldValues) -> ValidationResult {
        ValidationResult {
            email: validate_email(&values.email),
            password: self.validate_password(&values.password),
        }
    }

    fn validate_password(&self, password: &str) -> Option<FieldError> {
        // Length in characters, not bytes.
        (password.chars().count() < self.min_password_len).then_some(FieldError::TooShort {
            min: self.min_password_len,
        })
    }
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self::SIGN_IN
    }
}

/// Validates `values` against the sign-in rules.
pub fn validate(values: &FieldValues) -> ValidationResult {
    ValidationSchema::SIGN_IN.validate(values)
}

fn validate_email(email: &str) -> Option<FieldError> {
    if email.is_empty() {
        return Some(FieldError::Required);
    }
    (!is_valid_email(email)).then_some(FieldError::InvalidFormat)
}

/// Checks `email` against the address grammar.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}
