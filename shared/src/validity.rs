//! Native-style constraint validation.
//!
//! Mirrors the browser's `ValidityState` for the subset of constraints the
//! contact form uses, so both the blur-time messages and the submission gate
//! work from the same flags.

use serde::{Deserialize, Serialize};

use crate::field::{FieldId, FieldRules, InputKind, is_valid_email, text_length};

/// Closed taxonomy of submission failures.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    Required,
    TooShort,
    TooLong,
    PatternMismatch,
    TypeMismatch,
    Unknown,
}

impl ErrorType {
    /// Coarse message stored in the error log, independent of blur messages.
    pub fn submit_message(self, rules: &FieldRules) -> String {
        match self {
            ErrorType::Required => "Field is required".to_string(),
            ErrorType::TooShort => {
                format!("Minimum length is {}", rules.min_length.unwrap_or_default())
            }
            ErrorType::TooLong => {
                format!("Maximum length is {}", rules.max_length.unwrap_or_default())
            }
            ErrorType::PatternMismatch => "Invalid format".to_string(),
            ErrorType::TypeMismatch => "Invalid type (e.g., not a valid email)".to_string(),
            ErrorType::Unknown => "Unknown validation error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub too_short: bool,
    pub too_long: bool,
    pub pattern_mismatch: bool,
    pub type_mismatch: bool,
    pub custom_error: bool,
}

impl ValidityState {
    pub fn evaluate(rules: &FieldRules, value: &str) -> Self {
        let length = text_length(value);
        let empty = value.is_empty();
        Self {
            value_missing: rules.required && empty,
            too_short: !empty && rules.min_length.is_some_and(|min| length < min),
            too_long: rules.max_length.is_some_and(|max| length > max),
            pattern_mismatch: !empty && rules.charset.is_some_and(|set| !set.matches(value)),
            type_mismatch: !empty && rules.kind == InputKind::Email && !is_valid_email(value),
            custom_error: false,
        }
    }

    /// Same as [`evaluate`](Self::evaluate) with a pending custom validity message.
    pub fn with_custom_error(mut self, custom_error: bool) -> Self {
        self.custom_error = custom_error;
        self
    }

    pub fn is_valid(&self) -> bool {
        *self == Self::default()
    }

    /// First failing constraint in submission precedence order.
    pub fn error_type(&self) -> Option<ErrorType> {
        if self.value_missing {
            Some(ErrorType::Required)
        } else if self.too_short {
            Some(ErrorType::TooShort)
        } else if self.too_long {
            Some(ErrorType::TooLong)
        } else if self.pattern_mismatch {
            Some(ErrorType::PatternMismatch)
        } else if self.type_mismatch {
            Some(ErrorType::TypeMismatch)
        } else if self.custom_error {
            Some(ErrorType::Unknown)
        } else {
            None
        }
    }
}

// ===== BLUR MESSAGES =====

/// Whether the field gets a custom validity message when it loses focus.
pub fn has_blur_check(field: FieldId) -> bool {
    !matches!(field, FieldId::Phone)
}

/// Custom validity message to show after focus-loss, `None` to clear it.
pub fn blur_message(field: FieldId, rules: &FieldRules, validity: &ValidityState) -> Option<String> {
    let min = rules.min_length.unwrap_or_default();
    let max = rules.max_length.unwrap_or_default();
    match field {
        FieldId::Name => {
            if validity.value_missing {
                Some("Please enter your name".to_string())
            } else if validity.too_short {
                Some(format!("Name must be at least {min} characters long"))
            } else if validity.pattern_mismatch {
                Some("Name can only contain letters, spaces, hyphens, and apostrophes".to_string())
            } else {
                None
            }
        }
        FieldId::Email => {
            if validity.value_missing {
                Some("Please enter your email address".to_string())
            } else if validity.type_mismatch {
                Some("Please enter a valid email address (e.g., name@example.com)".to_string())
            } else {
                None
            }
        }
        FieldId::Subject => {
            if validity.value_missing {
                Some("Please enter a subject".to_string())
            } else if validity.too_short {
                Some(format!("Subject must be at least {min} characters long"))
            } else if validity.pattern_mismatch {
                Some("Subject contains invalid characters".to_string())
            } else {
                None
            }
        }
        FieldId::Comments => {
            if validity.value_missing {
                Some("Please enter your comments".to_string())
            } else if validity.too_short {
                Some(format!("Comments must be at least {min} characters long"))
            } else if validity.too_long {
                Some(format!("Comments must not exceed {max} characters"))
            } else {
                None
            }
        }
        FieldId::Phone => None,
    }
}
