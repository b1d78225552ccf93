use serde::{Deserialize, Serialize};

use crate::field::FieldId;
use crate::validity::ErrorType;

/// A single failed field from one submit attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: FieldId,
    pub error_type: ErrorType,
    pub message: String,
    pub value: String,
    /// ISO-8601, taken from the browser clock when the attempt was made.
    pub timestamp: String,
}

/// Append-only record of every validation failure in the page session.
///
/// Entries are never removed; the whole log travels with the successful
/// submission.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    entries: Vec<ValidationError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.entries.extend(errors);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array sent along with the form in the hidden errors field.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}
