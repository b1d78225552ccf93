//! Submission gate and the form-level banners.

use crate::config::FieldsConfig;
use crate::error_log::{ErrorLog, ValidationError};
use crate::field::FieldId;
use crate::validity::ValidityState;

pub const SUCCESS_MESSAGE: &str = "✓ Form is valid! Submitting...";
pub const COMPLETE_MESSAGE: &str =
    "✓ All required fields are complete! You can now submit the form.";

/// Current content of one field on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub field: FieldId,
    pub value: String,
    /// A custom validity message is currently set on the element.
    pub custom_error: bool,
}

impl FieldSnapshot {
    pub fn new(field: FieldId, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            custom_error: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Submission must be cancelled; holds this attempt's failures only.
    Blocked { failures: Vec<ValidationError> },
    /// Submission proceeds; `payload` is the whole session log as JSON.
    Accepted { payload: String },
}

impl SubmitOutcome {
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Blocked { failures } => {
                format!("⚠️ Please fix {} error(s) before submitting", failures.len())
            }
            SubmitOutcome::Accepted { .. } => SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Check every present field and either block the attempt (recording its
/// failures in `log`) or serialize the complete log for transport.
///
/// Fields missing from `snapshots` (an optional field absent from the page)
/// are not checked.
pub fn evaluate_submission(
    fields: &FieldsConfig,
    log: &mut ErrorLog,
    snapshots: &[FieldSnapshot],
    timestamp: &str,
) -> Result<SubmitOutcome, serde_json::Error> {
    let failures: Vec<ValidationError> = snapshots
        .iter()
        .filter_map(|snapshot| {
            let rules = fields.get(snapshot.field);
            let error_type = ValidityState::evaluate(rules, &snapshot.value)
                .with_custom_error(snapshot.custom_error)
                .error_type()?;
            Some(ValidationError {
                field: snapshot.field,
                error_type,
                message: error_type.submit_message(rules),
                value: snapshot.value.clone(),
                timestamp: timestamp.to_string(),
            })
        })
        .collect();

    if !failures.is_empty() {
        log.extend(failures.iter().cloned());
        return Ok(SubmitOutcome::Blocked { failures });
    }

    Ok(SubmitOutcome::Accepted {
        payload: log.to_json()?,
    })
}

/// True when every required field is filled and passes its constraints.
pub fn required_fields_complete(fields: &FieldsConfig, snapshots: &[FieldSnapshot]) -> bool {
    FieldId::REQUIRED.iter().all(|required| {
        snapshots
            .iter()
            .find(|snapshot| snapshot.field == *required)
            .is_some_and(|snapshot| {
                !snapshot.value.is_empty()
                    && ValidityState::evaluate(fields.get(*required), &snapshot.value)
                        .with_custom_error(snapshot.custom_error)
                        .is_valid()
            })
    })
}
