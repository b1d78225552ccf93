use serde::{Deserialize, Serialize};

// ===== FIELD IDENTITY =====

/// One of the five contact form fields.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Subject,
    Comments,
}

impl FieldId {
    /// Submission order.
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Subject,
        FieldId::Comments,
    ];

    /// Fields that must be filled for the completeness banner. Phone is optional.
    pub const REQUIRED: [FieldId; 4] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Subject,
        FieldId::Comments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Subject => "subject",
            FieldId::Comments => "comments",
        }
    }
}

// ===== FIELD RULES =====

/// Kind of the underlying control, which decides type-level checks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Tel,
    TextArea,
}

/// Native-style constraints of a single field, mirroring the HTML attributes
/// `required`, `minlength`, `maxlength`, `pattern` and `type`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FieldRules {
    pub element_id: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub charset: Option<CharSet>,
    pub kind: InputKind,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            element_id: String::new(),
            required: false,
            min_length: None,
            max_length: None,
            charset: None,
            kind: InputKind::Text,
        }
    }
}

impl FieldRules {
    pub fn default_for(field: FieldId) -> Self {
        let element_id = field.as_str().to_string();
        match field {
            FieldId::Name => Self {
                element_id,
                required: true,
                min_length: Some(2),
                max_length: Some(50),
                charset: Some(CharSet::PersonName),
                kind: InputKind::Text,
            },
            FieldId::Email => Self {
                element_id,
                required: true,
                min_length: None,
                max_length: Some(100),
                charset: None,
                kind: InputKind::Email,
            },
            FieldId::Phone => Self {
                element_id,
                required: false,
                min_length: None,
                max_length: Some(20),
                charset: Some(CharSet::Phone),
                kind: InputKind::Tel,
            },
            FieldId::Subject => Self {
                element_id,
                required: true,
                min_length: Some(3),
                max_length: Some(100),
                charset: Some(CharSet::Subject),
                kind: InputKind::Text,
            },
            FieldId::Comments => Self {
                element_id,
                required: true,
                min_length: Some(10),
                max_length: Some(500),
                charset: None,
                kind: InputKind::TextArea,
            },
        }
    }
}

/// Length the way the browser counts it for `minlength`/`maxlength`.
pub fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

// ===== CHARACTER MASKING =====

/// Allowed character set of a masked field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CharSet {
    /// Letters, whitespace, hyphen, apostrophe.
    PersonName,
    /// Digits, whitespace, hyphen, parentheses, plus.
    Phone,
    /// Alphanumerics, whitespace and `-_,.!?`.
    Subject,
}

impl CharSet {
    pub fn allows(self, c: char) -> bool {
        match self {
            CharSet::PersonName => {
                c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\''
            }
            CharSet::Phone => {
                c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')' | '+')
            }
            CharSet::Subject => {
                c.is_ascii_alphanumeric()
                    || c.is_whitespace()
                    || matches!(c, '-' | '_' | ',' | '.' | '!' | '?')
            }
        }
    }

    /// Whole-value match, the equivalent of an anchored `pattern` attribute.
    pub fn matches(self, value: &str) -> bool {
        value.chars().all(|c| self.allows(c))
    }

    pub fn first_rejected(self, value: &str) -> Option<char> {
        value.chars().find(|&c| !self.allows(c))
    }

    pub fn strip_rejected(self, value: &str) -> String {
        value.chars().filter(|&c| self.allows(c)).collect()
    }

    pub fn rejection_message(self, rejected: char) -> String {
        let allowed = match self {
            CharSet::PersonName => "Only letters, spaces, hyphens, and apostrophes allowed",
            CharSet::Phone => "Only numbers and phone symbols allowed",
            CharSet::Subject => "Only letters, numbers, and basic punctuation allowed",
        };
        format!("⚠️ Invalid character \"{rejected}\" - {allowed}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    Accepted,
    Rejected { rejected: char, restored: String },
}

/// Decide whether the value produced by an `input` event may stay.
///
/// `previous` is the last value that was accepted. A rejection restores it,
/// unless it is itself outside the set (autofill, server-side prefill), in
/// which case the new value is stripped down to the allowed characters.
/// Callers keep `previous` in step with resets and scripted changes.
pub fn check_keystroke(charset: CharSet, previous: &str, current: &str) -> KeystrokeOutcome {
    match charset.first_rejected(current) {
        None => KeystrokeOutcome::Accepted,
        Some(rejected) => {
            let restored = if charset.matches(previous) {
                previous.to_string()
            } else {
                charset.strip_rejected(current)
            };
            KeystrokeOutcome::Rejected { rejected, restored }
        }
    }
}

// ===== EMAIL SHAPE =====

const EMAIL_LOCAL_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// The HTML "valid e-mail address" grammar used by `<input type="email">`.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SYMBOLS.contains(c));
    local_ok && !domain.is_empty() && domain.split('.').all(is_valid_domain_label)
}

fn is_valid_domain_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
