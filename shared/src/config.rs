use serde::{Deserialize, Serialize};

use crate::field::{FieldId, FieldRules};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse site config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid site config: {0}")]
    Invalid(String),
}

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub form: FormConfig,
    pub theme: ThemeConfig,
    pub navigation: NavigationConfig,
}

impl SiteConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let counter = &self.form.counter;
        if counter.max_length == 0 {
            return Err(ConfigError::Invalid(
                "form.counter.max_length must be positive".to_string(),
            ));
        }
        if counter.warning_length >= counter.max_length {
            return Err(ConfigError::Invalid(format!(
                "form.counter.warning_length ({}) must be below max_length ({})",
                counter.warning_length, counter.max_length
            )));
        }
        if self.form.flash_ms == 0 || self.form.message_ms == 0 {
            return Err(ConfigError::Invalid(
                "form.flash_ms and form.message_ms must be positive".to_string(),
            ));
        }
        for field in FieldId::ALL {
            let rules = self.form.fields.get(field);
            if rules.element_id.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "form.fields.{}.element_id is empty",
                    field.as_str()
                )));
            }
            if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
                if min > max {
                    return Err(ConfigError::Invalid(format!(
                        "form.fields.{}: min_length {min} exceeds max_length {max}",
                        field.as_str()
                    )));
                }
            }
        }
        let ids = [
            &self.form.form_id,
            &self.form.error_output_id,
            &self.form.info_output_id,
            &self.form.errors_input_id,
            &self.form.errors_input_name,
            &self.form.counter_id,
            &self.theme.storage_key,
            &self.theme.attribute,
        ];
        if ids.iter().any(|id| id.is_empty()) {
            return Err(ConfigError::Invalid(
                "element ids, storage key and theme attribute must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub form_id: String,
    pub error_output_id: String,
    pub info_output_id: String,
    pub errors_input_id: String,
    pub errors_input_name: String,
    pub counter_id: String,
    pub flash_ms: u32,
    pub message_ms: u32,
    pub counter: CounterConfig,
    pub fields: FieldsConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: "contact-form".to_string(),
            error_output_id: "error-output".to_string(),
            info_output_id: "info-output".to_string(),
            errors_input_id: "form-errors-input".to_string(),
            errors_input_name: "form-errors".to_string(),
            counter_id: "char-counter".to_string(),
            flash_ms: 500,
            message_ms: 3000,
            counter: CounterConfig::default(),
            fields: FieldsConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    pub max_length: usize,
    /// Length at which the counter turns into its warning state.
    pub warning_length: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            max_length: 500,
            warning_length: 450,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FieldsConfig {
    pub name: FieldRules,
    pub email: FieldRules,
    pub phone: FieldRules,
    pub subject: FieldRules,
    pub comments: FieldRules,
}

impl FieldsConfig {
    pub fn get(&self, field: FieldId) -> &FieldRules {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Subject => &self.subject,
            FieldId::Comments => &self.comments,
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            name: FieldRules::default_for(FieldId::Name),
            email: FieldRules::default_for(FieldId::Email),
            phone: FieldRules::default_for(FieldId::Phone),
            subject: FieldRules::default_for(FieldId::Subject),
            comments: FieldRules::default_for(FieldId::Comments),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    /// Attribute set on `<html>`.
    pub attribute: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            attribute: "data-theme".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Page filenames whose links get view transitions.
    pub pages: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            pages: [
                "index.html",
                "about.html",
                "projects.html",
                "contact.html",
                "form-no-js.html",
                "form-with-js.html",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}
