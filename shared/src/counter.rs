use crate::config::CounterConfig;
use crate::field::text_length;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Danger,
}

impl CounterLevel {
    /// CSS class toggled on the counter element.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            CounterLevel::Normal => None,
            CounterLevel::Warning => Some("warning"),
            CounterLevel::Danger => Some("danger"),
        }
    }

    pub const CSS_CLASSES: [&'static str; 2] = ["warning", "danger"];
}

/// Countdown shown under the comments field, derived from its current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    pub length: usize,
    pub max_length: usize,
    pub warning_length: usize,
}

impl CharCounter {
    pub fn new(text: &str, config: &CounterConfig) -> Self {
        Self {
            length: text_length(text),
            max_length: config.max_length,
            warning_length: config.warning_length,
        }
    }

    pub fn remaining(&self) -> i64 {
        self.max_length as i64 - self.length as i64
    }

    pub fn level(&self) -> CounterLevel {
        if self.length >= self.max_length {
            CounterLevel::Danger
        } else if self.length >= self.warning_length {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }

    pub fn text(&self) -> String {
        match self.level() {
            CounterLevel::Danger => format!(
                "⚠️ Maximum character limit reached! ({}/{})",
                self.length, self.max_length
            ),
            _ => format!(
                "{} characters remaining ({}/{})",
                self.remaining(),
                self.length,
                self.max_length
            ),
        }
    }
}
