use serde::{Deserialize, Serialize};

/// Persisted colour scheme of the site.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value read from storage; anything unrecognised falls back to light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The toggle offers a switch to the other theme.
    pub fn toggle_label(self) -> ToggleLabel {
        match self {
            Theme::Dark => ToggleLabel {
                icon: "☀️",
                text: "Light Mode",
            },
            Theme::Light => ToggleLabel {
                icon: "🌙",
                text: "Dark Mode",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLabel {
    pub icon: &'static str,
    pub text: &'static str,
}

impl ToggleLabel {
    pub fn to_html(self) -> String {
        format!(
            "<span class=\"icon\">{}</span><span>{}</span>",
            self.icon, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_stored_values() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
    }

    #[test]
    fn test_toggle_from_light() {
        let next = Theme::default().toggled();
        assert_eq!(next.as_str(), "dark");
        assert_eq!(next.toggle_label().text, "Light Mode");
        assert_eq!(
            next.toggle_label().to_html(),
            "<span class=\"icon\">☀️</span><span>Light Mode</span>"
        );
        assert_eq!(next.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggle_label().text, "Dark Mode");
    }
}
