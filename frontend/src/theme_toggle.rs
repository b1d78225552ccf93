//! Light/dark theme toggle persisted in `localStorage`.

use shared::{Theme, ThemeConfig};
use std::cell::Cell;
use std::rc::Rc;
use web_sys::{Document, Event, Storage};

use crate::dom::{self, DomError, listen};

/// Durable per-origin storage, if the browser exposes it.
#[derive(Clone)]
pub struct ThemeStore {
    storage: Option<Storage>,
    key: String,
}

impl ThemeStore {
    pub fn open(key: &str) -> Self {
        let storage = match dom::window().map(|window| window.local_storage()) {
            Ok(Ok(Some(storage))) => Some(storage),
            Ok(Ok(None)) | Err(_) => {
                zoon::println!("localStorage not available, theme will not persist");
                None
            }
            Ok(Err(error)) => {
                zoon::eprintln!("localStorage access denied: {:?}", error);
                None
            }
        };
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn load(&self) -> Theme {
        let stored = self
            .storage
            .as_ref()
            .and_then(|storage| storage.get_item(&self.key).ok().flatten());
        Theme::from_stored(stored.as_deref())
    }

    pub fn save(&self, theme: Theme) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(error) = storage.set_item(&self.key, theme.as_str()) {
            zoon::eprintln!("Failed to persist theme '{}': {:?}", theme.as_str(), error);
        }
    }
}

/// Set the theme attribute on `<html>`.
pub fn apply_theme(document: &Document, config: &ThemeConfig, theme: Theme) -> Result<(), DomError> {
    document
        .document_element()
        .ok_or(DomError::NoDocument)?
        .set_attribute(&config.attribute, theme.as_str())?;
    Ok(())
}

/// Read the saved preference and apply it right away, before the page body
/// is built, so the wrong theme never shows.
pub fn apply_saved_theme(document: &Document, config: &ThemeConfig) -> (ThemeStore, Theme) {
    let store = ThemeStore::open(&config.storage_key);
    let theme = store.load();
    if let Err(error) = apply_theme(document, config, theme) {
        zoon::eprintln!("Failed to apply saved theme: {error}");
    }
    (store, theme)
}

/// Build the toggle button and append it to `<body>`.
pub fn install_toggle(
    document: &Document,
    config: &ThemeConfig,
    store: ThemeStore,
    initial: Theme,
) -> Result<web_sys::Element, DomError> {
    let body = document.body().ok_or(DomError::MissingElement {
        id: "body".to_string(),
    })?;
    let button = document.create_element("button")?;
    button.set_class_name("theme-toggle");
    button.set_attribute("aria-label", "Toggle theme")?;
    button.set_inner_html(&initial.toggle_label().to_html());

    let current = Rc::new(Cell::new(initial));
    listen(&button, "click", {
        let document = document.clone();
        let config = config.clone();
        let button = button.clone();
        move |_: Event| {
            let next = current.get().toggled();
            current.set(next);
            if let Err(error) = apply_theme(&document, &config, next) {
                zoon::eprintln!("Failed to switch theme: {error}");
            }
            store.save(next);
            button.set_inner_html(&next.toggle_label().to_html());
        }
    })?;

    body.append_child(&button)?;
    Ok(button)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_config(key: &str) -> ThemeConfig {
        ThemeConfig {
            storage_key: key.to_string(),
            attribute: "data-theme".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn missing_preference_defaults_to_light() {
        let document = dom::document().unwrap();
        let config = test_config("theme-test-missing");
        let store = ThemeStore::open(&config.storage_key);
        if let Some(storage) = &store.storage {
            storage.remove_item(&config.storage_key).unwrap();
        }

        let (_, theme) = apply_saved_theme(&document, &config);
        assert_eq!(theme, Theme::Light);
        let root = document.document_element().unwrap();
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));
    }

    #[wasm_bindgen_test]
    fn click_switches_and_persists() {
        let document = dom::document().unwrap();
        let config = test_config("theme-test-click");
        let store = ThemeStore::open(&config.storage_key);
        store.save(Theme::Light);

        let button = install_toggle(&document, &config, store.clone(), Theme::Light).unwrap();
        assert!(button.text_content().unwrap().contains("Dark Mode"));

        button.dyn_ref::<web_sys::HtmlElement>().unwrap().click();

        assert_eq!(store.load(), Theme::Dark);
        assert!(button.text_content().unwrap().contains("Light Mode"));
        let root = document.document_element().unwrap();
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));

        button.remove();
    }
}
