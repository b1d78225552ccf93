//! Contact site entry point
//!
//! Attaches three independent components to the host page:
//! - theme toggle (saved theme applied immediately, button after DOM ready)
//! - contact form validator (only on pages that carry the form)
//! - view transitions for same-site links

mod config;
mod dom;
mod form_validator;
mod message_output;
mod theme_toggle;
mod view_transitions;

use shared::SiteConfig;
use web_sys::Document;

use crate::form_validator::FormValidator;

pub fn main() {
    let config = config::load_site_config();
    let document = match dom::document() {
        Ok(document) => document,
        Err(error) => {
            zoon::eprintln!("🚨 Contact site scripts not started: {error}");
            return;
        }
    };

    // Wasm starts asynchronously; the host page's inline head snippet covers first paint.
    let (theme_store, theme) = theme_toggle::apply_saved_theme(&document, &config.theme);

    let ready_document = document.clone();
    let result = dom::on_dom_ready(&document, move || {
        if let Err(error) =
            theme_toggle::install_toggle(&ready_document, &config.theme, theme_store, theme)
        {
            zoon::eprintln!("Theme toggle not installed: {error}");
        }
        attach_form_validator(&ready_document, &config);
        if let Err(error) = view_transitions::install(&ready_document, &config.navigation) {
            zoon::eprintln!("View transitions not installed: {error}");
        }
    });
    if let Err(error) = result {
        zoon::eprintln!("🚨 Failed to wait for DOMContentLoaded: {error}");
    }
}

fn attach_form_validator(document: &Document, config: &SiteConfig) {
    if document.get_element_by_id(&config.form.form_id).is_none() {
        zoon::println!("No #{} on this page, form validation skipped", config.form.form_id);
        return;
    }
    match FormValidator::attach(document, &config.form) {
        Ok(_) => zoon::println!("Form validation script loaded successfully!"),
        Err(error) => zoon::eprintln!("🚨 Form validation configuration error: {error}"),
    }
}
