//! Element lookup and event wiring shared by the page components.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use web_sys::{Document, DocumentReadyState, EventTarget, HtmlInputElement, HtmlTextAreaElement};

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("required element #{id} is missing")]
    MissingElement { id: String },
    #[error("element #{id} is not {expected}")]
    UnexpectedElement { id: String, expected: &'static str },
    #[error("element #{id} has no parent to attach to")]
    MissingParent { id: String },
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub fn window() -> Result<web_sys::Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// Look up `#id` and check it is a `T`.
pub fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    optional_element_by_id(document, id, expected)?.ok_or_else(|| DomError::MissingElement {
        id: id.to_string(),
    })
}

/// Like [`element_by_id`], but an absent element is not an error.
pub fn optional_element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<Option<T>, DomError> {
    match document.get_element_by_id(id) {
        None => Ok(None),
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| DomError::UnexpectedElement {
                id: id.to_string(),
                expected,
            }),
    }
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E>(
    target: &EventTarget,
    event_type: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), DomError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` once the document structure has been parsed.
pub fn on_dom_ready(document: &Document, f: impl FnOnce() + 'static) -> Result<(), DomError> {
    if document.ready_state() != DocumentReadyState::Loading {
        f();
        return Ok(());
    }
    let mut f = Some(f);
    listen(document, "DOMContentLoaded", move |_: web_sys::Event| {
        if let Some(f) = f.take() {
            f();
        }
    })
}

// ===== FORM CONTROLS =====

/// A text control of the contact form: `<input>` or `<textarea>`.
#[derive(Clone, Debug)]
pub enum FieldElement {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl FieldElement {
    pub fn resolve(document: &Document, id: &str) -> Result<Option<Self>, DomError> {
        let Some(element) = document.get_element_by_id(id) else {
            return Ok(None);
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(Some(FieldElement::Input(input.clone())));
        }
        match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(text_area) => Ok(Some(FieldElement::TextArea(text_area))),
            Err(_) => Err(DomError::UnexpectedElement {
                id: id.to_string(),
                expected: "an <input> or <textarea>",
            }),
        }
    }

    pub fn value(&self) -> String {
        match self {
            FieldElement::Input(input) => input.value(),
            FieldElement::TextArea(text_area) => text_area.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            FieldElement::Input(input) => input.set_value(value),
            FieldElement::TextArea(text_area) => text_area.set_value(value),
        }
    }

    /// Value the control returns to on a form reset.
    pub fn default_value(&self) -> String {
        match self {
            FieldElement::Input(input) => input.default_value(),
            FieldElement::TextArea(text_area) => text_area.default_value(),
        }
    }

    pub fn set_custom_validity(&self, message: &str) {
        match self {
            FieldElement::Input(input) => input.set_custom_validity(message),
            FieldElement::TextArea(text_area) => text_area.set_custom_validity(message),
        }
    }

    /// A custom validity message is currently set.
    pub fn has_custom_error(&self) -> bool {
        match self {
            FieldElement::Input(input) => input.validity().custom_error(),
            FieldElement::TextArea(text_area) => text_area.validity().custom_error(),
        }
    }

    #[cfg(test)]
    pub fn validation_message(&self) -> String {
        match self {
            FieldElement::Input(input) => input.validation_message(),
            FieldElement::TextArea(text_area) => text_area.validation_message(),
        }
        .unwrap_or_default()
    }

    pub fn element(&self) -> &web_sys::HtmlElement {
        match self {
            FieldElement::Input(input) => input,
            FieldElement::TextArea(text_area) => text_area,
        }
    }
}
