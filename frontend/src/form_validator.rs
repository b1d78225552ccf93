//! Contact form validation: keystroke masking, blur-time messages, the
//! comments counter and the submission gate.
//!
//! Every element is resolved once in [`FormElements::resolve`]; the
//! validator then owns those references and the session's [`ErrorLog`].

use shared::{
    COMPLETE_MESSAGE, CharCounter, CounterLevel, ErrorLog, FieldId, FieldSnapshot, FormConfig,
    KeystrokeOutcome, SubmitOutcome, ValidationError, ValidityState, blur_message,
    check_keystroke, evaluate_submission, has_blur_check, required_fields_complete,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::dom::{DomError, FieldElement, element_by_id, listen, optional_element_by_id};
use crate::message_output::{MessageOutput, TimerSlot};

const FLASH_CLASS: &str = "flash-error";
const COUNTER_CLASS: &str = "char-counter";

// ===== ELEMENTS =====

pub struct BoundField {
    pub id: FieldId,
    pub element: FieldElement,
    /// Last value that passed keystroke masking.
    accepted: RefCell<String>,
    flash: TimerSlot,
}

impl BoundField {
    /// Take `value` as the new masking baseline. Needed wherever the value
    /// changes without an `input` event.
    fn resync(&self, value: String) {
        *self.accepted.borrow_mut() = value;
    }
}

pub struct FormElements {
    pub form: HtmlFormElement,
    /// Fields present on the page, in submission order.
    pub fields: Vec<BoundField>,
    pub error_output: MessageOutput,
    pub info_output: MessageOutput,
    pub counter: Option<HtmlElement>,
}

impl FormElements {
    /// Resolve every element the validator needs, failing on the first
    /// missing or mistyped one. Optional fields may be absent.
    pub fn resolve(document: &Document, config: &FormConfig) -> Result<Self, DomError> {
        let form = element_by_id::<HtmlFormElement>(document, &config.form_id, "a <form>")?;
        let error_output =
            element_by_id::<HtmlElement>(document, &config.error_output_id, "an HTML element")?;
        let info_output =
            element_by_id::<HtmlElement>(document, &config.info_output_id, "an HTML element")?;

        let mut fields = Vec::new();
        for id in FieldId::ALL {
            let rules = config.fields.get(id);
            match FieldElement::resolve(document, &rules.element_id)? {
                Some(element) => fields.push(BoundField {
                    id,
                    accepted: RefCell::new(element.value()),
                    element,
                    flash: TimerSlot::default(),
                }),
                None if rules.required => {
                    return Err(DomError::MissingElement {
                        id: rules.element_id.clone(),
                    });
                }
                None => zoon::println!("Optional field #{} not on this page", rules.element_id),
            }
        }

        let counter = match fields.iter().find(|field| field.id == FieldId::Comments) {
            Some(comments) => Some(attach_counter(
                document,
                config,
                &comments.element,
                &config.fields.comments.element_id,
            )?),
            None => None,
        };

        Ok(Self {
            form,
            fields,
            error_output: MessageOutput::new(error_output),
            info_output: MessageOutput::new(info_output),
            counter,
        })
    }

    pub fn field(&self, id: FieldId) -> Option<&BoundField> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Create the counter next to the comments field, reusing one left by an
/// earlier attach.
fn attach_counter(
    document: &Document,
    config: &FormConfig,
    comments: &FieldElement,
    comments_id: &str,
) -> Result<HtmlElement, DomError> {
    if let Some(existing) =
        optional_element_by_id::<HtmlElement>(document, &config.counter_id, "an HTML element")?
    {
        return Ok(existing);
    }
    let parent = comments
        .element()
        .parent_node()
        .ok_or_else(|| DomError::MissingParent {
            id: comments_id.to_string(),
        })?;
    let counter = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::UnexpectedElement {
            id: config.counter_id.clone(),
            expected: "an HTML element",
        })?;
    counter.set_id(&config.counter_id);
    counter.set_class_name(COUNTER_CLASS);
    parent.append_child(&counter)?;
    Ok(counter)
}

// ===== VALIDATOR =====

pub struct FormValidator {
    document: Document,
    config: FormConfig,
    elements: FormElements,
    error_log: RefCell<ErrorLog>,
}

impl FormValidator {
    pub fn attach(document: &Document, config: &FormConfig) -> Result<Rc<Self>, DomError> {
        let elements = FormElements::resolve(document, config)?;
        let validator = Rc::new(Self {
            document: document.clone(),
            config: config.clone(),
            elements,
            error_log: RefCell::new(ErrorLog::new()),
        });
        validator.install_listeners()?;
        validator.update_counter();
        zoon::println!("Form validation attached to #{}", config.form_id);
        Ok(validator)
    }

    pub fn error_log_len(&self) -> usize {
        self.error_log.borrow().len()
    }

    fn install_listeners(self: &Rc<Self>) -> Result<(), DomError> {
        for field in &self.elements.fields {
            let id = field.id;
            let validator = Rc::clone(self);
            listen(field.element.element(), "input", move |_: Event| {
                validator.handle_input(id)
            })?;
            // Script-set and bfcache-restored values arrive without `input`.
            let validator = Rc::clone(self);
            listen(field.element.element(), "focus", move |_: Event| {
                if let Some(field) = validator.elements.field(id) {
                    field.resync(field.element.value());
                }
            })?;
            if has_blur_check(id) {
                let validator = Rc::clone(self);
                listen(field.element.element(), "blur", move |_: Event| {
                    validator.handle_blur(id)
                })?;
            }
        }
        let validator = Rc::clone(self);
        listen(&self.elements.form, "submit", move |event: Event| {
            validator.handle_submit(&event)
        })?;
        let validator = Rc::clone(self);
        listen(&self.elements.form, "reset", move |_: Event| {
            validator.handle_reset()
        })?;
        Ok(())
    }

    // ===== INPUT =====

    fn handle_input(&self, id: FieldId) {
        let Some(field) = self.elements.field(id) else {
            return;
        };
        if let Some(charset) = self.config.fields.get(id).charset {
            let current = field.element.value();
            let outcome = check_keystroke(charset, &field.accepted.borrow(), &current);
            match outcome {
                KeystrokeOutcome::Accepted => field.resync(current),
                KeystrokeOutcome::Rejected { rejected, restored } => {
                    field.element.set_value(&restored);
                    field.resync(restored);
                    self.flash(field, &charset.rejection_message(rejected));
                }
            }
        }
        // Optimistic: the message comes back at the next blur if still invalid.
        if has_blur_check(id) {
            field.element.set_custom_validity("");
        }
        if id == FieldId::Comments {
            self.update_counter();
        }
    }

    /// `reset` fires before the browser restores the defaults, so the
    /// baseline is taken from the default value rather than the live one.
    fn handle_reset(&self) {
        for field in &self.elements.fields {
            field.resync(field.element.default_value());
        }
    }

    fn flash(&self, field: &BoundField, message: &str) {
        let element = field.element.element().clone();
        if let Err(error) = element.class_list().add_1(FLASH_CLASS) {
            zoon::eprintln!("Failed to flash #{}: {:?}", element.id(), error);
        }
        field.flash.arm(self.config.flash_ms, move || {
            let _ = element.class_list().remove_1(FLASH_CLASS);
        });
        if let Err(error) = self
            .elements
            .error_output
            .show_transient(message, self.config.message_ms)
        {
            zoon::eprintln!("Failed to show input error: {error}");
        }
    }

    fn update_counter(&self) {
        let (Some(counter_element), Some(comments)) = (
            self.elements.counter.as_ref(),
            self.elements.field(FieldId::Comments),
        ) else {
            return;
        };
        let counter = CharCounter::new(&comments.element.value(), &self.config.counter);
        counter_element.set_text_content(Some(&counter.text()));
        let class_list = counter_element.class_list();
        for class in CounterLevel::CSS_CLASSES {
            let _ = class_list.remove_1(class);
        }
        if let Some(class) = counter.level().css_class() {
            let _ = class_list.add_1(class);
        }
    }

    // ===== BLUR =====

    fn handle_blur(&self, id: FieldId) {
        let Some(field) = self.elements.field(id) else {
            return;
        };
        let rules = self.config.fields.get(id);
        let validity = ValidityState::evaluate(rules, &field.element.value());
        let message = blur_message(id, rules, &validity).unwrap_or_default();
        field.element.set_custom_validity(&message);

        if required_fields_complete(&self.config.fields, &self.snapshots()) {
            if let Err(error) = self.elements.info_output.show_persistent(COMPLETE_MESSAGE) {
                zoon::eprintln!("Failed to show completion banner: {error}");
            }
        }
    }

    // ===== SUBMIT =====

    fn snapshots(&self) -> Vec<FieldSnapshot> {
        self.elements
            .fields
            .iter()
            .map(|field| FieldSnapshot {
                field: field.id,
                value: field.element.value(),
                custom_error: field.element.has_custom_error(),
            })
            .collect()
    }

    fn clear_messages(&self) -> Result<(), DomError> {
        self.elements.error_output.clear()?;
        self.elements.info_output.clear()
    }

    fn handle_submit(&self, event: &Event) {
        if let Err(error) = self.clear_messages() {
            zoon::eprintln!("Failed to clear form messages: {error}");
        }
        let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
        let snapshots = self.snapshots();
        let outcome = evaluate_submission(
            &self.config.fields,
            &mut self.error_log.borrow_mut(),
            &snapshots,
            &timestamp,
        );

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                zoon::eprintln!("Failed to serialize error log, submitting without it: {error}");
                return;
            }
        };
        let message = outcome.message();
        match outcome {
            SubmitOutcome::Blocked { failures } => {
                event.prevent_default();
                if let Err(error) = self.elements.error_output.show_persistent(&message) {
                    zoon::eprintln!("Failed to show error summary: {error}");
                }
                self.log_failures(&failures);
            }
            SubmitOutcome::Accepted { payload } => {
                if !self.error_log.borrow().is_empty() {
                    zoon::println!(
                        "Submitting with {} earlier validation error(s) attached",
                        self.error_log_len()
                    );
                }
                if let Err(error) = self.write_error_payload(&payload) {
                    zoon::eprintln!("Failed to attach error log to submission: {error}");
                }
                if let Err(error) = self.elements.info_output.show_persistent(&message) {
                    zoon::eprintln!("Failed to show success message: {error}");
                }
            }
        }
    }

    fn log_failures(&self, failures: &[ValidationError]) {
        zoon::println!(
            "⚠️ Submission blocked: {} error(s) this attempt, {} in session log",
            failures.len(),
            self.error_log_len()
        );
        match serde_wasm_bindgen::to_value(&failures) {
            Ok(value) => web_sys::console::log_2(&"Form Errors:".into(), &value),
            Err(error) => zoon::eprintln!("Failed to convert form errors for console: {error}"),
        }
    }

    /// Hidden input carrying the session's error log, created on first use.
    fn write_error_payload(&self, payload: &str) -> Result<(), DomError> {
        let input = match optional_element_by_id::<HtmlInputElement>(
            &self.document,
            &self.config.errors_input_id,
            "an <input>",
        )? {
            Some(input) => input,
            None => {
                let input = self
                    .document
                    .create_element("input")?
                    .dyn_into::<HtmlInputElement>()
                    .map_err(|_| DomError::UnexpectedElement {
                        id: self.config.errors_input_id.clone(),
                        expected: "an <input>",
                    })?;
                input.set_type("hidden");
                input.set_id(&self.config.errors_input_id);
                input.set_name(&self.config.errors_input_name);
                self.elements.form.append_child(&input)?;
                input
            }
        };
        input.set_value(payload);
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::EventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Build a contact form whose ids all start with `prefix`.
    fn mount_form(prefix: &str) -> (FormConfig, HtmlElement) {
        let document = crate::dom::document().unwrap();
        let mut config = FormConfig::default();
        config.form_id = format!("{prefix}-form");
        config.error_output_id = format!("{prefix}-error-output");
        config.info_output_id = format!("{prefix}-info-output");
        config.errors_input_id = format!("{prefix}-form-errors-input");
        config.counter_id = format!("{prefix}-char-counter");
        config.fields.name.element_id = format!("{prefix}-name");
        config.fields.email.element_id = format!("{prefix}-email");
        config.fields.phone.element_id = format!("{prefix}-phone");
        config.fields.subject.element_id = format!("{prefix}-subject");
        config.fields.comments.element_id = format!("{prefix}-comments");

        let container = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        container.set_inner_html(&format!(
            r#"<form id="{prefix}-form">
                <input id="{prefix}-name" type="text">
                <input id="{prefix}-email" type="email">
                <input id="{prefix}-phone" type="tel">
                <input id="{prefix}-subject" type="text">
                <div><textarea id="{prefix}-comments"></textarea></div>
            </form>
            <div id="{prefix}-error-output"></div>
            <div id="{prefix}-info-output"></div>"#
        ));
        document.body().unwrap().append_child(&container).unwrap();
        (config, container)
    }

    fn field(id: &str) -> FieldElement {
        let document = crate::dom::document().unwrap();
        FieldElement::resolve(&document, id).unwrap().unwrap()
    }

    fn type_into(id: &str, value: &str) {
        let field = field(id);
        field.set_value(value);
        let event = Event::new("input").unwrap();
        field.element().dispatch_event(&event).unwrap();
    }

    fn dispatch(id: &str, event_type: &str) {
        let event = Event::new(event_type).unwrap();
        field(id).element().dispatch_event(&event).unwrap();
    }

    fn form(config: &FormConfig) -> HtmlFormElement {
        let document = crate::dom::document().unwrap();
        element_by_id::<HtmlFormElement>(&document, &config.form_id, "a <form>").unwrap()
    }

    fn submit(config: &FormConfig) -> Event {
        let form = form(config);
        let init = EventInit::new();
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("submit", &init).unwrap();
        form.dispatch_event(&event).unwrap();
        event
    }

    fn text_of(id: &str) -> String {
        crate::dom::document()
            .unwrap()
            .get_element_by_id(id)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn rejected_character_is_reverted_and_reported() {
        let (config, container) = mount_form("mask");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        type_into("mask-name", "John");
        type_into("mask-name", "John3");

        let name = field("mask-name");
        assert_eq!(name.value(), "John");
        assert!(name.element().class_list().contains(FLASH_CLASS));
        assert!(text_of("mask-error-output").contains("\"3\""));

        container.remove();
    }

    #[wasm_bindgen_test]
    fn counter_follows_comments_length() {
        let (config, container) = mount_form("counter");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();
        assert_eq!(text_of("counter-char-counter"), "500 characters remaining (0/500)");

        type_into("counter-comments", &"a".repeat(450));
        let counter = document.get_element_by_id("counter-char-counter").unwrap();
        assert!(counter.class_list().contains("warning"));
        assert_eq!(text_of("counter-char-counter"), "50 characters remaining (450/500)");

        type_into("counter-comments", &"a".repeat(500));
        assert!(counter.class_list().contains("danger"));
        assert!(!counter.class_list().contains("warning"));

        container.remove();
    }

    #[wasm_bindgen_test]
    fn submission_gate_keeps_history() {
        let (config, container) = mount_form("submit");
        let document = crate::dom::document().unwrap();
        let validator = FormValidator::attach(&document, &config).unwrap();

        let blocked = submit(&config);
        assert!(blocked.default_prevented());
        assert_eq!(validator.error_log_len(), 4);
        assert_eq!(
            text_of("submit-error-output"),
            "⚠️ Please fix 4 error(s) before submitting"
        );

        type_into("submit-name", "Jane Doe");
        type_into("submit-email", "jane@example.com");
        type_into("submit-subject", "Hello there");
        type_into("submit-comments", "Looking forward to working together.");

        let accepted = submit(&config);
        assert!(!accepted.default_prevented());
        assert_eq!(text_of("submit-error-output"), "");
        assert_eq!(text_of("submit-info-output"), shared::SUCCESS_MESSAGE);

        let hidden = element_by_id::<HtmlInputElement>(
            &document,
            &config.errors_input_id,
            "an <input>",
        )
        .unwrap();
        assert_eq!(hidden.name(), "form-errors");
        let errors: Vec<ValidationError> = serde_json::from_str(&hidden.value()).unwrap();
        assert_eq!(errors.len(), 4);
        assert_eq!(validator.error_log_len(), 4);

        container.remove();
    }

    #[wasm_bindgen_test]
    fn reset_form_does_not_bring_back_old_text() {
        let (config, container) = mount_form("reset");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        type_into("reset-name", "John");
        form(&config).reset();
        assert_eq!(field("reset-name").value(), "");

        type_into("reset-name", "3");
        assert_eq!(field("reset-name").value(), "");

        container.remove();
    }

    #[wasm_bindgen_test]
    fn scripted_value_becomes_baseline_on_focus() {
        let (config, container) = mount_form("scripted");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        type_into("scripted-name", "John");
        field("scripted-name").set_value("Ann");
        dispatch("scripted-name", "focus");
        type_into("scripted-name", "Ann7");
        assert_eq!(field("scripted-name").value(), "Ann");

        container.remove();
    }

    #[wasm_bindgen_test]
    fn phone_rejects_letters() {
        let (config, container) = mount_form("phone");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        type_into("phone-phone", "555");
        type_into("phone-phone", "555a");

        let phone = field("phone-phone");
        assert_eq!(phone.value(), "555");
        assert!(phone.element().class_list().contains(FLASH_CLASS));
        assert_eq!(
            text_of("phone-error-output"),
            "⚠️ Invalid character \"a\" - Only numbers and phone symbols allowed"
        );

        type_into("phone-phone", "+1 (555) 123-4567");
        assert_eq!(phone.value(), "+1 (555) 123-4567");

        container.remove();
    }

    #[wasm_bindgen_test]
    fn blur_sets_message_and_next_input_clears_it() {
        let (config, container) = mount_form("blur");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        dispatch("blur-name", "blur");
        let name = field("blur-name");
        assert!(name.has_custom_error());
        assert_eq!(name.validation_message(), "Please enter your name");

        type_into("blur-name", "J");
        assert!(!name.has_custom_error());

        dispatch("blur-name", "blur");
        assert_eq!(
            name.validation_message(),
            "Name must be at least 2 characters long"
        );

        type_into("blur-name", "Jo");
        dispatch("blur-name", "blur");
        assert!(!name.has_custom_error());

        container.remove();
    }

    #[wasm_bindgen_test]
    fn completion_banner_after_last_required_field() {
        let (config, container) = mount_form("complete");
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        type_into("complete-name", "Jane Doe");
        type_into("complete-email", "jane@example.com");
        type_into("complete-subject", "Hello there");
        dispatch("complete-subject", "blur");
        assert_eq!(text_of("complete-info-output"), "");

        type_into("complete-comments", "Looking forward to working together.");
        dispatch("complete-comments", "blur");
        assert_eq!(text_of("complete-info-output"), shared::COMPLETE_MESSAGE);

        container.remove();
    }

    #[wasm_bindgen_test]
    async fn flash_and_message_expire() {
        let (mut config, container) = mount_form("expire");
        config.flash_ms = 20;
        config.message_ms = 200;
        let document = crate::dom::document().unwrap();
        FormValidator::attach(&document, &config).unwrap();

        type_into("expire-subject", "50%");
        let subject = field("expire-subject");
        assert_eq!(subject.value(), "");
        assert!(subject.element().class_list().contains(FLASH_CLASS));

        gloo_timers::future::TimeoutFuture::new(60).await;
        assert!(!subject.element().class_list().contains(FLASH_CLASS));
        assert!(!text_of("expire-error-output").is_empty());

        gloo_timers::future::TimeoutFuture::new(200).await;
        assert_eq!(text_of("expire-error-output"), "");

        container.remove();
    }
}
