//! Error and info banners of the contact form.
//!
//! A banner shows either a persistent message (stays until cleared) or a
//! transient one (auto-dismissed). Each banner owns a single dismiss slot:
//! arming a new transient message drops the pending timer, and showing a
//! persistent message or clearing cancels it, so an old timer never wipes a
//! newer message.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlElement;

use crate::dom::DomError;

/// Slot holding at most one pending timer. Replacing or clearing the slot
/// cancels the timer it held.
#[derive(Clone, Default)]
pub struct TimerSlot {
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl TimerSlot {
    pub fn arm(&self, millis: u32, callback: impl FnOnce() + 'static) {
        self.cancel();
        let slot = self.pending.clone();
        let timeout = Timeout::new(millis, move || {
            *slot.borrow_mut() = None;
            callback();
        });
        *self.pending.borrow_mut() = Some(timeout);
    }

    pub fn cancel(&self) {
        if let Some(timer) = self.pending.borrow_mut().take() {
            timer.cancel();
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

#[derive(Clone)]
pub struct MessageOutput {
    element: HtmlElement,
    dismiss: TimerSlot,
}

impl MessageOutput {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            dismiss: TimerSlot::default(),
        }
    }

    pub fn show_persistent(&self, message: &str) -> Result<(), DomError> {
        self.dismiss.cancel();
        self.show(message)
    }

    pub fn show_transient(&self, message: &str, millis: u32) -> Result<(), DomError> {
        self.show(message)?;
        let output = self.clone();
        self.dismiss.arm(millis, move || {
            if let Err(error) = output.hide() {
                zoon::eprintln!("Failed to dismiss message: {error}");
            }
        });
        Ok(())
    }

    pub fn clear(&self) -> Result<(), DomError> {
        self.dismiss.cancel();
        self.hide()
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.element
            .style()
            .get_property_value("display")
            .is_ok_and(|display| display != "none")
    }

    fn show(&self, message: &str) -> Result<(), DomError> {
        self.element.set_text_content(Some(message));
        self.element.style().set_property("display", "block")?;
        Ok(())
    }

    fn hide(&self) -> Result<(), DomError> {
        self.element.set_text_content(Some(""));
        self.element.style().set_property("display", "none")?;
        Ok(())
    }
}
