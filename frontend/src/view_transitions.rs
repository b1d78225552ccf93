//! Animated page-to-page navigation through the View Transitions API.
//!
//! Same-site links are intercepted; when `document.startViewTransition`
//! exists the navigation happens inside its callback, otherwise the click is
//! left to the browser.

use js_sys::{Function, Reflect};
use shared::{LinkClick, NavDecision, NavigationConfig, is_same_site_href, link_selector};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlAnchorElement};

use crate::dom::{self, DomError, listen};

const START_VIEW_TRANSITION: &str = "startViewTransition";

pub fn transitions_supported(document: &Document) -> bool {
    Reflect::has(document, &JsValue::from_str(START_VIEW_TRANSITION)).unwrap_or(false)
}

/// Attach the click interceptor to every same-site link. Returns how many
/// links were wired.
pub fn install(document: &Document, config: &NavigationConfig) -> Result<usize, DomError> {
    if !transitions_supported(document) {
        zoon::println!("View Transitions API not supported in this browser");
    }
    let links = document.query_selector_all(&link_selector(&config.pages))?;
    let pages: Rc<[String]> = config.pages.clone().into();
    let mut installed = 0;
    for index in 0..links.length() {
        let Some(anchor) = links
            .get(index)
            .and_then(|node| node.dyn_into::<HtmlAnchorElement>().ok())
        else {
            continue;
        };
        let document = document.clone();
        let link = anchor.clone();
        let pages = Rc::clone(&pages);
        listen(&anchor, "click", move |event: Event| {
            if let Err(error) = handle_click(&document, &link, &pages, &event) {
                zoon::eprintln!("View transition failed, falling back to normal navigation: {error}");
            }
        })?;
        installed += 1;
    }
    zoon::println!("View transitions initialized for {installed} link(s)");
    Ok(installed)
}

fn handle_click(
    document: &Document,
    anchor: &HtmlAnchorElement,
    pages: &[String],
    event: &Event,
) -> Result<(), DomError> {
    let href = anchor.get_attribute("href").unwrap_or_default();
    // The attribute may have been rewritten since the listener was attached.
    if !is_same_site_href(&href, pages) {
        return Ok(());
    }
    let location = dom::window()?.location();
    let target = anchor.target();
    let link_host = anchor.hostname();
    let link_path = anchor.pathname();
    let page_host = location.hostname()?;
    let page_path = location.pathname()?;

    let click = LinkClick {
        href: &href,
        target: &target,
        download: anchor.has_attribute("download"),
        link_host: &link_host,
        link_path: &link_path,
        page_host: &page_host,
        page_path: &page_path,
    };
    let NavDecision::Transition { href } = click.decide(transitions_supported(document)) else {
        return Ok(());
    };

    let start = Reflect::get(document, &JsValue::from_str(START_VIEW_TRANSITION))?
        .dyn_into::<Function>()
        .map_err(|_| DomError::Js(format!("{START_VIEW_TRANSITION} is not callable")))?;
    let navigate = Closure::once_into_js(move || {
        let assigned = dom::window()
            .and_then(|window| window.location().set_href(&href).map_err(DomError::from));
        if let Err(error) = assigned {
            zoon::eprintln!("Navigation to {href} failed: {error}");
        }
    });
    start.call1(document, &navigate)?;
    event.prevent_default();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn only_same_site_links_are_wired() {
        let document = dom::document().unwrap();
        let container = document.create_element("nav").unwrap();
        container.set_inner_html(
            r#"<a href="/about.html">About</a>
               <a href="projects.html">Projects</a>
               <a href="https://example.com/">Elsewhere</a>
               <a href="mailto:me@example.com">Mail</a>"#,
        );
        document.body().unwrap().append_child(&container).unwrap();

        let config = NavigationConfig {
            pages: vec!["projects.html".to_string()],
        };
        let selected = document
            .query_selector_all(&link_selector(&config.pages))
            .unwrap();
        let inside: Vec<String> = (0..selected.length())
            .filter_map(|index| selected.get(index))
            .filter(|node| container.contains(Some(node)))
            .filter_map(|node| node.dyn_into::<HtmlAnchorElement>().ok())
            .filter_map(|anchor| anchor.get_attribute("href"))
            .collect();
        assert_eq!(inside, vec!["/about.html", "projects.html"]);

        assert!(install(&document, &config).unwrap() >= 2);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn rewritten_link_is_left_to_the_browser() {
        let document = dom::document().unwrap();
        let anchor = document
            .create_element("a")
            .unwrap()
            .dyn_into::<HtmlAnchorElement>()
            .unwrap();
        anchor.set_attribute("href", "https://example.com/").unwrap();

        let init = web_sys::EventInit::new();
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("click", &init).unwrap();
        handle_click(&document, &anchor, &["about.html".to_string()], &event).unwrap();
        assert!(!event.default_prevented());
    }
}
