//! Which link clicks get wrapped in a view transition.

/// Root-relative and relative prefixes that always point inside the site.
pub const LOCAL_PREFIXES: [&str; 3] = ["/", "./", "../"];

/// `href` values the interceptor attaches to.
pub fn is_same_site_href(href: &str, pages: &[String]) -> bool {
    LOCAL_PREFIXES.iter().any(|prefix| href.starts_with(prefix))
        || pages.iter().any(|page| href.starts_with(page.as_str()))
}

/// CSS selector matching every anchor [`is_same_site_href`] accepts.
pub fn link_selector(pages: &[String]) -> String {
    LOCAL_PREFIXES
        .iter()
        .copied()
        .chain(pages.iter().map(String::as_str))
        .map(|prefix| format!("a[href^=\"{prefix}\"]"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything the click handler knows about the link and the current page.
#[derive(Debug, Clone, Default)]
pub struct LinkClick<'a> {
    /// Raw `href` attribute.
    pub href: &'a str,
    pub target: &'a str,
    pub download: bool,
    pub link_host: &'a str,
    /// Path of the link after the browser resolved it against the page URL.
    pub link_path: &'a str,
    pub page_host: &'a str,
    pub page_path: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NewContext,
    Download,
    CurrentPage,
    ExternalHost,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    /// Leave the click alone; the browser navigates normally.
    Default(SkipReason),
    /// Cancel the click and navigate to `href` inside a view transition.
    Transition { href: String },
}

impl LinkClick<'_> {
    fn opens_new_context(&self) -> bool {
        !matches!(self.target, "" | "_self" | "_parent" | "_top")
    }

    fn is_current_page(&self) -> bool {
        let last_segment = self.page_path.rsplit('/').next().unwrap_or_default();
        self.href == self.page_path
            || (!last_segment.is_empty() && self.href == last_segment)
            || self.link_path == self.page_path
    }

    pub fn decide(&self, transitions_supported: bool) -> NavDecision {
        if self.opens_new_context() {
            NavDecision::Default(SkipReason::NewContext)
        } else if self.download {
            NavDecision::Default(SkipReason::Download)
        } else if self.is_current_page() {
            NavDecision::Default(SkipReason::CurrentPage)
        } else if self.link_host != self.page_host {
            NavDecision::Default(SkipReason::ExternalHost)
        } else if !transitions_supported {
            NavDecision::Default(SkipReason::Unsupported)
        } else {
            NavDecision::Transition {
                href: self.href.to_string(),
            }
        }
    }
}
