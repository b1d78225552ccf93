//! DOM-independent rules of the contact site: field constraints, keystroke
//! masking, the error log, the comments counter, theme state and the
//! navigation decision. The `frontend` crate wires these into the page.

pub mod config;
pub mod counter;
pub mod error_log;
pub mod field;
pub mod navigation;
pub mod submission;
pub mod theme;
pub mod validity;

pub use config::{
    ConfigError, CounterConfig, FieldsConfig, FormConfig, NavigationConfig, SiteConfig,
    ThemeConfig,
};
pub use counter::{CharCounter, CounterLevel};
pub use error_log::{ErrorLog, ValidationError};
pub use field::{CharSet, FieldId, FieldRules, InputKind, KeystrokeOutcome, check_keystroke};
pub use navigation::{LinkClick, NavDecision, SkipReason, is_same_site_href, link_selector};
pub use submission::{
    COMPLETE_MESSAGE, FieldSnapshot, SUCCESS_MESSAGE, SubmitOutcome, evaluate_submission,
    required_fields_complete,
};
pub use theme::{Theme, ToggleLabel};
pub use validity::{ErrorType, ValidityState, blur_message, has_blur_check};
