//! Screen components: the content browser and the admin form overlay.

pub mod admin_form;
pub mod browser;

pub use admin_form::{AdminFormScreen, FormMode};
pub use browser::BrowserScreen;
