//! Canonical domain types for drone-model content.

mod content;
mod drone;
mod locale;

pub use content::{ContentItem, ContentKind, ContentPatch, NewContentItem};
pub use drone::{DroneModel, DronePatch, NewDroneModel};
pub use locale::{Locale, LocalizedText};
