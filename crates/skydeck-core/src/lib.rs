//! Reactive data layer between `skydeck-api` and the UI surfaces (CLI / TUI).
//!
//! This crate owns the domain model, the business logic, and the reactive
//! synchronization infrastructure for the Skydeck workspace:
//!
//! - **[`ContentRepository`]** — Typed query/mutate facade over the store's
//!   untyped documents. Owns the sorting contract (client-side, stable,
//!   ascending by `order`) and the best-effort blob cleanup policy.
//!
//! - **[`ContentSync`]** — Per-selector reactive cache over a
//!   `tokio::sync::watch` channel: `loading → ready | error`, with an
//!   explicit [`invalidate()`](ContentSync::invalidate) and a sequence
//!   guard that discards stale fetch completions.
//!
//! - **[`ContentBrowser`]** — Pure viewer state machine: tab selection,
//!   lightbox navigation over the photo partition, and swipe-gesture
//!   paging. No persistence, no I/O.
//!
//! - **[`AdminFlow`]** — Create/edit/delete orchestration with coordinated
//!   file-storage side effects and form validation that runs before any
//!   I/O is attempted.
//!
//! - **Domain model** ([`model`]) — [`ContentItem`], [`ContentKind`],
//!   [`DroneModel`], and [`LocalizedText`] (locale map with a defined
//!   fallback chain, replacing the store's twin-attribute convention).

pub mod admin;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod repository;
pub mod sync;
pub mod viewer;

// ── Primary re-exports ──────────────────────────────────────────────
pub use admin::{AdminFlow, ContentForm, FileAttachment};
pub use config::{AdminCredentials, StoreConfig};
pub use error::CoreError;
pub use repository::ContentRepository;
pub use sync::{ContentSelector, ContentSync, SyncSnapshot, SyncState};
pub use viewer::{ContentBrowser, SwipeDirection, SwipeTracker, ViewerTab};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ContentItem, ContentKind, ContentPatch, DroneModel, DronePatch, Locale, LocalizedText,
    NewContentItem, NewDroneModel,
};
