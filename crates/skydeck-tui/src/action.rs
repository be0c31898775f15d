//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use skydeck_core::{ContentItem, ContentKind, DroneModel, SyncSnapshot, ViewerTab};

/// Notification severity level.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }
}

/// Pending confirmation action. The dialog blocks until acknowledged.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteItem(Box<ContentItem>),
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteItem(item) => {
                write!(
                    f,
                    "Delete {} '{}'? This also removes its file.",
                    item.kind,
                    item.title.resolve(skydeck_core::Locale::En)
                )
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Drone selection ────────────────────────────────────────────
    SelectDrone(usize),
    CatalogLoaded(Vec<DroneModel>),

    // ── Data events (from the content sync) ────────────────────────
    SyncUpdated(SyncSnapshot),
    Refresh,

    // ── Viewer ─────────────────────────────────────────────────────
    SwitchTab(ViewerTab),
    NextTab,
    PrevTab,
    OpenLightbox(usize),
    CloseLightbox,
    NextPhoto,
    PrevPhoto,
    ToggleLanguage,

    // ── Admin form ─────────────────────────────────────────────────
    OpenAddForm(ContentKind),
    OpenEditForm(Box<ContentItem>),
    CloseForm,
    SubmitForm,
    /// A spawned mutation task finished: `Ok` carries the success toast
    /// text, `Err` the failure message (the form stays open on failure).
    MutationFinished(Result<String, String>),

    // ── Confirm dialog ─────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications / help ───────────────────────────────────────
    Notify(Notification),
    DismissNotification,
    ToggleHelp,
}
