//! Data bridge — connects core sync/catalog state to TUI actions.
//!
//! Each selected drone gets its own [`ContentSync`] instance (a selector
//! change is a cold fetch, never a cache hit); a watcher task forwards
//! every snapshot change as an [`Action`] until cancelled.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use skydeck_core::{ContentRepository, ContentSync};

use crate::action::Action;

/// Spawn a watcher forwarding snapshot changes from `sync` into the
/// action channel. The initial snapshot is pushed immediately so the
/// screen has state before the first fetch completes.
pub fn spawn_content_watch(
    sync: ContentSync,
    action_tx: UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let mut rx = sync.subscribe();

        let _ = action_tx.send(Action::SyncUpdated(sync.snapshot()));

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = rx.borrow_and_update().clone();
                    if action_tx.send(Action::SyncUpdated(snapshot)).is_err() {
                        break;
                    }
                }
            }
        }

        debug!(drone = %sync.selector().drone_id, "content watch shut down");
    });
}

/// One-shot catalog fetch. The built-in fleet is already on screen; a
/// successful fetch replaces it, a failure just logs.
pub fn spawn_catalog_fetch(repo: Arc<ContentRepository>, action_tx: UnboundedSender<Action>) {
    tokio::spawn(async move {
        match repo.list_drone_models().await {
            Ok(models) if !models.is_empty() => {
                let _ = action_tx.send(Action::CatalogLoaded(models));
            }
            Ok(_) => debug!("drone catalog is empty, keeping built-in fleet"),
            Err(e) => warn!(error = %e, "drone catalog fetch failed, keeping built-in fleet"),
        }
    });
}
