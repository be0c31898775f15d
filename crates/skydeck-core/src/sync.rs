// ── Content synchronization ──
//
// A per-selector cache binding a view to a live query result. Each
// instance owns exactly one `(drone_id, kind)` selector for its lifetime;
// switching selectors means creating a fresh instance (cold fetch).
//
// Fetches are never cancelled. Instead, every issued fetch carries a
// monotonically increasing sequence number and a completion is applied
// only if it is still the most recently issued request -- a slow early
// fetch that resolves after a fast later one is discarded rather than
// overwriting it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::{ContentItem, ContentKind};
use crate::repository::ContentRepository;

/// The cache key: one drone, optionally narrowed to one content kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentSelector {
    pub drone_id: String,
    pub kind: Option<ContentKind>,
}

impl ContentSelector {
    pub fn all(drone_id: impl Into<String>) -> Self {
        Self {
            drone_id: drone_id.into(),
            kind: None,
        }
    }

    pub fn of_kind(drone_id: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            drone_id: drone_id.into(),
            kind: Some(kind),
        }
    }
}

/// Lifecycle state of the cached query result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Loading,
    Ready,
    /// The fetch failed; the message is rendered in place of content.
    Error(String),
}

/// What subscribers observe: the state plus the (sorted) items.
/// Items are empty while loading and after an error.
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    pub state: SyncState,
    pub items: Arc<Vec<ContentItem>>,
}

impl SyncSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == SyncState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SyncState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Reactive cache for one content selector.
///
/// Cheaply cloneable via `Arc` internals: clones share the same snapshot
/// channel and sequence counter.
#[derive(Clone)]
pub struct ContentSync {
    inner: Arc<SyncInner>,
}

struct SyncInner {
    repo: Arc<ContentRepository>,
    selector: ContentSelector,
    /// Sequence of the most recently *issued* fetch. Completions compare
    /// against this and discard themselves when stale.
    seq: AtomicU64,
    snapshot: watch::Sender<SyncSnapshot>,
}

impl ContentSync {
    /// Create the cache and issue the initial fetch.
    ///
    /// An empty `drone_id` short-circuits straight to `Ready` with empty
    /// data -- no network call is made.
    pub fn spawn(repo: Arc<ContentRepository>, selector: ContentSelector) -> Self {
        let (snapshot, _) = watch::channel(SyncSnapshot::default());
        let sync = Self {
            inner: Arc::new(SyncInner {
                repo,
                selector,
                seq: AtomicU64::new(0),
                snapshot,
            }),
        };
        sync.invalidate();
        sync
    }

    pub fn selector(&self) -> &ContentSelector {
        &self.inner.selector
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.inner.snapshot.subscribe()
    }

    /// The current snapshot (cheap clone, items behind an `Arc`).
    pub fn snapshot(&self) -> SyncSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Force a refetch: `ready|error → loading → (ready|error)`.
    ///
    /// Concurrent invalidations are not debounced; each starts its own
    /// fetch and only the most recently issued one may publish.
    pub fn invalidate(&self) {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let this = self.clone();
        tokio::spawn(async move {
            this.inner.run_fetch(seq).await;
        });
    }

    /// Awaitable variant of [`invalidate`](Self::invalidate) for one-shot
    /// consumers: after it returns, the snapshot reflects this fetch
    /// (unless an even newer one was issued meanwhile).
    pub async fn refresh(&self) {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.run_fetch(seq).await;
    }
}

impl SyncInner {
    async fn run_fetch(&self, seq: u64) {
        self.publish_if_current(seq, SyncSnapshot::default());

        let result = if self.selector.drone_id.is_empty() {
            Ok(Vec::new())
        } else {
            self.repo
                .list_content(&self.selector.drone_id, self.selector.kind)
                .await
        };

        let snapshot = match result {
            Ok(items) => SyncSnapshot {
                state: SyncState::Ready,
                items: Arc::new(items),
            },
            Err(e) => {
                warn!(error = %e, drone = %self.selector.drone_id, "content fetch failed");
                SyncSnapshot {
                    state: SyncState::Error(e.to_string()),
                    items: Arc::new(Vec::new()),
                }
            }
        };

        self.publish_if_current(seq, snapshot);
    }

    /// Publish `snapshot` unless a newer fetch has been issued since `seq`.
    fn publish_if_current(&self, seq: u64, snapshot: SyncSnapshot) {
        if self.seq.load(Ordering::SeqCst) == seq {
            self.snapshot.send_replace(snapshot);
        } else {
            debug!(seq, "discarding stale fetch completion");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{AdminCredentials, StoreConfig};
    use crate::model::Locale;

    fn store_config(url: &str) -> StoreConfig {
        StoreConfig {
            api_url: url.parse().unwrap(),
            blob_url: None,
            auth: AdminCredentials::Anonymous,
            timeout: Duration::from_secs(5),
            locale: Locale::En,
        }
    }

    fn repo(url: &str) -> Arc<ContentRepository> {
        Arc::new(ContentRepository::with_token(&store_config(url), None).unwrap())
    }

    fn photo_doc(id: &str, order: i64) -> serde_json::Value {
        json!({
            "id": id,
            "createdAt": "2024-05-01T12:00:00Z",
            "droneId": "krok",
            "type": "photo",
            "title": format!("Photo {id}"),
            "fileUrl": format!("https://blobs.example/{id}.jpg"),
            "order": order,
        })
    }

    async fn wait_until_settled(sync: &ContentSync) -> SyncSnapshot {
        let mut rx = sync.subscribe();
        for _ in 0..50 {
            if !sync.snapshot().is_loading() {
                return sync.snapshot();
            }
            let _ = tokio::time::timeout(Duration::from_millis(100), rx.changed()).await;
        }
        sync.snapshot()
    }

    #[tokio::test]
    async fn empty_drone_id_short_circuits_to_ready() {
        // Unroutable port: any network call would error, proving none is made.
        let repo = repo("http://127.0.0.1:1");
        let sync = ContentSync::spawn(repo, ContentSelector::all(""));

        let snap = wait_until_settled(&sync).await;
        assert_eq!(snap.state, SyncState::Ready);
        assert!(snap.items.is_empty());
    }

    #[tokio::test]
    async fn fetch_sorts_and_reaches_ready() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/content"))
            .and(query_param("droneId", "krok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [photo_doc("a", 2), photo_doc("b", 1), photo_doc("c", 3)]
            })))
            .mount(&server)
            .await;

        let sync = ContentSync::spawn(repo(&server.uri()), ContentSelector::all("krok"));
        let snap = wait_until_settled(&sync).await;

        assert_eq!(snap.state, SyncState::Ready);
        let orders: Vec<i64> = snap.items.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn refresh_matches_fresh_list_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [photo_doc("a", 2), photo_doc("b", 1)]
            })))
            .mount(&server)
            .await;

        let repo = repo(&server.uri());
        let sync = ContentSync::spawn(Arc::clone(&repo), ContentSelector::all("krok"));
        wait_until_settled(&sync).await;

        sync.refresh().await;
        let snap = sync.snapshot();
        let fresh = repo.list_content("krok", None).await.unwrap();

        assert_eq!(snap.state, SyncState::Ready);
        assert_eq!(*snap.items, fresh);
    }

    #[tokio::test]
    async fn error_state_retains_message_and_clears_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "store exploded"
            })))
            .mount(&server)
            .await;

        let sync = ContentSync::spawn(repo(&server.uri()), ContentSelector::all("krok"));
        let snap = wait_until_settled(&sync).await;

        assert!(snap.error().is_some_and(|m| m.contains("store exploded")));
        assert!(snap.items.is_empty());
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let server = MockServer::start().await;

        // First fetch: slow response carrying the OLD data set.
        Mock::given(method("GET"))
            .and(path("/v1/content"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "documents": [photo_doc("old", 1)] }))
                    .set_delay(Duration::from_millis(300)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        // Second fetch: fast response carrying the NEW data set.
        Mock::given(method("GET"))
            .and(path("/v1/content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [photo_doc("new-1", 1), photo_doc("new-2", 2)]
            })))
            .mount(&server)
            .await;

        let sync = ContentSync::spawn(repo(&server.uri()), ContentSelector::all("krok"));
        // Let the first fetch reach the server (it then stalls on the
        // response delay), then issue a second invalidation.
        tokio::time::sleep(Duration::from_millis(100)).await;
        sync.invalidate();

        // Give the slow fetch time to finish after the fast one.
        tokio::time::sleep(Duration::from_millis(600)).await;

        let snap = sync.snapshot();
        assert_eq!(snap.state, SyncState::Ready);
        // The slow, stale completion must not have overwritten the newer one.
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.items[0].id, "new-1");
    }

    #[tokio::test]
    async fn kind_filter_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/content"))
            .and(query_param("droneId", "krok"))
            .and(query_param("type", "video"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [{
                    "id": "v1", "droneId": "krok", "type": "video",
                    "title": "Demo", "fileUrl": "https://blobs.example/v1.mp4", "order": 1
                }]
            })))
            .mount(&server)
            .await;

        let sync = ContentSync::spawn(
            repo(&server.uri()),
            ContentSelector::of_kind("krok", ContentKind::Video),
        );
        let snap = wait_until_settled(&sync).await;

        assert_eq!(snap.state, SyncState::Ready);
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].kind, ContentKind::Video);
    }
}
