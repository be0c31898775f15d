// ── Admin mutation flow ──
//
// Form state capturing create/edit intent, plus the orchestration of file
// upload, document write, and cleanup on delete. Confirmation prompts and
// success/failure notifications belong to the surfaces (CLI / TUI); this
// module returns Results and never blocks on user input.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::model::{ContentItem, ContentKind, ContentPatch, Locale, LocalizedText, NewContentItem};
use crate::repository::ContentRepository;

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Form state for the add/edit dialog.
///
/// `kind` is fixed when the form is opened; editing never changes an
/// item's kind. `file` is optional on edit (keep the existing upload) and
/// on create (an item may exist before its first upload completes).
#[derive(Debug, Clone, Default)]
pub struct ContentForm {
    pub title: String,
    pub title_uk: String,
    pub description: String,
    pub description_uk: String,
    pub kind: ContentKind,
    pub file: Option<FileAttachment>,
}

impl ContentForm {
    /// Blank form for creating an item of the given kind.
    pub fn for_new(kind: ContentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing item.
    pub fn for_edit(item: &ContentItem) -> Self {
        Self {
            title: item.title.resolve(Locale::En).to_owned(),
            title_uk: item.title.get(Locale::Uk).unwrap_or_default().to_owned(),
            description: item
                .description
                .as_ref()
                .map(|d| d.resolve(Locale::En).to_owned())
                .unwrap_or_default(),
            description_uk: item
                .description
                .as_ref()
                .and_then(|d| d.get(Locale::Uk))
                .unwrap_or_default()
                .to_owned(),
            kind: item.kind,
            file: None,
        }
    }

    /// Presence check on the required fields. Runs before any I/O.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title is required"));
        }
        Ok(())
    }

    fn localized_title(&self) -> LocalizedText {
        // The Ukrainian title defaults to the English one when left blank.
        LocalizedText::new(self.title.clone()).with(Locale::Uk, self.title_uk.clone())
    }

    fn localized_description(&self) -> Option<LocalizedText> {
        let text = LocalizedText::default()
            .with(Locale::En, self.description.clone())
            .with(Locale::Uk, self.description_uk.clone());
        (!text.is_empty()).then_some(text)
    }
}

/// `max(order in partition) + 1` over the currently loaded content.
///
/// Computed client-side from a possibly stale local copy: two admins
/// creating concurrently can race and produce duplicate order values.
/// Accepted limitation for the single-operator deployment.
pub fn next_order(items: &[ContentItem], kind: ContentKind) -> i64 {
    items
        .iter()
        .filter(|i| i.kind == kind)
        .map(|i| i.order)
        .max()
        .unwrap_or(0)
        + 1
}

/// Collision-resistant blob path: `{drone}/{kind_plural}/{millis}_{filename}`.
pub fn upload_path(drone_id: &str, kind: ContentKind, filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "{drone_id}/{}/{}_{filename}",
        kind.plural(),
        at.timestamp_millis()
    )
}

/// Advisory extension check for the upload dialog. The store never
/// enforces or re-validates this.
pub fn matches_accepted_extension(kind: ContentKind, filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            kind.accepted_extensions().contains(&ext.as_str())
        })
}

/// Orchestrates create, edit, and delete against the repository.
pub struct AdminFlow {
    repo: Arc<ContentRepository>,
}

impl AdminFlow {
    pub fn new(repo: Arc<ContentRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<ContentRepository> {
        &self.repo
    }

    /// Create path: validate, compute order from the loaded partition,
    /// upload first when a file is attached, then persist the document.
    ///
    /// Returns the generated id. On success the caller closes the form and
    /// invalidates its sync; on failure the form stays open for retry. If
    /// the upload succeeds and the document write then fails, the uploaded
    /// blob is left behind (accepted gap -- orphaned blobs are non-fatal).
    pub async fn submit_new(
        &self,
        drone_id: &str,
        form: &ContentForm,
        loaded: &[ContentItem],
    ) -> Result<String, CoreError> {
        form.validate()?;

        let order = next_order(loaded, form.kind);

        let mut file_url = String::new();
        if let Some(file) = &form.file {
            let path = upload_path(drone_id, form.kind, &file.filename, Utc::now());
            file_url = self
                .repo
                .upload_file(&path, file.bytes.clone(), file.content_type.as_deref())
                .await?;
        }

        let item = NewContentItem {
            drone_id: drone_id.to_owned(),
            kind: form.kind,
            title: form.localized_title(),
            description: form.localized_description(),
            file_url,
            thumbnail_url: None,
            order,
        };

        self.repo.add_content_item(&item).await
    }

    /// Edit path: optional file replacement, then persist only the
    /// descriptive fields (plus `file_url` when replaced).
    pub async fn submit_edit(&self, item: &ContentItem, form: &ContentForm) -> Result<(), CoreError> {
        form.validate()?;

        let mut patch = ContentPatch {
            title: Some(form.localized_title()),
            description: form.localized_description(),
            ..ContentPatch::default()
        };

        if let Some(file) = &form.file {
            let path = upload_path(&item.drone_id, item.kind, &file.filename, Utc::now());
            patch.file_url = Some(
                self.repo
                    .upload_file(&path, file.bytes.clone(), file.content_type.as_deref())
                    .await?,
            );
        }

        self.repo.update_content_item(&item.id, &patch).await
    }

    /// Delete path: best-effort blob delete (failure swallowed and
    /// logged), then the document. The surface gates this behind a
    /// blocking confirmation prompt.
    pub async fn delete(&self, item: &ContentItem) -> Result<(), CoreError> {
        if !item.file_url.is_empty() {
            self.repo.delete_file(&item.file_url).await;
        }
        self.repo.delete_content_item(&item.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{AdminCredentials, StoreConfig};

    fn item(id: &str, kind: ContentKind, order: i64) -> ContentItem {
        ContentItem {
            id: id.to_owned(),
            drone_id: "krok".to_owned(),
            kind,
            title: LocalizedText::new(id),
            description: None,
            file_url: String::new(),
            thumbnail_url: None,
            order,
            created_at: Utc::now(),
        }
    }

    fn flow(url: &str) -> AdminFlow {
        let config = StoreConfig {
            api_url: url.parse().unwrap(),
            blob_url: None,
            auth: AdminCredentials::Anonymous,
            timeout: Duration::from_secs(5),
            locale: Locale::En,
        };
        AdminFlow::new(Arc::new(
            ContentRepository::with_token(&config, None).unwrap(),
        ))
    }

    #[test]
    fn next_order_is_partition_max_plus_one() {
        let items = vec![
            item("p1", ContentKind::Photo, 1),
            item("p2", ContentKind::Photo, 2),
            item("p3", ContentKind::Photo, 3),
            item("v1", ContentKind::Video, 9),
        ];
        assert_eq!(next_order(&items, ContentKind::Photo), 4);
        assert_eq!(next_order(&items, ContentKind::Video), 10);
        assert_eq!(next_order(&items, ContentKind::Specification), 1);
    }

    #[test]
    fn upload_path_embeds_drone_kind_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(
            upload_path("krok", ContentKind::Photo, "hero.jpg", at),
            format!("krok/photos/{}_hero.jpg", at.timestamp_millis())
        );
    }

    #[test]
    fn extension_filter_is_per_kind() {
        assert!(matches_accepted_extension(ContentKind::Photo, "a.JPG"));
        assert!(matches_accepted_extension(ContentKind::Video, "clip.mp4"));
        assert!(matches_accepted_extension(
            ContentKind::Specification,
            "manual.pdf"
        ));
        assert!(!matches_accepted_extension(ContentKind::Photo, "clip.mp4"));
        assert!(!matches_accepted_extension(ContentKind::Specification, "x"));
    }

    #[tokio::test]
    async fn empty_title_blocks_submit_before_any_io() {
        // Unroutable address: if validation let the submit through, the
        // request would fail with a Fetch error instead of Validation.
        let flow = flow("http://127.0.0.1:1");
        let form = ContentForm::for_new(ContentKind::Photo);

        let err = flow.submit_new("krok", &form, &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[tokio::test]
    async fn create_without_file_persists_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/content"))
            .and(body_partial_json(json!({
                "droneId": "krok",
                "type": "photo",
                "title": "Hero shot",
                "titleUk": "Hero shot",
                "order": 4,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "new-1" })))
            .mount(&server)
            .await;

        let flow = flow(&server.uri());
        let loaded = vec![
            item("p1", ContentKind::Photo, 1),
            item("p2", ContentKind::Photo, 2),
            item("p3", ContentKind::Photo, 3),
        ];
        let form = ContentForm {
            title: "Hero shot".into(),
            ..ContentForm::for_new(ContentKind::Photo)
        };

        let id = flow.submit_new("krok", &form, &loaded).await.unwrap();
        assert_eq!(id, "new-1");
    }

    #[tokio::test]
    async fn create_with_file_uploads_first_and_stores_url() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "url": "https://blobs.example/krok/photos/x.jpg" })),
            )
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/content"))
            .and(body_partial_json(
                json!({ "fileUrl": "https://blobs.example/krok/photos/x.jpg" }),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "new-2" })))
            .mount(&server)
            .await;

        let flow = flow(&server.uri());
        let form = ContentForm {
            title: "With file".into(),
            file: Some(FileAttachment {
                filename: "x.jpg".into(),
                bytes: vec![1, 2, 3],
                content_type: Some("image/jpeg".into()),
            }),
            ..ContentForm::for_new(ContentKind::Photo)
        };

        let id = flow.submit_new("krok", &form, &[]).await.unwrap();
        assert_eq!(id, "new-2");
    }

    #[tokio::test]
    async fn edit_without_file_keeps_existing_url() {
        let server = MockServer::start().await;

        // The patch body must not contain fileUrl at all.
        Mock::given(method("PATCH"))
            .and(path("/v1/content/c1"))
            .and(body_partial_json(json!({ "title": "Renamed" })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let flow = flow(&server.uri());
        let mut existing = item("c1", ContentKind::Photo, 1);
        existing.file_url = "https://blobs.example/keep.jpg".into();

        let form = ContentForm {
            title: "Renamed".into(),
            ..ContentForm::for_edit(&existing)
        };

        flow.submit_edit(&existing, &form).await.unwrap();

        // One PATCH, zero uploads.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("fileUrl").is_none());
    }

    #[tokio::test]
    async fn delete_with_dangling_blob_still_removes_document() {
        let server = MockServer::start().await;

        // The blob is already gone.
        Mock::given(method("DELETE"))
            .and(path("/v1/blobs"))
            .and(query_param("url", "https://blobs.example/gone.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1/content/c9"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let flow = flow(&server.uri());
        let mut doomed = item("c9", ContentKind::Photo, 1);
        doomed.file_url = "https://blobs.example/gone.jpg".into();

        flow.delete(&doomed).await.unwrap();
    }

    #[tokio::test]
    async fn deleting_already_deleted_item_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/content/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let flow = flow(&server.uri());
        let ghost = item("ghost", ContentKind::Photo, 1);
        flow.delete(&ghost).await.unwrap();
    }
}
