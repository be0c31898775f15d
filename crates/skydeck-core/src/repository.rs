// ── Content repository ──
//
// Query/mutate functions translating between the typed domain model and
// the store's untyped documents. Owns the sorting contract: the store is
// not required to return ordered results, so every list is sorted
// client-side (stable, ascending by `order`).

use secrecy::SecretString;
use tracing::{debug, warn};

use skydeck_api::{AuthClient, BlobClient, DocumentClient, TransportConfig};

use crate::config::{AdminCredentials, StoreConfig};
use crate::convert;
use crate::error::CoreError;
use crate::model::{
    ContentItem, ContentKind, ContentPatch, DroneModel, DronePatch, NewContentItem, NewDroneModel,
};

const CONTENT_COLLECTION: &str = "content";
const DRONE_COLLECTION: &str = "droneModels";

/// Typed access to the hosted content store.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct ContentRepository {
    docs: DocumentClient,
    blobs: BlobClient,
}

impl ContentRepository {
    /// Build a repository from config, resolving credentials first.
    ///
    /// `Credentials` performs an email/password sign-in and threads the
    /// obtained session token through every subsequent request. `Token`
    /// and `Anonymous` skip the identity round trip.
    pub async fn connect(config: &StoreConfig) -> Result<Self, CoreError> {
        let token = match &config.auth {
            AdminCredentials::Anonymous => None,
            AdminCredentials::Token(token) => Some(token.clone()),
            AdminCredentials::Credentials { email, password } => {
                Some(Self::sign_in(config, email, password).await?)
            }
        };

        Self::with_token(config, token)
    }

    /// Email/password sign-in against the store's identity endpoint.
    /// Returns the session token for reuse (keyring, env).
    pub async fn sign_in(
        config: &StoreConfig,
        email: &str,
        password: &SecretString,
    ) -> Result<SecretString, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            token: None,
        };
        let auth = AuthClient::new(config.api_url.as_str(), &transport)?;
        let session = auth.sign_in(email, password).await?;
        debug!(email = %session.email, "signed in");
        Ok(session.token)
    }

    /// Invalidate a session token server-side. Best-effort: a token that
    /// is already invalid is not an error worth surfacing.
    pub async fn sign_out(config: &StoreConfig, token: &SecretString) {
        let transport = TransportConfig {
            timeout: config.timeout,
            token: None,
        };
        match AuthClient::new(config.api_url.as_str(), &transport) {
            Ok(auth) => {
                if let Err(e) = auth.sign_out(token).await {
                    debug!(error = %e, "sign-out failed (non-fatal)");
                }
            }
            Err(e) => debug!(error = %e, "sign-out skipped"),
        }
    }

    /// Build a repository with an already-resolved token (or none).
    pub fn with_token(
        config: &StoreConfig,
        token: Option<SecretString>,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            token,
        };
        Ok(Self {
            docs: DocumentClient::new(config.api_url.as_str(), &transport)?,
            blobs: BlobClient::new(config.blob_url().as_str(), &transport)?,
        })
    }

    // ── Content reads ────────────────────────────────────────────────

    /// List content for a drone, optionally filtered to one kind,
    /// sorted ascending by `order`.
    ///
    /// The sort is stable, so items with equal `order` keep their fetch
    /// order -- repeated calls on unchanged data return the same sequence.
    pub async fn list_content(
        &self,
        drone_id: &str,
        kind: Option<ContentKind>,
    ) -> Result<Vec<ContentItem>, CoreError> {
        let kind_str = kind.map(|k| k.to_string());
        let mut filters = vec![("droneId", drone_id)];
        if let Some(ref k) = kind_str {
            filters.push(("type", k.as_str()));
        }

        let docs = self.docs.query(CONTENT_COLLECTION, &filters).await?;
        let mut items: Vec<ContentItem> =
            docs.into_iter().map(convert::content_from_document).collect();
        items.sort_by_key(|item| item.order);
        Ok(items)
    }

    // ── Content mutations ────────────────────────────────────────────

    /// Create a content item; the store assigns `id` and `createdAt`.
    /// Returns the generated id.
    pub async fn add_content_item(&self, item: &NewContentItem) -> Result<String, CoreError> {
        let id = self
            .docs
            .create(CONTENT_COLLECTION, &convert::content_fields(item))
            .await?;
        debug!(%id, drone = %item.drone_id, kind = %item.kind, "content item created");
        Ok(id)
    }

    /// Merge the supplied fields into an existing item.
    pub async fn update_content_item(
        &self,
        id: &str,
        patch: &ContentPatch,
    ) -> Result<(), CoreError> {
        match self
            .docs
            .patch(CONTENT_COLLECTION, id, &convert::content_patch_fields(patch))
            .await
        {
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                resource: "content item",
                id: id.to_owned(),
            }),
            other => other.map_err(CoreError::from),
        }
    }

    /// Delete a content item. Idempotent: deleting an id that is already
    /// gone succeeds.
    pub async fn delete_content_item(&self, id: &str) -> Result<(), CoreError> {
        match self.docs.delete(CONTENT_COLLECTION, id).await {
            Err(e) if e.is_not_found() => {
                debug!(%id, "content item already gone");
                Ok(())
            }
            other => other.map_err(CoreError::from),
        }
    }

    // ── Blob storage ─────────────────────────────────────────────────

    /// Store bytes at `path` and return the durable URL for `file_url`.
    ///
    /// The caller chooses the path and is responsible for collision
    /// resistance (see [`crate::admin::upload_path`]).
    pub async fn upload_file(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, CoreError> {
        self.blobs
            .upload(path, bytes, content_type)
            .await
            .map_err(|e| CoreError::Upload {
                message: e.to_string(),
            })
    }

    /// Best-effort blob delete. Failures (including a blob that never
    /// existed) are logged and swallowed so a missing file never blocks
    /// removal of its metadata record.
    pub async fn delete_file(&self, url: &str) {
        if let Err(e) = self.blobs.delete(url).await {
            warn!(error = %e, %url, "blob delete failed (non-fatal)");
        }
    }

    // ── Drone catalog ────────────────────────────────────────────────

    /// List the drone catalog, sorted ascending by `order`.
    pub async fn list_drone_models(&self) -> Result<Vec<DroneModel>, CoreError> {
        let docs = self.docs.query(DRONE_COLLECTION, &[]).await?;
        let mut models: Vec<DroneModel> =
            docs.into_iter().map(convert::drone_from_document).collect();
        models.sort_by_key(|m| m.order);
        Ok(models)
    }

    pub async fn add_drone_model(&self, model: &NewDroneModel) -> Result<String, CoreError> {
        let id = self
            .docs
            .create(DRONE_COLLECTION, &convert::drone_fields(model))
            .await?;
        debug!(%id, slug = %model.slug, "drone model created");
        Ok(id)
    }

    pub async fn update_drone_model(&self, id: &str, patch: &DronePatch) -> Result<(), CoreError> {
        match self
            .docs
            .patch(DRONE_COLLECTION, id, &convert::drone_patch_fields(patch))
            .await
        {
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                resource: "drone model",
                id: id.to_owned(),
            }),
            other => other.map_err(CoreError::from),
        }
    }

    pub async fn delete_drone_model(&self, id: &str) -> Result<(), CoreError> {
        match self.docs.delete(DRONE_COLLECTION, id).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other.map_err(CoreError::from),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::model::Locale;

    fn repo(url: &str) -> ContentRepository {
        let config = StoreConfig {
            api_url: url.parse().unwrap(),
            blob_url: None,
            auth: AdminCredentials::Anonymous,
            timeout: Duration::from_secs(5),
            locale: Locale::En,
        };
        ContentRepository::with_token(&config, None).unwrap()
    }

    #[tokio::test]
    async fn update_missing_item_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/content/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = repo(&server.uri())
            .update_content_item("ghost", &ContentPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound {
                resource: "content item",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn delete_missing_item_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/content/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        repo(&server.uri()).delete_content_item("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn failed_blob_delete_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/blobs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // Logged, never propagated.
        repo(&server.uri())
            .delete_file("https://blobs.example/gone.jpg")
            .await;
    }

    #[tokio::test]
    async fn drone_catalog_is_sorted_by_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/droneModels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [
                    { "id": "b", "name": "B", "slug": "b", "order": 2 },
                    { "id": "a", "name": "A", "slug": "a", "order": 1 },
                ]
            })))
            .mount(&server)
            .await;

        let models = repo(&server.uri()).list_drone_models().await.unwrap();
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
