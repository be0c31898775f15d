// Blob service client.
//
// Blobs are stored at caller-chosen paths (the caller is responsible for
// collision resistance) and addressed for deletion by the durable URL the
// upload returned.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::documents::{handle_empty, handle_response, normalize_base_url};
use crate::transport::TransportConfig;

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// Async client for the hosted blob service.
pub struct BlobClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BlobClient {
    /// Build from a blob service base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Store bytes at `path` and return the durable retrieval URL.
    ///
    /// The path lands under `/v1/blobs/`; slashes in `path` are preserved
    /// so callers can namespace by drone id and content kind.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, Error> {
        let url = self.base_url.join(&format!("blobs/{path}"))?;
        debug!("PUT {url} ({} bytes)", bytes.len());

        let mut req = self.http.put(url).body(bytes);
        if let Some(ct) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, ct);
        }

        let resp = req.send().await?;
        let body: UploadResponse = handle_response(resp).await?;
        Ok(body.url)
    }

    /// Delete a blob by the URL `upload` returned.
    ///
    /// The store reports 404 for a blob that is already gone; the caller
    /// decides whether that matters.
    pub async fn delete(&self, blob_url: &str) -> Result<(), Error> {
        let url = self.base_url.join("blobs")?;
        debug!("DELETE {url} url={blob_url}");

        let resp = self
            .http
            .delete(url)
            .query(&[("url", blob_url)])
            .send()
            .await?;
        handle_empty(resp).await
    }
}
