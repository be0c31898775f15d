// Hand-crafted async HTTP client for the document service.
//
// Base path: /v1/{collection}
// Documents are untyped on the wire: every record carries a store-assigned
// `id`, an optional server-assigned `createdAt`, and arbitrary JSON fields.
// Typed translation lives in skydeck-core's `convert` module.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

// ── Wire shapes ──────────────────────────────────────────────────────

/// One untyped document as returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Store-assigned identifier, immutable.
    pub id: String,
    /// Server-assigned creation timestamp. Absent on legacy records.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Everything else on the record.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct QueryResponse {
    documents: Vec<Document>,
}

#[derive(Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the hosted document service.
///
/// Collections are addressed by name (`content`, `droneModels`); queries
/// are equality filters passed as query parameters. The store does not
/// guarantee any result ordering -- callers sort client-side.
pub struct DocumentClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DocumentClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a store base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The store base URL (always ends with `/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"content"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Query a collection with equality filters, returning raw documents
    /// in whatever order the store produced them.
    pub async fn query(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Document>, Error> {
        let url = self.url(collection)?;
        debug!("GET {url} filters={filters:?}");

        let resp = self.http.get(url).query(filters).send().await?;
        let body: QueryResponse = handle_response(resp).await?;
        Ok(body.documents)
    }

    /// Create a document. The store assigns `id` and `createdAt`; the
    /// generated id is returned.
    pub async fn create(&self, collection: &str, fields: &Value) -> Result<String, Error> {
        let url = self.url(collection)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(fields).send().await?;
        let body: CreateResponse = handle_response(resp).await?;
        Ok(body.id)
    }

    /// Merge the supplied fields into an existing document. Fields not
    /// present in `fields` retain their prior values.
    pub async fn patch(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error> {
        let url = self.url(&format!("{collection}/{id}"))?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(fields).send().await?;
        handle_empty(resp).await
    }

    /// Delete a document by id. The store reports 404 for an id that is
    /// already gone; callers decide whether that matters.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        let url = self.url(&format!("{collection}/{id}"))?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        handle_empty(resp).await
    }
}

// ── Shared response handling ─────────────────────────────────────────

/// Ensure the base URL ends with `/v1/` so relative joins work.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();

    if path.ends_with("/v1") {
        url.set_path(&format!("{path}/"));
    } else {
        url.set_path(&format!("{path}/v1/"));
    }

    Ok(url)
}

pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Authentication {
            message: "session token missing, expired, or invalid".into(),
        };
    }

    let raw = resp.text().await.unwrap_or_default();

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
        Error::Api {
            status: status.as_u16(),
            message: err.message.unwrap_or_else(|| status.to_string()),
            code: err.code,
        }
    } else {
        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() { status.to_string() } else { raw },
            code: None,
        }
    }
}
