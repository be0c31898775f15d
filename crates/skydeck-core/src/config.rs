// ── Store connection configuration ──

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::model::Locale;

/// How the admin surfaces authenticate against the store.
///
/// The public read path works anonymously; mutations require a session.
#[derive(Debug, Clone)]
pub enum AdminCredentials {
    /// Read-only, unauthenticated access.
    Anonymous,
    /// A previously obtained session token.
    Token(SecretString),
    /// Email/password sign-in performed at connect time.
    Credentials {
        email: String,
        password: SecretString,
    },
}

/// Connection settings for the hosted content store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the document + identity service.
    pub api_url: Url,
    /// Base URL of the blob service. Defaults to `api_url` when `None`.
    pub blob_url: Option<Url>,
    pub auth: AdminCredentials,
    pub timeout: Duration,
    /// Preferred display locale for the UI surfaces.
    pub locale: Locale,
}

impl StoreConfig {
    /// The effective blob service base URL.
    pub fn blob_url(&self) -> &Url {
        self.blob_url.as_ref().unwrap_or(&self.api_url)
    }
}
