// Identity endpoints: email/password sign-in and sign-out.
//
// The content core neither authenticates nor authorizes; this client exists
// so the admin surfaces can obtain a session token to thread through
// `TransportConfig`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::Error;
use crate::documents::{handle_empty, handle_response, normalize_base_url};
use crate::transport::TransportConfig;

/// An authenticated session, as returned by `sign_in`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub email: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    email: String,
}

/// Client for the identity endpoints.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Sign in with email and password, returning a session or failing
    /// with [`Error::Authentication`].
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<Session, Error> {
        let url = self.base_url.join("auth/login")?;
        debug!("POST {url} email={email}");

        let resp = self
            .http
            .post(url)
            .json(&LoginRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let body: LoginResponse = handle_response(resp).await?;
        Ok(Session {
            token: SecretString::from(body.token),
            email: body.email,
        })
    }

    /// Invalidate a session token server-side.
    pub async fn sign_out(&self, token: &SecretString) -> Result<(), Error> {
        let url = self.base_url.join("auth/logout")?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        handle_empty(resp).await
    }
}
