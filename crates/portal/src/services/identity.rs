//! Client for the hosted identity service.
//!
//! The portal does not store passwords. Sign-in is delegated to the
//! company identity service, which verifies the credentials and
//! returns the canonical profile (email, display name, role). The
//! portal then mirrors that profile into its own staff table.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::IdentityConfig;

/// Errors that can occur when talking to the identity service.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity service rejected the credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// API returned an unexpected error response.
    #[error("identity service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to construct the client.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Canonical profile returned by the identity service on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProfile {
    /// Stable subject identifier within the identity service.
    pub subject: String,
    /// Verified email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Assigned role, as the identity service reports it (free-form).
    pub role: String,
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    profile: IdentityProfile,
}

/// Identity service API client.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity service client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| IdentityError::Config(format!("invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Verify credentials and fetch the canonical profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when the service
    /// rejects the email/password pair, or another variant for
    /// transport and protocol failures.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityProfile, IdentityError> {
        let url = format!("{}/v1/sessions", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&SignInRequest { email, password })
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(IdentityError::InvalidCredentials);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SignInResponse = response.json().await?;
        Ok(body.profile)
    }

    /// Revoke a session at the identity service. Best effort: the
    /// local session is destroyed regardless, so failures are only
    /// logged by the caller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service responds with
    /// a non-success status.
    pub async fn revoke(&self, subject: &str) -> Result<(), IdentityError> {
        let url = format!("{}/v1/sessions/{subject}", self.base_url);

        let response = self.client.delete(&url).send().await?;
        let status = response.status();

        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
