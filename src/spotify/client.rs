use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;

/// Failures of a single Web API read.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No access token is available; the user has to log in first.
    #[error("not logged in")]
    AuthAbsent,

    /// 401 or 403. The token is invalid or expired and cannot be refreshed.
    #[error("Spotify rejected the access token (HTTP {status})")]
    AuthRejected { status: u16 },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Spotify returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether logging in again could fix this error.
    pub fn needs_login(&self) -> bool {
        matches!(self, ApiError::AuthAbsent | ApiError::AuthRejected { .. })
    }
}

/// Bearer-authenticated reader for the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    base_url: String,
}

impl SpotifyApi {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// A trailing `/` is dropped so request paths can always start with one.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.spotify.com/v1`
    ///
    /// # Example
    ///
    /// ```
    /// let api = SpotifyApi::new("https://api.spotify.com/v1/");
    /// assert_eq!(api.base_url(), "https://api.spotify.com/v1");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for `config.api_url`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    /// API root every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues `GET {base_url}{path}` and decodes the JSON body.
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token; nothing is sent when absent or empty
    /// * `path` - Request path below the base URL, starting with `/`
    /// * `query` - Query parameters, percent-encoded by reqwest
    ///
    /// # Errors
    ///
    /// - [`ApiError::AuthAbsent`] when there is no token
    /// - [`ApiError::AuthRejected`] on 401 or 403
    /// - [`ApiError::Status`] on any other non-success status
    /// - [`ApiError::Network`] when the request or body read fails
    /// - [`ApiError::Malformed`] when the body is not the expected JSON
    ///
    /// # Example
    ///
    /// ```
    /// let me: UserProfile = api.get_json(Some(token), "/me", &[]).await?;
    /// ```
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::AuthAbsent)?;

        let response = self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::AuthRejected {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
