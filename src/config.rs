//! Configuration management for spotstats.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Everything except the client ID has a
//! default matching the public Spotify endpoints and a loopback redirect.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use reqwest::Url;
use thiserror::Error;

use crate::warning;

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:3000/callback";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Path the callback server answers on; the redirect URI has to point at it.
pub const CALLBACK_PATH: &str = "/callback";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    #[error("invalid redirect URI: {0}")]
    InvalidRedirectUri(String),

    #[error("SERVER_ADDRESS {server_addr} does not listen on the port of redirect URI {redirect_uri}")]
    AddressMismatch {
        server_addr: SocketAddr,
        redirect_uri: String,
    },

    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Runtime configuration for the login flow and the Web API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated like unset ones. Without `SERVER_ADDRESS` the
    /// callback server binds to the host and port of the redirect URI, with
    /// `localhost` meaning `127.0.0.1`.
    ///
    /// # Errors
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID` is unset or empty
    /// - the redirect URI does not parse or its path is not [`CALLBACK_PATH`]
    /// - `SERVER_ADDRESS` is not a socket address, or listens on another port
    ///   than the redirect URI names, so the browser could never reach it
    /// - `SERVER_ADDRESS` is unset and the redirect host is not an IP address
    ///   or `localhost`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = get("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let redirect_uri =
            get("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let redirect = Url::parse(&redirect_uri)
            .map_err(|e| ConfigError::InvalidRedirectUri(format!("{redirect_uri}: {e}")))?;
        if redirect.path() != CALLBACK_PATH {
            return Err(ConfigError::InvalidRedirectUri(format!(
                "{redirect_uri}: path must be {CALLBACK_PATH}"
            )));
        }

        let server_addr = match get("SERVER_ADDRESS") {
            Some(raw) => {
                let addr = SocketAddr::from_str(&raw)
                    .map_err(|e| ConfigError::InvalidAddress(format!("{raw}: {e}")))?;
                if redirect.port_or_known_default() != Some(addr.port()) {
                    return Err(ConfigError::AddressMismatch {
                        server_addr: addr,
                        redirect_uri,
                    });
                }
                addr
            }
            None => redirect_socket_addr(&redirect)?,
        };

        let scopes = get("SPOTIFY_API_AUTH_SCOPE")
            .unwrap_or_else(|| DEFAULT_SCOPE.to_string())
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(Self {
            client_id,
            redirect_uri,
            scopes,
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_addr,
        })
    }

    /// Origin the browser reports for the callback page, e.g.
    /// `http://127.0.0.1:3000`.
    pub fn callback_origin(&self) -> String {
        Url::parse(&self.redirect_uri)
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|_| format!("http://{}", self.server_addr))
    }
}

fn redirect_socket_addr(redirect: &Url) -> Result<SocketAddr, ConfigError> {
    let invalid = || {
        ConfigError::InvalidAddress(format!(
            "cannot listen on the host of {redirect}, set SERVER_ADDRESS"
        ))
    };

    let ip = match redirect.host_str() {
        Some("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
        Some(host) => IpAddr::from_str(host.trim_start_matches('[').trim_end_matches(']'))
            .map_err(|_| invalid())?,
        None => return Err(invalid()),
    };
    let port = redirect.port_or_known_default().ok_or_else(invalid)?;

    Ok(SocketAddr::new(ip, port))
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates `spotstats/` under the platform data directory if needed. A missing
/// `.env` file is fine: the values may come from the real environment instead.
///
/// - Linux: `~/.local/share/spotstats/.env`
/// - macOS: `~/Library/Application Support/spotstats/.env`
/// - Windows: `%LOCALAPPDATA%/spotstats/.env`
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        // variables already present in the environment win over the file
        if let Err(e) = dotenv::from_path(&path) {
            warning!("Cannot parse {}: {}", path.display(), e);
        }
    }
    Ok(())
}

/// Root directory for everything spotstats keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotstats");
    path
}
