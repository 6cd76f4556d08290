use std::collections::HashMap;

use spotstats::config::{
    Config, ConfigError, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_REDIRECT_URI,
};
use spotstats::spotify::auth::login_url;

fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "client123")]).unwrap();

    assert_eq!(config.client_id, "client123");
    assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(
        config.scopes,
        vec!["user-read-private", "user-read-email", "user-top-read"]
    );
    assert_eq!(config.server_addr.to_string(), "127.0.0.1:3000");
}

#[test]
fn test_config_overrides() {
    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
        ("SPOTIFY_API_AUTH_SCOPE", "  user-top-read   user-read-private "),
        ("SPOTIFY_API_URL", "http://localhost:9999/v1"),
        ("SERVER_ADDRESS", "127.0.0.1:8888"),
    ])
    .unwrap();

    assert_eq!(config.redirect_uri, "http://127.0.0.1:8888/callback");
    assert_eq!(config.scopes, vec!["user-top-read", "user-read-private"]);
    assert_eq!(config.api_url, "http://localhost:9999/v1");
    assert_eq!(config.server_addr.port(), 8888);
}

#[test]
fn test_config_requires_client_id() {
    assert!(matches!(
        config_from(&[]),
        Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
    ));
    assert!(matches!(
        config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "   ")]),
        Err(ConfigError::Missing(_))
    ));
}

#[test]
fn test_config_rejects_bad_server_address() {
    let result = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SERVER_ADDRESS", "localhost"),
    ]);
    assert!(matches!(result, Err(ConfigError::InvalidAddress(_))));
}

#[test]
fn test_server_address_follows_redirect_uri() {
    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "http://localhost:8888/callback"),
    ])
    .unwrap();
    assert_eq!(config.server_addr.to_string(), "127.0.0.1:8888");
    assert_eq!(config.callback_origin(), "http://localhost:8888");

    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "http://[::1]:4000/callback"),
    ])
    .unwrap();
    assert_eq!(config.server_addr.to_string(), "[::1]:4000");
}

#[test]
fn test_server_address_must_match_redirect_port() {
    let result = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:3000/callback"),
        ("SERVER_ADDRESS", "127.0.0.1:4000"),
    ]);
    assert!(matches!(
        result,
        Err(ConfigError::AddressMismatch { server_addr, .. }) if server_addr.port() == 4000
    ));

    // Binding every interface on the right port is fine
    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SERVER_ADDRESS", "0.0.0.0:3000"),
    ])
    .unwrap();
    assert_eq!(config.server_addr.to_string(), "0.0.0.0:3000");
}

#[test]
fn test_redirect_uri_must_reach_callback_server() {
    let wrong_path = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:3000/auth"),
    ]);
    assert!(matches!(wrong_path, Err(ConfigError::InvalidRedirectUri(_))));

    let not_a_url = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "127.0.0.1:3000/callback"),
    ]);
    assert!(matches!(not_a_url, Err(ConfigError::InvalidRedirectUri(_))));

    let remote_host = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client123"),
        ("SPOTIFY_API_REDIRECT_URI", "https://spotstats.example.com/callback"),
    ]);
    assert!(matches!(remote_host, Err(ConfigError::InvalidAddress(_))));
}

#[test]
fn test_callback_origin_defaults() {
    let config = config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "client123")]).unwrap();
    assert_eq!(config.callback_origin(), "http://127.0.0.1:3000");
}

#[test]
fn test_login_url_from_config() {
    let config = config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "client123")]).unwrap();

    assert_eq!(
        login_url(&config),
        "https://accounts.spotify.com/authorize\
         ?client_id=client123\
         &redirect_uri=http%3A%2F%2F127.0.0.1%3A3000%2Fcallback\
         &response_type=token\
         &scope=user-read-private%20user-read-email%20user-top-read"
    );
}
