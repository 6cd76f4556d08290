use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config::Config,
    info,
    management::{SessionManager, Storage, build_login_url},
    server::serve,
    types::{CallbackLocation, CallbackOrigin, CallbackSlot},
    warning,
};

/// How long `login` waits for the browser to come back.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Login URL for the configured client, redirect URI and scopes.
pub fn login_url(config: &Config) -> String {
    build_login_url(
        &config.auth_url,
        &config.client_id,
        &config.redirect_uri,
        &config.scopes,
    )
}

/// Runs the implicit-grant login.
///
/// 1. Binds the callback server to `config.server_addr`
/// 2. Prints the login URL and, if `open_browser`, opens it
/// 3. Waits up to [`LOGIN_TIMEOUT`] for the redirect fragment
/// 4. Hands the fragment to the session, which extracts and stores the token
///
/// # Arguments
///
/// * `config` - Client ID, redirect URI, scopes and callback server address
/// * `session` - Session that receives and persists the token
/// * `open_browser` - Whether to launch the default browser on the login URL
///
/// # Returns
///
/// The resolved token, or `None` when the callback server cannot bind or
/// stops, on timeout, or when Spotify denied access. Nothing is printed
/// before the server listens.
pub async fn login<S: Storage>(
    config: &Config,
    session: &mut SessionManager<S>,
    open_browser: bool,
) -> Option<String> {
    let addr = config.server_addr;
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            warning!("Cannot start callback server on {}: {}", addr, e);
            return None;
        }
    };

    let slot: CallbackSlot = Arc::new(Mutex::new(None));
    let origin = CallbackOrigin(config.callback_origin());
    let mut server = tokio::spawn(serve(listener, Arc::clone(&slot), origin));

    let url = login_url(config);
    info!("Log in to Spotify with the following URL:\n{}", url);
    if open_browser && webbrowser::open(&url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }

    let fragment = tokio::select! {
        fragment = wait_for_fragment(slot, LOGIN_TIMEOUT) => fragment,
        stopped = &mut server => {
            match stopped {
                Ok(Err(e)) => warning!("Callback server on {} stopped: {}", addr, e),
                Ok(Ok(())) => warning!("Callback server on {} stopped.", addr),
                Err(e) => warning!("Callback server on {} crashed: {}", addr, e),
            }
            None
        }
    };
    server.abort();

    let mut location = CallbackLocation::new(fragment?);
    session.resolve_token(&mut location).await
}

/// Polls `slot` once a second until the callback server has filled it or
/// `max_wait` has passed.
pub async fn wait_for_fragment(slot: CallbackSlot, max_wait: Duration) -> Option<String> {
    let start = Instant::now();

    loop {
        if let Some(fragment) = slot.lock().await.take() {
            return Some(fragment);
        }
        if start.elapsed() >= max_wait {
            return None;
        }
        tokio::time::sleep(Duration::from_secs(1).min(max_wait)).await;
    }
}
