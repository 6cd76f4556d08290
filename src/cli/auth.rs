use crate::{
    config::Config,
    info,
    management::{SessionManager, Storage},
    spotify, success,
    types::CallbackLocation,
    warning,
};

/// Logs in unless a session already exists.
///
/// With `callback_url` the token is taken from the fragment of that pasted
/// redirect URL; otherwise the browser flow with the local callback server
/// is used.
pub async fn auth<S: Storage>(
    config: &Config,
    session: &mut SessionManager<S>,
    callback_url: Option<String>,
    open_browser: bool,
) {
    if session.is_logged_in() {
        info!("Already logged in. Run spotstats logout first to switch accounts.");
        return;
    }

    let token = match callback_url {
        Some(url) => {
            let mut location = CallbackLocation::from_url(&url);
            session.resolve_token(&mut location).await
        }
        None => spotify::auth::login(config, session, open_browser).await,
    };

    match token {
        Some(_) => success!("Authentication successful!"),
        None => warning!("Authentication failed or timed out."),
    }
}

pub fn login_url(config: &Config) {
    println!("{}", spotify::auth::login_url(config));
}

pub async fn logout<S: Storage>(session: &mut SessionManager<S>) {
    let was_logged_in = session.is_logged_in();
    if let Err(e) = session.logout().await {
        warning!("Failed to remove stored token: {}", e);
        return;
    }

    if was_logged_in {
        success!("Logged out.");
    } else {
        info!("Not logged in.");
    }
}
