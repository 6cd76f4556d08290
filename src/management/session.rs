use crate::{
    management::{Storage, StorageError},
    types::CallbackLocation,
    utils, warning,
};

/// Storage key of the access token.
pub const TOKEN_KEY: &str = "token";

/// Owns the access token and its storage slot.
///
/// A present token is the only signal of being logged in. The token is never
/// refreshed; an expired one surfaces as a rejected API read and the user has
/// to log out and in again.
pub struct SessionManager<S: Storage> {
    storage: S,
    access_token: Option<String>,
}

impl<S: Storage> SessionManager<S> {
    /// Creates a logged-out session backed by `storage`.
    ///
    /// Nothing is read until [`SessionManager::resolve_token`] runs, so a
    /// token already in storage only shows up after that call.
    ///
    /// # Example
    ///
    /// ```
    /// use spotstats::management::{FileStorage, SessionManager};
    ///
    /// let mut session = SessionManager::new(FileStorage::default_location());
    /// ```
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            access_token: None,
        }
    }

    /// Resolves the token from storage or, failing that, from the redirect
    /// fragment in `location`.
    ///
    /// The sources are tried in order:
    /// 1. The storage slot under [`TOKEN_KEY`]
    /// 2. The token already held in memory
    /// 3. The `access_token` component of the fragment
    ///
    /// A stored token is returned unchanged and the fragment is left alone.
    /// A token found in the fragment is persisted and the fragment cleared.
    ///
    /// # Arguments
    ///
    /// * `location` - Callback location whose fragment may carry a new token
    ///
    /// # Returns
    ///
    /// The token, or `None` when no source has one, which callers treat as
    /// "not logged in yet". Storage failures are reported as warnings only;
    /// a fragment token then lives in memory until the process exits.
    ///
    /// # Example
    ///
    /// ```
    /// let mut location = CallbackLocation::new("access_token=abc&token_type=Bearer");
    /// let token = session.resolve_token(&mut location).await;
    /// assert_eq!(token.as_deref(), Some("abc"));
    /// assert!(location.is_empty());
    /// ```
    pub async fn resolve_token(&mut self, location: &mut CallbackLocation) -> Option<String> {
        let stored = match self.storage.get_item(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warning!("Cannot read stored session: {}", e);
                None
            }
        };

        if let Some(token) = stored.or_else(|| self.access_token.clone()) {
            self.access_token = Some(token.clone());
            return Some(token);
        }

        let Some(token) = extract_access_token(location.fragment()) else {
            if let Some(error) = utils::fragment_value(location.fragment(), "error") {
                warning!("Spotify did not grant access: {}", error);
            }
            return None;
        };

        if let Err(e) = self.storage.set_item(TOKEN_KEY, &token).await {
            warning!("Cannot persist session, it lasts until exit: {}", e);
        }
        location.clear();
        self.access_token = Some(token.clone());
        Some(token)
    }

    /// Forgets the token in memory and in storage. Safe to call when logged out.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the slot cannot be removed. The
    /// in-memory token is gone either way.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.access_token = None;
        self.storage.remove_item(TOKEN_KEY).await
    }

    /// Token held since the last successful [`SessionManager::resolve_token`].
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    /// Backing storage, mostly for inspection.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Pulls a non-empty `access_token` value out of a redirect fragment.
///
/// # Example
///
/// ```
/// assert_eq!(extract_access_token("access_token=abc&expires_in=3600").as_deref(), Some("abc"));
/// assert_eq!(extract_access_token("error=access_denied"), None);
/// assert_eq!(extract_access_token("access_token="), None);
/// ```
pub fn extract_access_token(fragment: &str) -> Option<String> {
    utils::fragment_value(fragment, "access_token").filter(|token| !token.is_empty())
}

/// Builds the implicit-grant authorization URL the user opens to log in.
///
/// The query carries `client_id`, `redirect_uri`, `response_type=token` and
/// the space-joined `scope`, each percent-encoded. No request is made.
///
/// # Arguments
///
/// * `auth_url` - Authorization endpoint, without a query
/// * `client_id` - Spotify application client ID
/// * `redirect_uri` - Where Spotify sends the browser back to
/// * `scopes` - Requested scopes, joined with spaces
///
/// # Example
///
/// ```
/// let url = build_login_url(
///     "https://accounts.spotify.com/authorize",
///     "my-client",
///     "http://127.0.0.1:3000/callback",
///     &["user-top-read", "user-read-email"],
/// );
/// assert!(url.ends_with("&response_type=token&scope=user-top-read%20user-read-email"));
/// ```
pub fn build_login_url<T: AsRef<str>>(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[T],
) -> String {
    let scope = scopes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    let query = utils::encode_query(&[
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("response_type", "token"),
        ("scope", &scope),
    ]);

    format!("{auth_url}?{query}")
}
