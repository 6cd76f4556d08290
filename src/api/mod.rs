//! # API Module
//!
//! HTTP endpoints of the local server that receives the Spotify login
//! redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback`, the redirect target. Returns a small page
//!   that lifts the access token out of the URL fragment, removes it from the
//!   address bar and posts it to [`fragment`].
//! - [`fragment`] - `POST /fragment`, stores the first fragment posted from
//!   the callback page's origin in the shared
//!   [`CallbackSlot`](crate::types::CallbackSlot) for the waiting `auth`
//!   command.
//! - [`health`] - `GET /health`, status, version and whether a fragment has
//!   arrived yet.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! use spotstats::types::CallbackOrigin;
//!
//! let slot = Arc::new(Mutex::new(None));
//! let origin = CallbackOrigin("http://127.0.0.1:3000".to_string());
//! let app = spotstats::server::router(slot, origin);
//! ```

mod callback;
mod health;

pub use callback::FragmentForm;
pub use callback::callback;
pub use callback::fragment;
pub use health::health;
