//! # Spotify Integration Module
//!
//! The layer between spotstats and the Spotify Web API: login, profile
//! statistics and artist search.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 implicit grant)
//!     ├── Profile (user, top artists, top tracks)
//!     └── Search (artists)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] drives the implicit grant: the user opens the authorize URL, Spotify
//! redirects back with `#access_token=...` in the fragment, and the local
//! callback server hands the fragment to the
//! [`SessionManager`](crate::management::SessionManager). There is no refresh
//! token; an expired token shows up as [`ApiError::AuthRejected`].
//!
//! ## API Coverage
//!
//! - `GET /me` - display name
//! - `GET /me/top/artists?limit=10` - top artists
//! - `GET /me/top/tracks?limit=10` - top tracks
//! - `GET /search?type=artist` - artist search
//!
//! All reads send `Authorization: Bearer <token>`. No retries, no rate-limit
//! handling, no timeouts.
//!
//! ## Usage Patterns
//!
//! ```rust
//! let api = spotify::SpotifyApi::from_config(&config);
//! let report = spotify::profile::fetch_profile(&api, session.access_token()).await;
//! if let Some((artists, tracks)) = report.display_lists() {
//!     // render both lists
//! }
//! ```

pub mod auth;
mod client;
pub mod profile;
pub mod search;

pub use client::ApiError;
pub use client::SpotifyApi;
