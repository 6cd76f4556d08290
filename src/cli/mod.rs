//! # CLI Module
//!
//! User-facing commands of spotstats. Each command receives the loaded
//! [`Config`](crate::config::Config) and the caller's
//! [`SessionManager`](crate::management::SessionManager); there is no global
//! session state.
//!
//! ## Commands
//!
//! - [`auth`] - log in through the implicit grant (browser + local callback
//!   server, or a pasted redirect URL)
//! - [`login_url`] - print the authorize URL only
//! - [`logout`] - forget the stored token
//! - [`profile`] - show the display name, top 10 artists and top 10 tracks
//! - [`search`] - search artists by name
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotstats auth                 # log in
//! spotstats profile              # who am I, what do I listen to
//! spotstats search "daft punk"   # find artists
//! spotstats logout               # forget the token
//! ```
//!
//! Failed reads never abort a command. They are printed as warnings and the
//! affected output is left empty, so the worst case is "no content".

mod auth;
mod profile;
mod search;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use auth::login_url;
pub use auth::logout;
pub use profile::artist_rows;
pub use profile::profile;
pub use profile::track_rows;
pub use search::search;
pub use search::search_rows;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
