use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Mutex;

/// Slot the callback server fills with the redirect fragment it receives.
pub type CallbackSlot = Arc<Mutex<Option<String>>>;

/// Origin of the callback page. `POST /fragment` from any other origin is
/// refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOrigin(pub String);

/// The fragment part of the URL the provider redirected to.
///
/// Holds what a browser would show after `#` in the address bar. Clearing it
/// keeps the token out of anything that is later copied, logged or reloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackLocation {
    fragment: String,
}

impl CallbackLocation {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Takes the fragment of a full redirect URL such as
    /// `http://127.0.0.1:3000/callback#access_token=...`.
    pub fn from_url(url: &str) -> Self {
        match url.split_once('#') {
            Some((_, fragment)) => Self::new(fragment),
            None => Self::empty(),
        }
    }

    /// Fragment without a leading `#`.
    pub fn fragment(&self) -> &str {
        self.fragment.strip_prefix('#').unwrap_or(&self.fragment)
    }

    pub fn clear(&mut self) {
        self.fragment.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fragment().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// One page of a Spotify paging object. Only `items` is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: Paging<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub name: String,
    pub image_url: Option<String>,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub title: String,
    pub artist_names: String,
    pub song_url: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub rank: usize,
    pub name: String,
    pub image: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub rank: usize,
    pub title: String,
    pub artists: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub name: String,
    pub genres: String,
    pub image: String,
}
