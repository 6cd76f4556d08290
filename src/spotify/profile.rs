use std::fmt;

use crate::{
    spotify::{ApiError, SpotifyApi},
    types::{Artist, ArtistSummary, Paging, Track, TrackSummary, UserProfile},
    utils, warning,
};

/// How many top artists and tracks are requested and kept.
pub const TOP_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    TopArtists,
    TopTracks,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Profile => "profile",
            Section::TopArtists => "top artists",
            Section::TopTracks => "top tracks",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct SectionFailure {
    pub section: Section,
    pub error: ApiError,
}

/// Result of one profile fetch. Each section is empty when its read failed.
#[derive(Debug, Default)]
pub struct ProfileReport {
    pub user_name: Option<String>,
    pub top_artists: Vec<ArtistSummary>,
    pub top_tracks: Vec<TrackSummary>,
    pub failures: Vec<SectionFailure>,
}

impl ProfileReport {
    /// Both top lists, or `None` unless both are non-empty.
    ///
    /// The user name is not part of this: it is shown whenever present.
    pub fn display_lists(&self) -> Option<(&[ArtistSummary], &[TrackSummary])> {
        if self.top_artists.is_empty() || self.top_tracks.is_empty() {
            return None;
        }
        Some((self.top_artists.as_slice(), self.top_tracks.as_slice()))
    }

    pub fn failure(&self, section: Section) -> Option<&ApiError> {
        self.failures
            .iter()
            .find(|f| f.section == section)
            .map(|f| &f.error)
    }

    pub fn needs_login(&self) -> bool {
        self.failures.iter().any(|f| f.error.needs_login())
    }

    fn record<T>(&mut self, section: Section, result: Result<T, ApiError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                warning!("Failed to fetch {}: {}", section, error);
                self.failures.push(SectionFailure { section, error });
                None
            }
        }
    }
}

/// `GET /me`
pub async fn get_current_user(
    api: &SpotifyApi,
    token: Option<&str>,
) -> Result<UserProfile, ApiError> {
    api.get_json(token, "/me", &[]).await
}

/// `GET /me/top/artists`, ranked by Spotify.
pub async fn get_top_artists(
    api: &SpotifyApi,
    token: Option<&str>,
    limit: usize,
) -> Result<Vec<Artist>, ApiError> {
    let limit = limit.to_string();
    let page: Paging<Artist> = api
        .get_json(token, "/me/top/artists", &[("limit", limit.as_str())])
        .await?;
    Ok(page.items)
}

/// `GET /me/top/tracks`, ranked by Spotify.
pub async fn get_top_tracks(
    api: &SpotifyApi,
    token: Option<&str>,
    limit: usize,
) -> Result<Vec<Track>, ApiError> {
    let limit = limit.to_string();
    let page: Paging<Track> = api
        .get_json(token, "/me/top/tracks", &[("limit", limit.as_str())])
        .await?;
    Ok(page.items)
}

/// Keeps the first [`TOP_LIMIT`] artists in their given order.
pub fn summarize_artists(artists: Vec<Artist>) -> Vec<ArtistSummary> {
    artists
        .into_iter()
        .take(TOP_LIMIT)
        .map(|artist| ArtistSummary {
            image_url: utils::first_image_url(&artist.images),
            name: artist.name,
            profile_url: artist.external_urls.spotify,
        })
        .collect()
}

/// Keeps the first [`TOP_LIMIT`] tracks in their given order.
pub fn summarize_tracks(tracks: Vec<Track>) -> Vec<TrackSummary> {
    tracks
        .into_iter()
        .take(TOP_LIMIT)
        .map(|track| TrackSummary {
            artist_names: utils::join_artist_names(&track.artists),
            title: track.name,
            song_url: track.external_urls.spotify,
        })
        .collect()
}

/// Fetches the user's name, top artists and top tracks.
///
/// The three reads run concurrently and the report is built once all of
/// them have settled. A failed read empties only its own section; the
/// failure is logged and kept in [`ProfileReport::failures`].
pub async fn fetch_profile(api: &SpotifyApi, token: Option<&str>) -> ProfileReport {
    let (user, artists, tracks) = tokio::join!(
        get_current_user(api, token),
        get_top_artists(api, token, TOP_LIMIT),
        get_top_tracks(api, token, TOP_LIMIT),
    );

    let mut report = ProfileReport::default();

    let user_name = report
        .record(Section::Profile, user)
        .and_then(|profile| profile.display_name);
    report.user_name = user_name;

    if let Some(artists) = report.record(Section::TopArtists, artists) {
        report.top_artists = summarize_artists(artists);
    }

    if let Some(tracks) = report.record(Section::TopTracks, tracks) {
        report.top_tracks = summarize_tracks(tracks);
    }

    report
}
