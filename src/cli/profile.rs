use tabled::Table;

use crate::{
    cli::spinner,
    config::Config,
    info,
    management::{SessionManager, Storage},
    spotify::{SpotifyApi, profile::fetch_profile},
    types::{ArtistSummary, ArtistTableRow, TrackSummary, TrackTableRow},
    warning,
};

/// Shows the display name and, when both lists came back non-empty, the top
/// artists and top tracks.
pub async fn profile<S: Storage>(config: &Config, session: &SessionManager<S>) {
    let Some(token) = session.access_token() else {
        warning!("Not logged in. Please run spotstats auth");
        return;
    };

    let api = SpotifyApi::from_config(config);
    let pb = spinner("Fetching profile, top artists and top tracks...");
    let report = fetch_profile(&api, Some(token)).await;
    pb.finish_and_clear();

    if let Some(name) = &report.user_name {
        info!("Hey {}", name);
    }

    match report.display_lists() {
        Some((artists, tracks)) => {
            info!("Your top {} artists", artists.len());
            println!("{}", Table::new(artist_rows(artists)));
            info!("Your top {} tracks", tracks.len());
            println!("{}", Table::new(track_rows(tracks)));
        }
        None => info!("no content"),
    }

    if report.needs_login() {
        warning!("Your session is no longer valid. Run spotstats logout and spotstats auth.");
    }
}

pub fn artist_rows(artists: &[ArtistSummary]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            image: a.image_url.clone().unwrap_or_default(),
            url: a.profile_url.clone(),
        })
        .collect()
}

pub fn track_rows(tracks: &[TrackSummary]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            title: t.title.clone(),
            artists: t.artist_names.clone(),
            url: t.song_url.clone(),
        })
        .collect()
}
