use crate::{
    spotify::{ApiError, SpotifyApi},
    types::{Artist, SearchArtistsResponse},
};

/// Searches artists by free text via `GET /search?q=<query>&type=artist`.
///
/// Returns the first page of matches in the order Spotify ranks them.
/// Overlapping searches are not coordinated; whichever finishes last is
/// what the caller ends up showing.
pub async fn search_artists(
    api: &SpotifyApi,
    token: Option<&str>,
    query: &str,
) -> Result<Vec<Artist>, ApiError> {
    let res: SearchArtistsResponse = api
        .get_json(token, "/search", &[("q", query), ("type", "artist")])
        .await?;
    Ok(res.artists.items)
}
