use tabled::Table;

use crate::{
    cli::spinner,
    config::Config,
    info,
    management::{SessionManager, Storage},
    spotify::{SpotifyApi, search::search_artists},
    types::{Artist, SearchTableRow},
    utils, warning,
};

pub async fn search<S: Storage>(config: &Config, session: &SessionManager<S>, query: String) {
    let Some(token) = session.access_token() else {
        warning!("Not logged in. Please run spotstats auth");
        return;
    };

    let api = SpotifyApi::from_config(config);
    let pb = spinner("Searching artists...");
    let result = search_artists(&api, Some(token), &query).await;
    pb.finish_and_clear();

    match result {
        Ok(artists) if artists.is_empty() => info!("No artists found for \"{}\".", query),
        Ok(artists) => println!("{}", Table::new(search_rows(&artists))),
        Err(e) => {
            warning!("Failed to search artists. Err: {}", e);
            if e.needs_login() {
                warning!("Run spotstats logout and spotstats auth.");
            }
        }
    }
}

pub fn search_rows(artists: &[Artist]) -> Vec<SearchTableRow> {
    artists
        .iter()
        .map(|a| SearchTableRow {
            name: a.name.clone(),
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
            image: utils::first_image_url(&a.images).unwrap_or_else(|| "No Image".to_string()),
        })
        .collect()
}
