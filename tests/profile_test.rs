//! Integration tests for the profile fetcher and artist search
//!
//! The Spotify Web API is replaced by a wiremock server.

use serde_json::{Value, json};
use spotstats::spotify::{
    ApiError, SpotifyApi,
    profile::{Section, TOP_LIMIT, fetch_profile, summarize_artists, summarize_tracks},
    search::search_artists,
};
use spotstats::types::{Artist, Track};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn artist_json(index: usize, with_image: bool) -> Value {
    let images = if with_image {
        json!([
            {"url": format!("https://i.scdn.co/image/artist{index}-640"), "height": 640, "width": 640},
            {"url": format!("https://i.scdn.co/image/artist{index}-160"), "height": 160, "width": 160}
        ])
    } else {
        json!([])
    };

    json!({
        "id": format!("artist{index}"),
        "name": format!("Artist {index}"),
        "genres": ["electronic", "house"],
        "images": images,
        "external_urls": {"spotify": format!("https://open.spotify.com/artist/artist{index}")}
    })
}

fn track_json(index: usize, artists: &[&str]) -> Value {
    let artists: Vec<Value> = artists
        .iter()
        .map(|name| json!({"id": name.to_lowercase(), "name": name}))
        .collect();

    json!({
        "id": format!("track{index}"),
        "name": format!("Track {index}"),
        "artists": artists,
        "external_urls": {"spotify": format!("https://open.spotify.com/track/track{index}")}
    })
}

fn paging(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({"items": items, "total": total, "limit": 10, "offset": 0, "next": null})
}

async fn mount_me(server: &MockServer, display_name: Option<&str>) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "user1", "display_name": display_name})),
        )
        .mount(server)
        .await;
}

async fn mount_top(server: &MockServer, kind: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/me/top/{kind}")))
        .and(query_param("limit", "10"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_profile_complete() {
    let server = MockServer::start().await;
    mount_me(&server, Some("Jane")).await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_json(paging((0..3).map(|i| artist_json(i, true)).collect())),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(200).set_body_json(paging(vec![
            track_json(0, &["Daft Punk", "Pharrell Williams"]),
            track_json(1, &["Björk"]),
        ])),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    assert!(report.failures.is_empty());
    assert_eq!(report.user_name.as_deref(), Some("Jane"));

    let (artists, tracks) = report.display_lists().expect("both lists present");
    assert_eq!(artists.len(), 3);
    assert_eq!(artists[0].name, "Artist 0");
    assert_eq!(
        artists[0].image_url.as_deref(),
        Some("https://i.scdn.co/image/artist0-640")
    );
    assert_eq!(artists[0].profile_url, "https://open.spotify.com/artist/artist0");

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "Track 0");
    assert_eq!(tracks[0].artist_names, "Daft Punk, Pharrell Williams");
    assert_eq!(tracks[0].song_url, "https://open.spotify.com/track/track0");
    assert_eq!(tracks[1].artist_names, "Björk");
}

#[tokio::test]
async fn test_fetch_profile_truncates_to_top_ten_in_order() {
    let server = MockServer::start().await;
    mount_me(&server, Some("Jane")).await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_json(paging((0..15).map(|i| artist_json(i, true)).collect())),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(200).set_body_json(paging((0..12).map(|i| track_json(i, &["A"])).collect())),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    assert_eq!(report.top_artists.len(), TOP_LIMIT);
    assert_eq!(report.top_tracks.len(), TOP_LIMIT);
    let names: Vec<&str> = report.top_artists.iter().map(|a| a.name.as_str()).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("Artist {i}")).collect();
    assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_fetch_profile_artist_without_images() {
    let server = MockServer::start().await;
    mount_me(&server, Some("Jane")).await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_json(paging(vec![
            artist_json(0, true),
            artist_json(1, false),
            artist_json(2, true),
        ])),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(200).set_body_json(paging(vec![track_json(0, &[])])),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    assert!(report.failures.is_empty());
    assert_eq!(report.top_artists.len(), 3);
    assert!(report.top_artists[0].image_url.is_some());
    assert_eq!(report.top_artists[1].image_url, None);
    assert_eq!(report.top_artists[1].name, "Artist 1");
    assert!(report.top_artists[2].image_url.is_some());

    // Track without credited artists
    assert_eq!(report.top_tracks[0].artist_names, "");
}

#[tokio::test]
async fn test_fetch_profile_tracks_failure_suppresses_lists() {
    let server = MockServer::start().await;
    mount_me(&server, Some("Jane")).await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_json(paging((0..5).map(|i| artist_json(i, true)).collect())),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(500).set_body_string("upstream failure"),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    // User name resolves independently
    assert_eq!(report.user_name.as_deref(), Some("Jane"));
    // Artists came back, but the lists are shown only as a pair
    assert_eq!(report.top_artists.len(), 5);
    assert!(report.top_tracks.is_empty());
    assert!(report.display_lists().is_none());

    assert_eq!(report.failures.len(), 1);
    match report.failure(Section::TopTracks) {
        Some(ApiError::Status { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream failure");
        }
        other => panic!("unexpected failure: {:?}", other),
    }
    assert!(!report.needs_login());
}

#[tokio::test]
async fn test_fetch_profile_profile_failure_keeps_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_json(paging(vec![artist_json(0, true)])),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(200).set_body_json(paging(vec![track_json(0, &["A"])])),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    assert_eq!(report.user_name, None);
    assert!(report.display_lists().is_some());
    assert!(matches!(
        report.failure(Section::Profile),
        Some(ApiError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_fetch_profile_null_display_name() {
    let server = MockServer::start().await;
    mount_me(&server, None).await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_json(paging(vec![])),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(200).set_body_json(paging(vec![])),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    assert!(report.failures.is_empty());
    assert_eq!(report.user_name, None);
    assert!(report.display_lists().is_none());
}

#[tokio::test]
async fn test_fetch_profile_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"status": 401, "message": "The access token expired"}})),
        )
        .mount(&server)
        .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some("expired")).await;

    assert_eq!(report.failures.len(), 3);
    assert!(report.needs_login());
    assert!(matches!(
        report.failure(Section::TopArtists),
        Some(ApiError::AuthRejected { status: 401 })
    ));
    assert!(report.display_lists().is_none());
}

#[tokio::test]
async fn test_fetch_profile_without_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = SpotifyApi::new(server.uri());

    for token in [None, Some("")] {
        let report = fetch_profile(&api, token).await;

        assert_eq!(report.failures.len(), 3);
        assert!(
            report
                .failures
                .iter()
                .all(|f| matches!(f.error, ApiError::AuthAbsent))
        );
        assert_eq!(report.user_name, None);
        assert!(report.display_lists().is_none());
    }
}

#[tokio::test]
async fn test_fetch_profile_malformed_body() {
    let server = MockServer::start().await;
    mount_me(&server, Some("Jane")).await;
    mount_top(
        &server,
        "artists",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;
    mount_top(
        &server,
        "tracks",
        ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})),
    )
    .await;

    let api = SpotifyApi::new(server.uri());
    let report = fetch_profile(&api, Some(TOKEN)).await;

    assert_eq!(report.user_name.as_deref(), Some("Jane"));
    assert!(matches!(
        report.failure(Section::TopArtists),
        Some(ApiError::Malformed(_))
    ));
    assert!(matches!(
        report.failure(Section::TopTracks),
        Some(ApiError::Malformed(_))
    ));
}

#[test]
fn test_base_url_drops_trailing_slash() {
    assert_eq!(
        SpotifyApi::new("https://api.spotify.com/v1/").base_url(),
        "https://api.spotify.com/v1"
    );
    assert_eq!(SpotifyApi::new("http://127.0.0.1:9000").base_url(), "http://127.0.0.1:9000");
}

#[tokio::test]
async fn test_trailing_slash_base_url_reaches_same_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": paging(vec![artist_json(0, true)])
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = SpotifyApi::new(format!("{}/", server.uri()));
    assert_eq!(api.base_url(), server.uri());

    let artists = search_artists(&api, Some(TOKEN), "anything").await.unwrap();
    assert_eq!(artists.len(), 1);
}

#[tokio::test]
async fn test_search_artists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "daft punk"))
        .and(query_param("type", "artist"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": paging(vec![artist_json(0, true), artist_json(1, false)])
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = SpotifyApi::new(server.uri());
    let artists = search_artists(&api, Some(TOKEN), "daft punk").await.unwrap();

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].name, "Artist 0");
    assert_eq!(artists[0].genres, vec!["electronic", "house"]);
    assert!(artists[1].images.is_empty());
}

#[tokio::test]
async fn test_search_artists_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let api = SpotifyApi::new(server.uri());

    let err = search_artists(&api, Some(TOKEN), "anything").await.unwrap_err();
    assert!(matches!(err, ApiError::AuthRejected { status: 403 }));
    assert!(err.needs_login());

    let err = search_artists(&api, None, "anything").await.unwrap_err();
    assert!(matches!(err, ApiError::AuthAbsent));
}

#[tokio::test]
async fn test_network_error() {
    // Nothing listens on port 9 of the loopback interface
    let api = SpotifyApi::new("http://127.0.0.1:9");
    let err = search_artists(&api, Some(TOKEN), "anything").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.needs_login());
}

#[test]
fn test_summaries_tolerate_missing_arrays() {
    let artist: Artist = serde_json::from_value(json!({"name": "Bare Artist"})).unwrap();
    let track: Track = serde_json::from_value(json!({"name": "Bare Track"})).unwrap();

    let artists = summarize_artists(vec![artist]);
    let tracks = summarize_tracks(vec![track]);

    assert_eq!(artists[0].name, "Bare Artist");
    assert_eq!(artists[0].image_url, None);
    assert_eq!(artists[0].profile_url, "");
    assert_eq!(tracks[0].title, "Bare Track");
    assert_eq!(tracks[0].artist_names, "");
}
