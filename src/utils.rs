use crate::types::{Image, TrackArtist};

/// Splits a URL fragment into its `key=value` pairs.
///
/// The fragment is `&`-separated; a leading `#` is ignored. Components
/// without `=` yield an empty value. Values are percent-decoded, falling back
/// to the raw text when decoding fails.
pub fn parse_fragment(fragment: &str) -> Vec<(String, String)> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter(|component| !component.is_empty())
        .map(|component| {
            let (key, value) = component.split_once('=').unwrap_or((component, ""));
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            (key.to_string(), value)
        })
        .collect()
}

/// Looks up the first value stored under `key` in a fragment.
pub fn fragment_value(fragment: &str, key: &str) -> Option<String> {
    parse_fragment(fragment)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Joins `key=value` pairs into a query string, percent-encoding every value.
///
/// Spaces become `%20`, never `+`.
pub fn encode_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn first_image_url(images: &[Image]) -> Option<String> {
    images.first().map(|image| image.url.clone())
}

pub fn join_artist_names(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
