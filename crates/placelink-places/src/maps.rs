//! Google Maps search-URL construction and inspection.

use reqwest::Url;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";

/// Builds the canonical maps link for a resolved place: a search-style URL
/// embedding the query and the resolved place identifier, both URL-encoded.
#[must_use]
pub fn search_url(query: &str, place_id: &str) -> String {
    let mut url = Url::parse(MAPS_SEARCH_URL).expect("static base URL parses");
    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("query_place_id", place_id);
    url.to_string()
}

/// Extracts the `query_place_id` parameter from a maps URL, if the URL
/// parses and carries one. Used by the validation pass to check that a
/// record's link and `placeId` agree.
#[must_use]
pub fn embedded_place_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "query_place_id")
        .map(|(_, v)| v.into_owned())
}

/// Returns `true` when `url` is an http(s) URL on a google.com host.
#[must_use]
pub fn is_google_maps_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    parsed
        .host_str()
        .is_some_and(|h| h == "google.com" || h.ends_with(".google.com"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_embeds_query_and_place_id() {
        let url = search_url("Uffizi Gallery, Florence", "ChIJ123");
        assert!(url.starts_with("https://www.google.com/maps/search/?api=1"));
        assert!(url.contains("query=Uffizi+Gallery%2C+Florence"), "got: {url}");
        assert!(url.contains("query_place_id=ChIJ123"));
    }

    #[test]
    fn embedded_place_id_round_trips() {
        let url = search_url("Duomo", "ChIJabc_def-123");
        assert_eq!(embedded_place_id(&url).as_deref(), Some("ChIJabc_def-123"));
    }

    #[test]
    fn embedded_place_id_missing_param() {
        assert_eq!(
            embedded_place_id("https://www.google.com/maps/search/?api=1&query=Duomo"),
            None
        );
        assert_eq!(embedded_place_id("not a url"), None);
    }

    #[test]
    fn google_host_check() {
        assert!(is_google_maps_url("https://www.google.com/maps/search/?api=1"));
        assert!(is_google_maps_url("http://google.com/maps"));
        assert!(!is_google_maps_url("https://maps.example.com/"));
        assert!(!is_google_maps_url("ftp://www.google.com/"));
        assert!(!is_google_maps_url("nonsense"));
    }
}
