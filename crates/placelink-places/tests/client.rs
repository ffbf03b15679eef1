//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use placelink_places::{PlacesClient, PlacesError};
use wiremock::matchers::{body_partial_json, header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_text_parses_candidates() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "places": [{
            "id": "ChIJuffizi",
            "displayName": {"text": "Uffizi Gallery", "languageCode": "en"},
            "formattedAddress": "Piazzale degli Uffizi, 6, 50122 Firenze FI, Italy",
            "location": {"latitude": 43.7678, "longitude": 11.2553}
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        // wiremock's `header` matcher splits request header values on commas,
        // so a comma-joined field mask must be matched with `headers`.
        .and(headers(
            "X-Goog-FieldMask",
            vec![
                "places.id",
                "places.displayName",
                "places.formattedAddress",
                "places.location",
            ],
        ))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "Uffizi Gallery, Florence",
            "maxResultCount": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_text("Uffizi Gallery, Florence", None)
        .await
        .expect("should parse candidates");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].place_id, "ChIJuffizi");
    assert_eq!(candidates[0].display_name.as_deref(), Some("Uffizi Gallery"));
    assert_eq!(candidates[0].lat, Some(43.7678));
}

#[tokio::test]
async fn search_text_sends_circle_bias_when_given() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(body_partial_json(serde_json::json!({
            "locationBias": {
                "circle": {
                    "center": {"latitude": 43.773, "longitude": 11.256},
                    "radius": 2000.0
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_text("Duomo", Some((43.773, 11.256)))
        .await
        .expect("empty body should parse as zero candidates");
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn search_text_non_2xx_preserves_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(r#"{"error": {"status": "PERMISSION_DENIED"}}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_text("Duomo", None)
        .await
        .expect_err("403 should surface as an error");

    match err {
        PlacesError::Status { code, body } => {
            assert_eq!(code, 403);
            assert!(body.contains("PERMISSION_DENIED"), "got body: {body}");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn find_place_sends_expected_query_params() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "candidates": [{
            "place_id": "ChIJduomo",
            "name": "Cattedrale di Santa Maria del Fiore",
            "formatted_address": "Piazza del Duomo, 50122 Firenze FI, Italy"
        }]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/findplacefromtext/json"))
        .and(query_param("input", "Duomo Piazza del Duomo"))
        .and(query_param("inputtype", "textquery"))
        .and(query_param("fields", "place_id,name,formatted_address"))
        .and(query_param("locationbias", "point:43.773,11.256"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let lookup = client
        .find_place("Duomo Piazza del Duomo", 43.773, 11.256)
        .await
        .expect("should parse lookup");

    assert_eq!(lookup.status, "OK");
    assert_eq!(lookup.candidates.len(), 1);
    assert_eq!(lookup.candidates[0].place_id, "ChIJduomo");
}

#[tokio::test]
async fn find_place_non_ok_status_is_data_not_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "This API key is not authorized to use this service.",
        "candidates": []
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let lookup = client
        .find_place("Duomo", 43.773, 11.256)
        .await
        .expect("denied status is still a successful round-trip");

    assert_eq!(lookup.reportable_status(), Some("REQUEST_DENIED"));
    assert!(lookup.candidates.is_empty());
}

#[tokio::test]
async fn text_search_parses_results_with_geometry() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [{
            "place_id": "ChIJponte",
            "name": "Ponte Vecchio",
            "formatted_address": "Ponte Vecchio, 50125 Firenze FI, Italy",
            "geometry": {"location": {"lat": 43.7679, "lng": 11.2531}}
        }]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param("query", "Ponte Vecchio"))
        .and(query_param("location", "43.768,11.253"))
        .and(query_param("radius", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let lookup = client
        .text_search("Ponte Vecchio", 43.768, 11.253)
        .await
        .expect("should parse results");

    assert_eq!(lookup.candidates.len(), 1);
    assert_eq!(lookup.candidates[0].place_id, "ChIJponte");
    assert_eq!(lookup.candidates[0].lat, Some(43.7679));
    assert_eq!(lookup.candidates[0].lon, Some(11.2531));
}
