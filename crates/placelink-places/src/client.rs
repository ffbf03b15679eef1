//! HTTP client for the Google Places search endpoints.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization for the three search tiers: the Places API (New) text
//! search and the two legacy endpoints (Find Place and Text Search). Each
//! call is a single round-trip with no internal retry; the resolver decides
//! what a failure means for the record being processed.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::{
    FindPlaceResponse, LegacyLookup, LegacyTextSearchResponse, SearchCandidate, TextSearchResponse,
};

const SEARCH_TEXT_URL: &str = "https://places.googleapis.com/v1/places:searchText";
const FIND_PLACE_URL: &str = "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// Circle radius for coordinate bias, shared by the modern and legacy tiers.
const BIAS_RADIUS_METERS: f64 = 2000.0;

const SEARCH_TEXT_FIELD_MASK: &str =
    "places.id,places.displayName,places.formattedAddress,places.location";
const FIND_PLACE_FIELDS: &str = "place_id,name,formatted_address";

/// Client for the Google Places search endpoints.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point every endpoint at a mock server
/// in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    search_text_url: Url,
    find_place_url: Url,
    text_search_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        let client = build_http_client(timeout_secs, user_agent)?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_text_url: parse_endpoint(SEARCH_TEXT_URL)?,
            find_place_url: parse_endpoint(FIND_PLACE_URL)?,
            text_search_url: parse_endpoint(TEXT_SEARCH_URL)?,
        })
    }

    /// Creates a client with every endpoint rooted at `base_url` (for
    /// testing with wiremock). Endpoint paths match the production ones.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = build_http_client(timeout_secs, "placelink/0.1 (test)")?;
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_text_url: parse_endpoint(&format!("{base}/v1/places:searchText"))?,
            find_place_url: parse_endpoint(&format!(
                "{base}/maps/api/place/findplacefromtext/json"
            ))?,
            text_search_url: parse_endpoint(&format!("{base}/maps/api/place/textsearch/json"))?,
        })
    }

    /// Modern tier: `places:searchText`, capped at one result, optionally
    /// biased to a 2000 m circle around `bias`.
    ///
    /// An empty candidate list is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Status`] on a non-2xx response, with the raw body.
    /// - [`PlacesError::Http`] on network or TLS failure.
    /// - [`PlacesError::Deserialize`] if a 2xx body does not parse.
    pub async fn search_text(
        &self,
        query: &str,
        bias: Option<(f64, f64)>,
    ) -> Result<Vec<SearchCandidate>, PlacesError> {
        let body = search_text_body(query, bias);
        let response = self
            .client
            .post(self.search_text_url.clone())
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_TEXT_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PlacesError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        let parsed: TextSearchResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                context: format!("searchText(query={query})"),
                source: e,
            })?;
        Ok(parsed.into_candidates())
    }

    /// Legacy tier B: `findplacefromtext`, biased to a point. The envelope
    /// `status` is returned as data — a non-OK status is the caller's call,
    /// never a hard failure here.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not parse.
    pub async fn find_place(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
    ) -> Result<LegacyLookup, PlacesError> {
        let url = self.find_place_request_url(query, lat, lon);
        let parsed: FindPlaceResponse = self
            .get_legacy(url, format!("findplacefromtext(input={query})"))
            .await?;
        Ok(parsed.into_lookup())
    }

    /// Legacy tier C: the broader `textsearch`, used only when Find Place
    /// yields nothing. Same envelope contract as [`PlacesClient::find_place`].
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not parse.
    pub async fn text_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
    ) -> Result<LegacyLookup, PlacesError> {
        let url = self.text_search_request_url(query, lat, lon);
        let parsed: LegacyTextSearchResponse = self
            .get_legacy(url, format!("textsearch(query={query})"))
            .await?;
        Ok(parsed.into_lookup())
    }

    fn find_place_request_url(&self, query: &str, lat: f64, lon: f64) -> Url {
        let mut url = self.find_place_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("input", query);
            pairs.append_pair("inputtype", "textquery");
            pairs.append_pair("fields", FIND_PLACE_FIELDS);
            pairs.append_pair("locationbias", &format!("point:{lat},{lon}"));
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    fn text_search_request_url(&self, query: &str, lat: f64, lon: f64) -> Url {
        let mut url = self.text_search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            pairs.append_pair("location", &format!("{lat},{lon}"));
            pairs.append_pair("radius", "2000");
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body.
    async fn get_legacy<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: String,
    ) -> Result<T, PlacesError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize { context, source: e })
    }
}

fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PlacesError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

fn parse_endpoint(raw: &str) -> Result<Url, PlacesError> {
    Url::parse(raw).map_err(|e| PlacesError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

fn search_text_body(query: &str, bias: Option<(f64, f64)>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "textQuery": query,
        "maxResultCount": 1,
    });
    if let Some((lat, lon)) = bias {
        body["locationBias"] = serde_json::json!({
            "circle": {
                "center": {"latitude": lat, "longitude": lon},
                "radius": BIAS_RADIUS_METERS,
            }
        });
    }
    body
}
