//! Google Places response types.
//!
//! Each search tier has its own wire shape; all of them normalize into
//! [`SearchCandidate`] immediately after deserialization so the resolver
//! only ever branches on one uniform type. Wire entries without a place id
//! are dropped during normalization.

use serde::Deserialize;

/// A single place match, normalized from any tier.
///
/// Candidate lists preserve API order; only rank 0 is ever consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    pub place_id: String,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Normalized result of a legacy lookup: the envelope status plus the
/// candidates (wire field `candidates` for Find Place, `results` for Text
/// Search).
#[derive(Debug, Clone)]
pub struct LegacyLookup {
    pub status: String,
    pub error_message: Option<String>,
    pub candidates: Vec<SearchCandidate>,
}

impl LegacyLookup {
    /// Returns the status when it signals a service-side problem worth
    /// tallying. `OK` and `ZERO_RESULTS` are normal outcomes, and an empty
    /// status means the envelope carried none.
    #[must_use]
    pub fn reportable_status(&self) -> Option<&str> {
        match self.status.as_str() {
            "" | "OK" | "ZERO_RESULTS" => None,
            other => Some(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Places API (New) — places:searchText
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    places: Vec<PlaceResult>,
}

impl TextSearchResponse {
    pub(crate) fn into_candidates(self) -> Vec<SearchCandidate> {
        self.places
            .into_iter()
            .filter_map(|p| {
                let place_id = p.id?;
                Some(SearchCandidate {
                    place_id,
                    display_name: p.display_name.map(|d| d.text),
                    formatted_address: p.formatted_address,
                    lat: p.location.as_ref().map(|l| l.latitude),
                    lon: p.location.as_ref().map(|l| l.longitude),
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<LocalizedText>,
    #[serde(default, rename = "formattedAddress")]
    formatted_address: Option<String>,
    #[serde(default)]
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

// ---------------------------------------------------------------------------
// Legacy Places API — findplacefromtext and textsearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct FindPlaceResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    candidates: Vec<LegacyCandidate>,
}

impl FindPlaceResponse {
    pub(crate) fn into_lookup(self) -> LegacyLookup {
        LegacyLookup {
            status: self.status,
            error_message: self.error_message,
            candidates: normalize_legacy(self.candidates),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyTextSearchResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<LegacyCandidate>,
}

impl LegacyTextSearchResponse {
    pub(crate) fn into_lookup(self) -> LegacyLookup {
        LegacyLookup {
            status: self.status,
            error_message: self.error_message,
            candidates: normalize_legacy(self.results),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LegacyCandidate {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<LegacyGeometry>,
}

#[derive(Debug, Deserialize)]
struct LegacyGeometry {
    #[serde(default)]
    location: Option<LegacyLatLng>,
}

#[derive(Debug, Deserialize)]
struct LegacyLatLng {
    lat: f64,
    lng: f64,
}

fn normalize_legacy(raw: Vec<LegacyCandidate>) -> Vec<SearchCandidate> {
    raw.into_iter()
        .filter_map(|c| {
            let place_id = c.place_id?;
            let coords = c.geometry.and_then(|g| g.location);
            Some(SearchCandidate {
                place_id,
                display_name: c.name,
                formatted_address: c.formatted_address,
                lat: coords.as_ref().map(|l| l.lat),
                lon: coords.as_ref().map(|l| l.lng),
            })
        })
        .collect()
}
