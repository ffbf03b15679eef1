//! Tiered place resolution.
//!
//! Resolves one [`LocationRecord`] at a time: modern text search first,
//! then — only when the modern tier returns an empty result and coordinates
//! are available — the legacy Find Place and Text Search endpoints, in that
//! order. A modern-tier *error* (as opposed to an empty result) is terminal
//! for the record; the legacy tiers are not consulted.
//!
//! Failures never propagate past the record boundary. Every failure mode is
//! classified into the [`ErrorTally`] and the resolver returns a definite
//! outcome, leaving the record untouched unless resolution fully succeeded.

use std::collections::BTreeMap;

use placelink_core::LocationRecord;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::maps;
use crate::query::build_query;

/// Running tally of failure categories across a batch.
///
/// Keys are `PLACES_NEW_HTTP_<code>` / `PLACES_NEW_TRANSPORT` for the
/// modern tier, the raw envelope status (`REQUEST_DENIED`,
/// `OVER_QUERY_LIMIT`, …) for legacy statuses, and
/// `FINDPLACE_TRANSPORT` / `TEXTSEARCH_TRANSPORT` for legacy transport
/// failures. Counts only grow; the tally is never reset during a run.
#[derive(Debug, Default, Clone)]
pub struct ErrorTally {
    counts: BTreeMap<String, u64>,
}

impl ErrorTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: impl Into<String>) {
        *self.counts.entry(key.into()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates categories in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Resolves `location` to a place id and applies the result in place.
///
/// Returns `true` when the record was updated. On success `placeId` and
/// `googleMapsUrl` are set together (the URL embeds the same id), missing
/// coordinates and a blank address are backfilled from the winning
/// candidate, and a present-but-blank `sourceUrl` receives the maps URL.
/// On any failure the record is left byte-identical.
pub async fn resolve_location(
    client: &PlacesClient,
    location: &mut LocationRecord,
    tally: &mut ErrorTally,
) -> bool {
    let Some(name) = location.usable_name() else {
        // Not an error: records without a usable name are skipped silently.
        return false;
    };
    let query = build_query(name, location.address.as_deref());
    let mut coords = location.coords();

    // Backfills are staged and applied only on success so a failed
    // resolution never leaves a partially mutated record.
    let mut staged_coords: Option<(f64, f64)> = None;
    let mut staged_address: Option<String> = None;
    let mut place_id: Option<String> = None;

    match client.search_text(&query, coords).await {
        Ok(candidates) => {
            if let Some(candidate) = candidates.first() {
                if coords.is_none() {
                    if let Some(pair) = candidate.lat.zip(candidate.lon) {
                        staged_coords = Some(pair);
                        coords = Some(pair);
                    }
                }
                if location.address_is_blank() {
                    staged_address.clone_from(&candidate.formatted_address);
                }
                place_id = Some(candidate.place_id.clone());
            }
        }
        Err(err) => {
            // Terminal for this record: an erroring modern tier skips the
            // legacy fallback, unlike an empty modern result.
            match &err {
                PlacesError::Status { code, body } => {
                    tally.record(format!("PLACES_NEW_HTTP_{code}"));
                    tracing::warn!(code, body = %body, query = %query, "places searchText failed");
                }
                other => {
                    tally.record("PLACES_NEW_TRANSPORT");
                    tracing::warn!(error = %other, query = %query, "places searchText transport failure");
                }
            }
            return false;
        }
    }

    if place_id.is_none() {
        let Some((lat, lon)) = coords else {
            // No candidate and nothing to bias the legacy tiers with.
            return false;
        };
        place_id = legacy_lookup(client, &query, lat, lon, tally).await;
    }

    let Some(place_id) = place_id else {
        return false;
    };

    if let Some((lat, lon)) = staged_coords {
        location.lat = Some(lat);
        location.lon = Some(lon);
    }
    if let Some(address) = staged_address {
        location.address = Some(address);
    }
    let url = maps::search_url(&query, &place_id);
    if matches!(&location.source_url, Some(s) if s.trim().is_empty()) {
        location.source_url = Some(url.clone());
    }
    location.place_id = Some(place_id);
    location.google_maps_url = Some(url);
    true
}

/// Runs the legacy tiers in order: Find Place, then Text Search when Find
/// Place yields nothing. Reportable envelope statuses are tallied under the
/// raw status string; transport failures are tallied and treated like an
/// empty result so the next tier (and the batch) still runs.
async fn legacy_lookup(
    client: &PlacesClient,
    query: &str,
    lat: f64,
    lon: f64,
    tally: &mut ErrorTally,
) -> Option<String> {
    match client.find_place(query, lat, lon).await {
        Ok(lookup) => {
            if let Some(candidate) = lookup.candidates.first() {
                return Some(candidate.place_id.clone());
            }
            if let Some(status) = lookup.reportable_status() {
                tracing::warn!(
                    status,
                    message = lookup.error_message.as_deref().unwrap_or("no message"),
                    query,
                    "findplacefromtext reported an error status"
                );
                tally.record(status);
            }
        }
        Err(err) => {
            tally.record("FINDPLACE_TRANSPORT");
            tracing::warn!(error = %err, query, "findplacefromtext request failed");
        }
    }

    match client.text_search(query, lat, lon).await {
        Ok(lookup) => {
            if let Some(candidate) = lookup.candidates.first() {
                return Some(candidate.place_id.clone());
            }
            if let Some(status) = lookup.reportable_status() {
                tracing::warn!(
                    status,
                    message = lookup.error_message.as_deref().unwrap_or("no message"),
                    query,
                    "textsearch reported an error status"
                );
                tally.record(status);
            }
            None
        }
        Err(err) => {
            tally.record("TEXTSEARCH_TRANSPORT");
            tracing::warn!(error = %err, query, "textsearch request failed");
            None
        }
    }
}
