//! Dataset model: trip facts and per-city rolodex files.
//!
//! Only the fields the enrichment pass reads or writes are modeled; every
//! other field (descriptive rolodex metadata, booking blocks, itinerary
//! data) rides along in a flattened `serde_json::Map` so a load → save
//! round trip never drops data.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::to_ascii_pretty;
use crate::DatasetError;

/// A human-authored location: the unit of enrichment.
///
/// `lat`/`lon` are meaningful only as a pair; [`LocationRecord::coords`]
/// returns `Some` only when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(
        default,
        rename = "placeId",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_id: Option<String>,
    #[serde(
        default,
        rename = "googleMapsUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub google_maps_url: Option<String>,
    /// Backfilled from the maps URL only when present but blank. An absent
    /// field stays absent, so `None` vs `Some("")` is load-bearing here.
    #[serde(
        default,
        rename = "sourceUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocationRecord {
    /// Returns the trimmed name, or `None` when the record has no usable
    /// name and must be skipped.
    #[must_use]
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Returns `(lat, lon)` when both halves of the pair are present.
    #[must_use]
    pub fn coords(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    /// Returns `true` when the address is absent or whitespace-only.
    #[must_use]
    pub fn address_is_blank(&self) -> bool {
        self.address
            .as_deref()
            .is_none_or(|a| a.trim().is_empty())
    }
}

/// A rolodex entry is a [`LocationRecord`] plus descriptive fields
/// (id, category, tags, …) the enricher carries through untouched.
pub type RolodexEntry = LocationRecord;

/// An item in one of the trip-facts sections (stays, stations, events).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A walking loop: waypoints are enriched directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkingLoop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<LocationRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The primary trip dataset file.
///
/// Sections are `Option` rather than defaulting to an empty `Vec`: an
/// absent key and an explicitly empty list are both preserved verbatim
/// on rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stays: Option<Vec<SectionItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<SectionItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<SectionItem>>,
    #[serde(
        default,
        rename = "walkingLoops",
        skip_serializing_if = "Option::is_none"
    )]
    pub walking_loops: Option<Vec<WalkingLoop>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let text = to_ascii_pretty(value).map_err(|source| DatasetError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the trip-facts file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or is not valid JSON.
pub fn load_trip_facts(path: &Path) -> Result<TripFacts, DatasetError> {
    read_json(path)
}

/// Rewrites the trip-facts file in the stable output format.
///
/// # Errors
///
/// Returns [`DatasetError`] if serialization or the write fails.
pub fn save_trip_facts(path: &Path, facts: &TripFacts) -> Result<(), DatasetError> {
    write_json(path, facts)
}

/// Loads one per-city rolodex file (a JSON array of places).
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or is not a valid
/// JSON array of objects.
pub fn load_rolodex_file(path: &Path) -> Result<Vec<RolodexEntry>, DatasetError> {
    read_json(path)
}

/// Rewrites one rolodex file in the stable output format.
///
/// # Errors
///
/// Returns [`DatasetError`] if serialization or the write fails.
pub fn save_rolodex_file(path: &Path, entries: &[RolodexEntry]) -> Result<(), DatasetError> {
    write_json(path, &entries)
}
