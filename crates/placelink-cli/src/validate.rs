//! Post-enrichment validation of rolodex files.
//!
//! Re-reads every per-city file and asserts the published shape: all
//! required fields present, obsolete fields gone, and each record's
//! `googleMapsUrl` embedding exactly its `placeId`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use placelink_places::maps;
use serde_json::Value;

const REQUIRED_FIELDS: &[&str] = &[
    "id",
    "name",
    "category",
    "city",
    "description",
    "highlight",
    "address",
    "lat",
    "lon",
    "googleMapsUrl",
    "placeId",
    "tags",
    "dietTags",
    "signatureItems",
    "price",
    "crowdLevel",
    "crowdNote",
    "timeNeeded",
    "walkIntensity",
    "booking",
    "hoursNote",
    "sourceUrl",
];

const OBSOLETE_FIELDS: &[&str] = &["images", "photo"];

/// Validates every rolodex file and reports the outcome.
///
/// # Errors
///
/// Returns an error when the directory cannot be read or any record fails
/// validation; individual failures are listed on stderr first.
pub fn run(rolodex_dir: &Path) -> anyhow::Result<()> {
    let (total, errors) = validate_dir(rolodex_dir)?;
    if !errors.is_empty() {
        eprintln!("Rolodex validation failed:");
        for error in &errors {
            eprintln!("- {error}");
        }
        anyhow::bail!("{} validation error(s) across {} places", errors.len(), total);
    }
    println!("Rolodex validation passed for {total} places.");
    Ok(())
}

fn validate_dir(dir: &Path) -> anyhow::Result<(usize, Vec<String>)> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("reading rolodex directory {}", dir.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut errors = Vec::new();
    let mut total = 0usize;

    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                errors.push(format!("{file_name}: unreadable: {err}"));
                continue;
            }
        };
        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                errors.push(format!("{file_name}: invalid JSON: {err}"));
                continue;
            }
        };
        let Some(places) = value.as_array() else {
            errors.push(format!("{file_name}: expected a JSON array"));
            continue;
        };

        for (index, place) in places.iter().enumerate() {
            total += 1;
            let prefix = format!("{file_name}[{}]", index + 1);
            validate_place(&prefix, place, &mut errors);
        }
    }

    Ok((total, errors))
}

fn validate_place(prefix: &str, place: &Value, errors: &mut Vec<String>) {
    let Some(obj) = place.as_object() else {
        errors.push(format!("{prefix}: expected object"));
        return;
    };

    let mut missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .filter(|f| !obj.contains_key(**f))
        .copied()
        .collect();
    missing.sort_unstable();
    if !missing.is_empty() {
        errors.push(format!("{prefix}: missing fields: {}", missing.join(", ")));
    }

    for field in OBSOLETE_FIELDS {
        if obj.contains_key(*field) {
            errors.push(format!("{prefix}: obsolete field '{field}' is not allowed"));
        }
    }

    let place_id = match obj.get("placeId").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            errors.push(format!("{prefix}: placeId must be a non-empty string"));
            return;
        }
    };

    match obj.get("googleMapsUrl").and_then(Value::as_str) {
        Some(url) if !url.trim().is_empty() => {
            if let Some(error) = validate_maps_url(url, place_id) {
                errors.push(format!("{prefix}: {error}"));
            }
        }
        _ => errors.push(format!("{prefix}: googleMapsUrl must be a non-empty string")),
    }

    match obj.get("booking") {
        Some(Value::Object(booking)) => {
            if !booking.get("required").is_some_and(Value::is_boolean) {
                errors.push(format!("{prefix}: booking.required must be a boolean"));
            }
        }
        _ => errors.push(format!("{prefix}: booking must be an object")),
    }
}

fn validate_maps_url(url: &str, place_id: &str) -> Option<&'static str> {
    if !maps::is_google_maps_url(url) {
        return Some("googleMapsUrl must be an http(s) URL on google.com");
    }
    match maps::embedded_place_id(url) {
        None => Some("googleMapsUrl must include query_place_id"),
        Some(embedded) if embedded != place_id => {
            Some("googleMapsUrl query_place_id must match placeId")
        }
        Some(_) => None,
    }
}
