//! The enrichment batch driver.
//!
//! Walks every location-bearing record in a fixed order — stays, stations,
//! events, walking-loop waypoints, then each rolodex file in sorted filename
//! order — resolving one record at a time. Per-record failures are tallied
//! and skipped rather than propagated, so one bad record never aborts the
//! run. Each section's file is rewritten after its records finish.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use placelink_core::{
    load_rolodex_file, load_trip_facts, save_rolodex_file, save_trip_facts, AppConfig,
    LocationRecord,
};
use placelink_places::{resolve_location, ErrorTally, PlacesClient};

/// Counters and the error tally for one enrichment pass.
struct BatchState {
    checked: usize,
    updated: usize,
    limit: Option<usize>,
    pace: Duration,
    tally: ErrorTally,
}

impl BatchState {
    fn new(limit: Option<usize>, pace: Duration) -> Self {
        Self {
            checked: 0,
            updated: 0,
            limit,
            pace,
            tally: ErrorTally::new(),
        }
    }

    fn at_cap(&self) -> bool {
        self.limit.is_some_and(|l| self.checked >= l)
    }
}

/// Final counts for the run, split between the trip dataset and the
/// rolodex files.
pub struct BatchSummary {
    pub checked: usize,
    pub updated: usize,
    pub rolodex_checked: usize,
    pub rolodex_updated: usize,
    pub tally: ErrorTally,
}

/// Runs the full enrichment pass and prints the summary.
///
/// # Errors
///
/// Fatal errors only: client construction, an unreadable trip-facts file,
/// or a failed dataset write. Per-record resolution failures are tallied,
/// not propagated.
pub async fn run(
    config: &AppConfig,
    trip_facts_path: &Path,
    rolodex_dir: &Path,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let client = PlacesClient::new(
        &config.google_maps_api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let summary = run_batch(
        &client,
        Duration::from_millis(config.pace_delay_ms),
        trip_facts_path,
        rolodex_dir,
        limit,
    )
    .await?;
    print!("{}", render_summary(&summary));
    Ok(())
}

/// The driver proper, decoupled from client construction so tests can point
/// it at a mock server.
pub async fn run_batch(
    client: &PlacesClient,
    pace: Duration,
    trip_facts_path: &Path,
    rolodex_dir: &Path,
    limit: Option<usize>,
) -> anyhow::Result<BatchSummary> {
    let mut state = BatchState::new(limit, pace);

    let mut facts = load_trip_facts(trip_facts_path)
        .with_context(|| format!("loading trip facts from {}", trip_facts_path.display()))?;

    for item in facts.stays.iter_mut().flatten() {
        apply_locations(client, item.location.as_mut(), &mut state).await;
    }
    for item in facts.stations.iter_mut().flatten() {
        apply_locations(client, item.location.as_mut(), &mut state).await;
    }
    for item in facts.events.iter_mut().flatten() {
        apply_locations(client, item.location.as_mut(), &mut state).await;
    }
    for walking_loop in facts.walking_loops.iter_mut().flatten() {
        apply_locations(
            client,
            walking_loop.waypoints.iter_mut().flatten(),
            &mut state,
        )
        .await;
    }
    save_trip_facts(trip_facts_path, &facts)
        .with_context(|| format!("saving trip facts to {}", trip_facts_path.display()))?;

    let trip_checked = state.checked;
    let trip_updated = state.updated;

    if rolodex_dir.is_dir() {
        for path in rolodex_paths(rolodex_dir)? {
            let mut entries = match load_rolodex_file(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    // Not every file in the directory has to be a rolodex;
                    // skip anything that is not a JSON array of places.
                    tracing::warn!(path = %path.display(), error = %err, "skipping rolodex file");
                    continue;
                }
            };
            apply_locations(client, entries.iter_mut(), &mut state).await;
            save_rolodex_file(&path, &entries)
                .with_context(|| format!("saving rolodex file {}", path.display()))?;
        }
    }

    Ok(BatchSummary {
        checked: state.checked,
        updated: state.updated,
        rolodex_checked: state.checked - trip_checked,
        rolodex_updated: state.updated - trip_updated,
        tally: state.tally,
    })
}

/// Resolves each location in turn, honoring the cap and pacing successful
/// calls. Records past the cap are never counted or touched.
async fn apply_locations<'a, I>(client: &PlacesClient, locations: I, state: &mut BatchState)
where
    I: IntoIterator<Item = &'a mut LocationRecord>,
{
    for location in locations {
        if state.at_cap() {
            return;
        }
        state.checked += 1;
        if resolve_location(client, location, &mut state.tally).await {
            state.updated += 1;
            tokio::time::sleep(state.pace).await;
        }
    }
}

fn rolodex_paths(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading rolodex directory {}", dir.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

fn render_summary(summary: &BatchSummary) -> String {
    use std::fmt::Write;

    let mut out = format!(
        "Updated {}/{} locations with place IDs.\n",
        summary.updated, summary.checked
    );
    if summary.rolodex_checked > 0 {
        let _ = writeln!(
            out,
            "Rolodex: updated {}/{} places.",
            summary.rolodex_updated, summary.rolodex_checked
        );
    }
    if !summary.tally.is_empty() {
        out.push_str("Errors by status:\n");
        for (status, count) in summary.tally.iter() {
            let _ = writeln!(out, "  {status}: {count}");
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "enrich_test.rs"]
mod tests;
