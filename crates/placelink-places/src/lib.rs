//! Place-resolution engine: tiered Google Places lookups and the resolver
//! that applies results back onto dataset records.
//!
//! Three search tiers are tried in strict order — the Places API (New) text
//! search, then the legacy Find Place and Text Search endpoints when the
//! modern tier comes back empty and coordinates are available. Failures are
//! classified into an [`ErrorTally`] rather than aborting the batch.

mod client;
mod error;
pub mod maps;
pub mod query;
mod resolver;
mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use resolver::{resolve_location, ErrorTally};
pub use types::{LegacyLookup, SearchCandidate};
