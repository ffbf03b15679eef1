use thiserror::Error;

/// Errors returned by the place-search client.
///
/// None of these abort an enrichment batch: the resolver classifies them
/// into the error tally and moves on to the next record.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the modern text-search endpoint, with the raw
    /// body preserved for logging.
    #[error("unexpected HTTP status {code}: {body}")]
    Status { code: u16, body: String },

    /// An endpoint URL could not be parsed (custom base URLs only).
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
