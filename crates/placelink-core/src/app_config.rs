/// Runtime configuration for the enrichment pass.
///
/// Loaded from environment variables (and a `.env` file) by
/// [`crate::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// Google Maps Platform API key, shared by all three search tiers.
    pub google_maps_api_key: String,
    /// Per-request timeout for place searches.
    pub request_timeout_secs: u64,
    /// Courtesy delay after each successful resolution.
    pub pace_delay_ms: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_maps_api_key", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("pace_delay_ms", &self.pace_delay_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
