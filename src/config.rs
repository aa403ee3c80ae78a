use std::time::Duration;

pub const GHIBLI_API_BASE_URL: &str = "https://ghibliapi.vercel.app";

const TICK_RATE: Duration = Duration::from_millis(250);

/// Startup settings. Built once in `main` and never changed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host of the upstream API, without a trailing slash.
    pub base_url: String,
    pub tick_rate: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: GHIBLI_API_BASE_URL.to_string(),
            tick_rate: TICK_RATE,
        }
    }
}
