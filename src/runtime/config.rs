//! Dispatcher configuration.

use crate::http::InvalidUrl;
use hyper::Uri;
use std::time::Duration;

/// Target used when no URL is given on the command line.
pub const DEFAULT_URL: &str = "http://localhost:30001";

/// Number of GET requests a run sends.
pub const DEFAULT_REQUESTS: usize = 10;

/// Spacing between consecutive dispatches.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for a dispatch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// URL every request is sent to, used verbatim.
    pub url: String,
    /// How many requests to schedule.
    pub requests: usize,
    /// Request `i` fires `i * interval` after the run starts.
    pub interval: Duration,
    /// Upper bound on a single request. `None` waits as long as the
    /// connection does.
    pub timeout: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            requests: DEFAULT_REQUESTS,
            interval: DEFAULT_INTERVAL,
            timeout: None,
        }
    }
}

impl DispatchConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the number of requests.
    pub fn requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Set the dispatch interval.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Bound each request by `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Delay of request `index` relative to the start of the run.
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn delay_for(&self, index: usize) -> Duration {
        u32::try_from(index)
            .ok()
            .and_then(|i| self.interval.checked_mul(i))
            .unwrap_or(Duration::MAX)
    }

    /// Parse the target URL.
    ///
    /// Only absolute URLs can be requested, so a missing scheme or host is
    /// rejected here rather than failing every request later.
    pub fn target(&self) -> Result<Uri, InvalidUrl> {
        let uri = self
            .url
            .parse::<Uri>()
            .map_err(|e| InvalidUrl::new(&self.url, e))?;

        if uri.scheme().is_none() {
            return Err(InvalidUrl::new(&self.url, "missing scheme (expected e.g. http://)"));
        }
        if uri.authority().is_none() {
            return Err(InvalidUrl::new(&self.url, "missing host"));
        }
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_cli_contract() {
        let config = DispatchConfig::new();
        assert_eq!(config.url, "http://localhost:30001");
        assert_eq!(config.requests, 10);
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn delays_are_spaced_by_interval() {
        let config = DispatchConfig::new();
        let delays: Vec<_> = (0..config.requests).map(|i| config.delay_for(i)).collect();
        assert_eq!(delays[0], Duration::ZERO);
        assert_eq!(delays[1], Duration::from_secs(1));
        assert_eq!(delays[9], Duration::from_secs(9));

        let fast = config.interval(Duration::from_millis(20));
        assert_eq!(fast.delay_for(3), Duration::from_millis(60));
    }

    #[test]
    fn custom_url_is_kept_verbatim() {
        let config = DispatchConfig::new().url("http://example.com:8080/health");
        let uri = config.target().unwrap();
        assert_eq!(uri.host(), Some("example.com"));
        assert_eq!(uri.port_u16(), Some(8080));
        assert_eq!(uri.path(), "/health");
        assert_eq!(uri.to_string(), "http://example.com:8080/health");
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let err = DispatchConfig::new().url("http://exa mple.com").target().unwrap_err();
        assert!(err.to_string().contains("http://exa mple.com"));
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let err = DispatchConfig::new().url("localhost:30001").target().unwrap_err();
        assert_eq!(err.url, "localhost:30001");
        assert!(err.message.contains("scheme"));
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = DispatchConfig::new().url("/health").target().unwrap_err();
        assert!(err.message.contains("scheme"));
    }

    #[test]
    fn huge_delays_saturate_instead_of_panicking() {
        let config = DispatchConfig::new().interval(Duration::from_secs(u64::MAX / 2));
        assert_eq!(config.delay_for(1), Duration::from_secs(u64::MAX / 2));
        assert_eq!(config.delay_for(3), Duration::MAX);
    }
}
