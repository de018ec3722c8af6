//! Command-line surface.

use crate::runtime::{DispatchConfig, DEFAULT_URL};
use clap::Parser;
use std::time::Duration;

/// Send ten GET requests to a URL, one second apart, and print each
/// response body or error as it arrives.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// URL to request
    #[arg(default_value = DEFAULT_URL)]
    pub url: String,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Args {
    /// Build the dispatch configuration for this invocation.
    pub fn config(&self) -> DispatchConfig {
        let config = DispatchConfig::new().url(&self.url);
        match self.timeout {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}
