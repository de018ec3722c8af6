//! Request dispatcher.

use crate::http::{Fetch, HyperFetcher, InvalidUrl, RequestOutcome};
use crate::runtime::DispatchConfig;
use hyper::Uri;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

/// Stand-in deadline when a delay does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Schedules the GET requests of a run and reports their outcomes.
///
/// Request `i` is sent `i * interval` after [`Dispatcher::run`] starts, in
/// its own task, whether or not earlier requests have settled. Outcomes are
/// reported in the order they complete.
pub struct Dispatcher<F: Fetch = HyperFetcher> {
    /// Dispatch configuration.
    config: DispatchConfig,
    /// Target, parsed once up front.
    target: Uri,
    /// Shared by every request of the run.
    fetcher: Arc<F>,
}

impl Dispatcher<HyperFetcher> {
    /// Create a dispatcher that talks HTTP through hyper.
    pub fn new(config: DispatchConfig) -> Result<Self, InvalidUrl> {
        let fetcher = HyperFetcher::new().with_timeout(config.timeout);
        Self::with_fetcher(config, fetcher)
    }

    /// Create a dispatcher with the default configuration.
    pub fn with_defaults() -> Result<Self, InvalidUrl> {
        Self::new(DispatchConfig::default())
    }
}

impl<F: Fetch + 'static> Dispatcher<F> {
    /// Create a dispatcher around any fetcher.
    pub fn with_fetcher(config: DispatchConfig, fetcher: F) -> Result<Self, InvalidUrl> {
        let target = config.target()?;
        Ok(Self {
            config,
            target,
            fetcher: Arc::new(fetcher),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Get the parsed target.
    pub fn target(&self) -> &Uri {
        &self.target
    }

    /// Run the schedule, printing one line per outcome as it arrives.
    pub async fn run(&self) -> Vec<RequestOutcome> {
        self.run_with(|outcome| outcome.print()).await
    }

    /// Run the schedule, handing each outcome to `on_outcome` as it arrives.
    ///
    /// Returns once every request has settled, with the outcomes in
    /// completion order.
    pub async fn run_with<C>(&self, mut on_outcome: C) -> Vec<RequestOutcome>
    where
        C: FnMut(&RequestOutcome),
    {
        let requests = self.config.requests;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();

        info!(
            "Dispatching {} GET requests to {} every {:?}",
            requests, self.target, self.config.interval
        );

        for index in 0..requests {
            let tx = tx.clone();
            let fetcher = self.fetcher.clone();
            let target = self.target.clone();
            let deadline = start
                .checked_add(self.config.delay_for(index))
                .unwrap_or_else(|| start + FAR_FUTURE);

            tokio::spawn(async move {
                time::sleep_until(deadline).await;
                let dispatched_after = start.elapsed();
                debug!("Request {} sent after {:?}", index, dispatched_after);

                let result = fetcher.get(&target).await;
                if let Err(err) = &result {
                    warn!("Request {} failed: {}", index, err);
                }

                // receiver only goes away if the run itself was dropped
                let _ = tx.send(RequestOutcome::new(index, dispatched_after, result));
            });
        }
        drop(tx);

        let mut outcomes = Vec::with_capacity(requests);
        while let Some(outcome) = rx.recv().await {
            debug!(
                "Request {} settled after {:?}",
                outcome.index,
                start.elapsed()
            );
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            "All {} requests settled ({} failed) in {:?}",
            outcomes.len(),
            failed,
            start.elapsed()
        );
        outcomes
    }
}
