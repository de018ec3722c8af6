//! # loadping
//!
//! Fires a short, fixed burst of HTTP GET requests at one URL and prints
//! what comes back. Ten requests, one second apart, each in its own task:
//!
//! ```text
//!  t=0s   t=1s   t=2s          t=9s
//!   │      │      │             │
//!   GET    GET    GET    ...    GET      ──► target URL
//!   │      │      │             │
//!   └──────┴──────┴─────────────┴──► one line per outcome, in completion order
//!                                     "Response: <body>"  (stdout)
//!                                     "Error: <message>"  (stderr)
//! ```
//!
//! A failed request is reported and forgotten; it never delays or cancels
//! the others, and nothing is retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use loadping::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = DispatchConfig::new().url("http://localhost:8080/health");
//!     let dispatcher = Dispatcher::new(config)?;
//!
//!     let outcomes = dispatcher.run().await;
//!     assert_eq!(outcomes.len(), 10);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod http;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::http::{
        Fetch, HyperFetcher, InvalidUrl, OutputStream, RequestOutcome, TransportError,
        TransportErrorKind,
    };
    pub use crate::runtime::{DispatchConfig, Dispatcher, DEFAULT_URL};
    pub use async_trait::async_trait;
}

pub use http::{RequestOutcome, TransportError};
pub use runtime::{DispatchConfig, Dispatcher};
