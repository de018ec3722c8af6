//! HTTP side of the dispatcher: the GET client, per-request outcomes and errors.

pub mod client;
mod error;
mod outcome;

pub use client::{Fetch, HyperFetcher};
pub use error::{InvalidUrl, TransportError, TransportErrorKind};
pub use outcome::{OutputStream, RequestOutcome};
