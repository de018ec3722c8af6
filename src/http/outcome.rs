//! Result of one scheduled request.

use crate::http::TransportError;
use bytes::Bytes;
use std::time::Duration;

/// Console stream an outcome line belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// What happened to a single request.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// Position in the schedule, starting at 0.
    pub index: usize,
    /// Time between the start of the run and the moment the request was sent.
    pub dispatched_after: Duration,
    /// The full response body, or the transport failure.
    pub result: Result<Bytes, TransportError>,
}

impl RequestOutcome {
    /// Create a new outcome for request `index`.
    pub fn new(index: usize, dispatched_after: Duration, result: Result<Bytes, TransportError>) -> Self {
        Self {
            index,
            dispatched_after,
            result,
        }
    }

    /// Whether a response arrived, whatever its status.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Response body as text, if a response arrived.
    pub fn body_text(&self) -> Option<String> {
        self.result
            .as_ref()
            .ok()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Console line for this outcome.
    pub fn line(&self) -> String {
        match &self.result {
            Ok(body) => format!("Response: {}", String::from_utf8_lossy(body)),
            Err(err) => format!("Error: {}", err),
        }
    }

    /// Responses go to stdout, errors to stderr.
    pub fn stream(&self) -> OutputStream {
        match self.result {
            Ok(_) => OutputStream::Stdout,
            Err(_) => OutputStream::Stderr,
        }
    }

    /// Print the line on its stream.
    pub fn print(&self) {
        match self.stream() {
            OutputStream::Stdout => println!("{}", self.line()),
            OutputStream::Stderr => eprintln!("{}", self.line()),
        }
    }
}
