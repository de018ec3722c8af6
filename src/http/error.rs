//! Errors produced while talking to the target.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Nothing is listening on the target port.
    ConnectionRefused,
    /// The host name could not be resolved.
    Dns,
    /// The socket or the configured request timeout expired.
    TimedOut,
    /// The peer closed or reset the connection before the response completed.
    PrematureClose,
    /// Any other failure while establishing the connection.
    Connect,
    /// Anything else below the HTTP response level.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::ConnectionRefused => "connection refused",
            TransportErrorKind::Dns => "dns resolution failed",
            TransportErrorKind::TimedOut => "timed out",
            TransportErrorKind::PrematureClose => "connection closed prematurely",
            TransportErrorKind::Connect => "connect failed",
            TransportErrorKind::Other => "transport error",
        };
        write!(f, "{}", s)
    }
}

/// Failure of a single request below the HTTP response level.
///
/// These are reported and swallowed at the request boundary; they never
/// abort the run.
#[derive(Debug, Clone)]
pub struct TransportError {
    /// Classification of the failure.
    pub kind: TransportErrorKind,
    /// The underlying error and its source chain.
    pub message: String,
}

impl TransportError {
    /// Create a new TransportError.
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a timeout error for a request bounded by `after`.
    pub fn timed_out(after: std::time::Duration) -> Self {
        Self::new(
            TransportErrorKind::TimedOut,
            format!("no complete response within {:?}", after),
        )
    }

    /// Build a TransportError from an arbitrary error, classifying it by
    /// walking its source chain.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        Self::new(classify(err), chain_message(err))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for TransportError {}

impl From<hyper_util::client::legacy::Error> for TransportError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        let mut error = TransportError::from_error(&err);
        if error.kind == TransportErrorKind::Other && err.is_connect() {
            error.kind = TransportErrorKind::Connect;
        }
        error
    }
}

impl From<hyper::Error> for TransportError {
    fn from(err: hyper::Error) -> Self {
        TransportError::from_error(&err)
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        TransportError::from_error(&err)
    }
}

fn classify(err: &(dyn StdError + 'static)) -> TransportErrorKind {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<tokio::time::error::Elapsed>() {
            return TransportErrorKind::TimedOut;
        }
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return TransportErrorKind::ConnectionRefused,
                io::ErrorKind::TimedOut => return TransportErrorKind::TimedOut,
                io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::UnexpectedEof => return TransportErrorKind::PrematureClose,
                _ => {}
            }
        }
        if let Some(hyper_err) = e.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_canceled() {
                return TransportErrorKind::PrematureClose;
            }
            if hyper_err.is_timeout() {
                return TransportErrorKind::TimedOut;
            }
        }
        // HttpConnector reports resolver failures as "dns error"
        if e.to_string().starts_with("dns error") {
            return TransportErrorKind::Dns;
        }
        current = e.source();
    }
    TransportErrorKind::Other
}

fn chain_message(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        let text = e.to_string();
        // skip layers that already print their cause
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = e.source();
    }
    message
}

/// The target URL could not be parsed.
#[derive(Debug, Clone)]
pub struct InvalidUrl {
    /// The rejected input.
    pub url: String,
    /// Parser message.
    pub message: String,
}

impl InvalidUrl {
    /// Create a new InvalidUrl for `url`, explained by `err`.
    pub fn new(url: impl Into<String>, err: impl fmt::Display) -> Self {
        Self {
            url: url.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for InvalidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URL '{}': {}", self.url, self.message)
    }
}

impl StdError for InvalidUrl {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped {
        label: &'static str,
        inner: io::Error,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.label)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn refused_is_found_through_the_source_chain() {
        let err = Wrapped {
            label: "tcp connect error",
            inner: io::Error::new(io::ErrorKind::ConnectionRefused, "Connection refused"),
        };
        let transport = TransportError::from_error(&err);
        assert_eq!(transport.kind, TransportErrorKind::ConnectionRefused);
        assert_eq!(transport.message, "tcp connect error: Connection refused");
        assert_eq!(
            transport.to_string(),
            "connection refused: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn reset_and_eof_count_as_premature_close() {
        for kind in [io::ErrorKind::ConnectionReset, io::ErrorKind::UnexpectedEof] {
            let err: TransportError = io::Error::new(kind, "gone").into();
            assert_eq!(err.kind, TransportErrorKind::PrematureClose);
        }
    }

    #[test]
    fn dns_failure_is_recognised_by_connector_message() {
        let err = Wrapped {
            label: "dns error",
            inner: io::Error::new(io::ErrorKind::Other, "failed to lookup address information"),
        };
        assert_eq!(TransportError::from_error(&err).kind, TransportErrorKind::Dns);
    }

    #[test]
    fn unknown_errors_fall_back_to_other() {
        let err: TransportError = io::Error::new(io::ErrorKind::Other, "weird").into();
        assert_eq!(err.kind, TransportErrorKind::Other);
        assert_eq!(err.message, "weird");
    }

    #[test]
    fn timeout_message_names_the_bound() {
        let err = TransportError::timed_out(std::time::Duration::from_millis(250));
        assert_eq!(err.kind, TransportErrorKind::TimedOut);
        assert_eq!(err.to_string(), "timed out: no complete response within 250ms");
    }
}
