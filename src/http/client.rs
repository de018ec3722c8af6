//! GET client used by the dispatcher.

use crate::http::TransportError;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use http_body_util::{BodyExt, Empty};
use hyper::{Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tracing::trace;

/// Something that can GET a URL and hand back the full body.
///
/// The dispatcher only depends on this trait, so schedules can be
/// exercised without a network.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Send a GET to `uri` and return the accumulated response body.
    async fn get(&self, uri: &Uri) -> Result<Bytes, TransportError>;
}

/// Plain HTTP/1 fetcher backed by hyper's pooled client.
#[derive(Clone)]
pub struct HyperFetcher {
    client: Client<HttpConnector, Empty<Bytes>>,
    timeout: Option<Duration>,
}

impl HyperFetcher {
    /// Create a fetcher with no request timeout.
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            timeout: None,
        }
    }

    /// Bound every request, body included, by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn exchange(&self, uri: &Uri) -> Result<Bytes, TransportError> {
        let request = Request::get(uri.clone())
            .body(Empty::<Bytes>::new())
            .map_err(|e| TransportError::from_error(&e))?;

        let response = self.client.request(request).await?;
        trace!("{} answered {}", uri, response.status());

        let mut body = response.into_body();
        let mut buf = BytesMut::new();
        while let Some(frame) = body.frame().await {
            if let Ok(chunk) = frame?.into_data() {
                trace!("{} bytes from {}", chunk.len(), uri);
                buf.extend_from_slice(&chunk);
            }
        }

        Ok(buf.freeze())
    }
}

impl Default for HyperFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HyperFetcher {
    async fn get(&self, uri: &Uri) -> Result<Bytes, TransportError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(uri))
                .await
                .map_err(|_| TransportError::timed_out(limit))?,
            None => self.exchange(uri).await,
        }
    }
}
