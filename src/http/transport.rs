use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::error::TransportFault;

/// The request every execution of a run sends.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RequestSpec {
    /// A body-less GET to the same target, carrying the same headers.
    #[must_use]
    pub fn probe(&self) -> Self {
        Self {
            method: Method::GET,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: None,
        }
    }

    #[must_use]
    pub fn body_len(&self) -> u64 {
        self.body
            .as_ref()
            .map_or(0, |body| u64::try_from(body.len()).unwrap_or(u64::MAX))
    }
}

/// Sends one request and hands back the response head.
///
/// Implementations must report failures through [`TransportFault`] so the
/// fault kinds stay distinguishable for classification.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and resolves once the response head has arrived.
    ///
    /// # Errors
    ///
    /// Returns a fault when the exchange fails before a response head is read.
    async fn send(&self, request: &RequestSpec) -> Result<Box<dyn ResponseStream>, TransportFault>;
}

/// A response whose body is still being read.
#[async_trait]
pub trait ResponseStream: Send {
    fn status(&self) -> StatusCode;

    fn headers(&self) -> &HeaderMap;

    /// Reads the next body chunk and returns its length, or `None` at the end.
    ///
    /// # Errors
    ///
    /// Returns a fault when reading the body fails.
    async fn next_chunk(&mut self) -> Result<Option<u64>, TransportFault>;
}
