use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use reqwest::{Client, redirect};
use tracing::error;

use crate::domain::ClientOptions;
use crate::error::{AppError, AppResult, HttpError, TransportFault};

use super::transport::{HttpTransport, RequestSpec, ResponseStream};

/// [`HttpTransport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the client, keeping up to `pool_size` idle connections per host.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be built.
    pub fn new(options: &ClientOptions, pool_size: usize) -> AppResult<Self> {
        let mut client_builder = Client::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(pool_size);

        if let Some(user_agent) = options.user_agent.as_ref() {
            client_builder = client_builder.user_agent(user_agent.clone());
        }

        if options.redirect_limit == 0 {
            client_builder = client_builder.redirect(redirect::Policy::none());
        } else {
            client_builder = client_builder.redirect(redirect::Policy::limited(
                usize::try_from(options.redirect_limit).unwrap_or(10),
            ));
        }

        if options.disable_keepalive {
            client_builder = client_builder
                .pool_max_idle_per_host(0)
                .pool_idle_timeout(Some(Duration::from_secs(0)));
        }

        if options.insecure {
            client_builder = client_builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        let client = match client_builder.build() {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                return Err(AppError::http(HttpError::BuildClientFailed { source: e }));
            }
        };

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec) -> Result<Box<dyn ResponseStream>, TransportFault> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = request.body.as_ref() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|err| fault_from_reqwest(&err))?;
        Ok(Box::new(ReqwestResponse { response }))
    }
}

struct ReqwestResponse {
    response: reqwest::Response,
}

#[async_trait]
impl ResponseStream for ReqwestResponse {
    fn status(&self) -> StatusCode {
        self.response.status()
    }

    fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    async fn next_chunk(&mut self) -> Result<Option<u64>, TransportFault> {
        match self.response.chunk().await {
            Ok(Some(chunk)) => Ok(Some(u64::try_from(chunk.len()).unwrap_or(u64::MAX))),
            Ok(None) => Ok(None),
            Err(err) => Err(fault_from_reqwest(&err)),
        }
    }
}

/// Maps a `reqwest` failure onto the fault kinds the classifier understands.
///
/// Timeouts are checked first: a connect attempt that runs out of time is
/// reported by reqwest as both a connect and a timeout error.
pub(super) fn fault_from_reqwest(err: &reqwest::Error) -> TransportFault {
    let message = describe(err);
    if err.is_timeout() {
        TransportFault::Timeout { message }
    } else if err.is_connect() {
        TransportFault::Connect { message }
    } else if err.is_builder() {
        TransportFault::InvalidUrl { message }
    } else if err.is_body() || err.is_decode() {
        TransportFault::Payload { message }
    } else if err.is_request() {
        TransportFault::Io { message }
    } else {
        TransportFault::Other { message }
    }
}

fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message = format!("{}: {}", message, inner);
        source = inner.source();
    }
    message
}
