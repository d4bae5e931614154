use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::args::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REDIRECT_LIMIT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
    HttpMethod, PositiveU64, PositiveUsize, parse_rate,
};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::RequestSpec;
use crate::metrics::TargetInfo;

/// HTTP client settings applied to every connection of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Zero disables redirects.
    pub redirect_limit: u32,
    pub disable_keepalive: bool,
    pub insecure: bool,
    pub user_agent: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            disable_keepalive: false,
            insecure: false,
            user_agent: Some(DEFAULT_USER_AGENT.to_owned()),
        }
    }
}

/// Everything one load test needs: target, load shape and request template.
#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub url: String,
    pub concurrency: PositiveUsize,
    pub total_requests: PositiveU64,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Launches per second; `None` launches as fast as permits allow.
    pub rate: Option<f64>,
    pub client: ClientOptions,
}

impl LoadTestConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, concurrency: PositiveUsize, total_requests: PositiveU64) -> Self {
        Self {
            url: url.into(),
            concurrency,
            total_requests,
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
            rate: None,
            client: ClientOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: ClientOptions) -> Self {
        self.client = client;
        self
    }

    /// Parses the target URL; parsing rejects a missing scheme, this also
    /// rejects a missing host.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the URL cannot be parsed or has no host.
    pub fn target_url(&self) -> AppResult<Url> {
        let url = Url::parse(self.url.trim()).map_err(|err| {
            AppError::validation(ValidationError::InvalidUrl {
                url: self.url.clone(),
                source: err,
            })
        })?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(AppError::validation(ValidationError::IncompleteUrl {
                url: self.url.clone(),
                part: "host",
            }));
        }
        Ok(url)
    }

    /// Minimum gap between two launches, derived from the configured rate.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the rate is not a finite positive number.
    pub fn pacing_interval(&self) -> AppResult<Option<Duration>> {
        let Some(rate) = self.rate else {
            return Ok(None);
        };
        let rate = parse_rate(rate)?;
        Duration::try_from_secs_f64(rate.recip())
            .map(Some)
            .map_err(|_err| AppError::validation(ValidationError::InvalidRate { value: rate }))
    }

    /// Builds the request template every execution sends.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a header name or value is not valid HTTP.
    pub fn request_spec(&self, url: Url) -> AppResult<RequestSpec> {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                AppError::validation(ValidationError::InvalidHeaderName {
                    header: key.clone(),
                    source: err,
                })
            })?;
            let val = HeaderValue::from_str(value).map_err(|err| {
                AppError::validation(ValidationError::InvalidHeaderValue {
                    header: key.clone(),
                    source: err,
                })
            })?;
            headers.append(name, val);
        }

        Ok(RequestSpec {
            method: self.method.into(),
            url,
            headers,
            body: self.body.clone().map(Bytes::from),
        })
    }

    #[must_use]
    pub fn target_info(&self, url: &Url) -> TargetInfo {
        TargetInfo {
            hostname: url.host_str().map(str::to_owned),
            port: url.port_or_known_default(),
            document_path: url.path().to_owned(),
            concurrency: self.concurrency.get(),
            rate: self.rate,
        }
    }
}
