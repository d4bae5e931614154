use crate::domain::{ClientOptions, LoadTestConfig};
use crate::error::{AppError, AppResult, ValidationError};

use super::cli::TesterArgs;
use super::defaults::DEFAULT_USER_AGENT;
use super::parsers::parse_header_list;

impl TesterArgs {
    /// Builds the run configuration from parsed (and config-merged) arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or the compact header list is
    /// malformed.
    pub fn load_config(&self) -> AppResult<LoadTestConfig> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;

        let mut headers = self.headers.clone();
        if let Some(list) = self.header_list.as_deref() {
            headers.extend(parse_header_list(list)?);
        }

        let user_agent = if self.no_ua {
            None
        } else {
            Some(DEFAULT_USER_AGENT.to_owned())
        };

        Ok(LoadTestConfig {
            url,
            concurrency: self.concurrency,
            total_requests: self.requests,
            method: self.method,
            headers,
            body: self.data.clone(),
            rate: self.qps,
            client: ClientOptions {
                request_timeout: self.request_timeout,
                connect_timeout: self.connect_timeout,
                redirect_limit: self.redirect_limit,
                disable_keepalive: self.disable_keepalive,
                insecure: self.insecure,
                user_agent,
            },
        })
    }
}
