use std::time::Duration;

use super::types::{ExecutionRecord, FaultCategory, RequestSample};

/// Number of error messages kept for the summary; later ones are only logged.
pub const MAX_ERROR_MESSAGES: usize = 100;

const UNKNOWN_SERVER: &str = "Unknown";

/// Mutable counters and samples for one run.
///
/// Every execution contributes exactly one record through [`record`], so
/// `completed_requests + failed_requests` always equals the number of records
/// seen.
///
/// [`record`]: AccumulationState::record
#[derive(Debug, Clone, Default)]
pub struct AccumulationState {
    pub(crate) total_requests: u64,
    pub(crate) completed_requests: u64,
    pub(crate) failed_requests: u64,
    pub(crate) connection_errors: u64,
    pub(crate) read_errors: u64,
    pub(crate) invalid_url_errors: u64,
    pub(crate) timeout_errors: u64,
    pub(crate) status_code_errors: u64,
    pub(crate) connect_times: Vec<Duration>,
    pub(crate) wait_times: Vec<Duration>,
    pub(crate) processing_times: Vec<Duration>,
    pub(crate) total_times: Vec<Duration>,
    pub(crate) bytes_received: u64,
    pub(crate) body_bytes_received: u64,
    pub(crate) bytes_sent: u64,
    pub(crate) server_software: Option<String>,
    pub(crate) document_length: Option<u64>,
    pub(crate) errors: Vec<String>,
}

impl AccumulationState {
    #[must_use]
    pub fn new(total_requests: u64) -> Self {
        Self {
            total_requests,
            ..Self::default()
        }
    }

    /// State for a run whose target failed the reachability probe: every
    /// requested unit is failed and attributed to the invalid-URL counter.
    #[must_use]
    pub fn preflight_failed(total_requests: u64) -> Self {
        Self {
            total_requests,
            failed_requests: total_requests,
            invalid_url_errors: total_requests,
            ..Self::default()
        }
    }

    pub fn record(&mut self, record: ExecutionRecord) {
        match record {
            ExecutionRecord::Response(sample) => self.record_response(&sample),
            ExecutionRecord::Fault { category, message } => self.record_fault(category, message),
        }
    }

    fn record_response(&mut self, sample: &RequestSample) {
        let timings = &sample.timings;
        self.connect_times.push(timings.connect);
        self.wait_times.push(timings.wait);
        self.processing_times.push(timings.processing);
        self.total_times.push(timings.total);

        self.bytes_received = self.bytes_received.saturating_add(sample.wire_bytes);
        self.body_bytes_received = self.body_bytes_received.saturating_add(sample.body_bytes);
        self.bytes_sent = self.bytes_sent.saturating_add(sample.sent_bytes);

        if self.server_software.is_none() {
            self.server_software = Some(
                sample
                    .server
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SERVER.to_owned()),
            );
        }

        if sample.is_success() {
            if self.document_length.is_none() {
                self.document_length = Some(sample.body_bytes);
            }
            self.completed_requests = self.completed_requests.saturating_add(1);
        } else {
            self.failed_requests = self.failed_requests.saturating_add(1);
            self.status_code_errors = self.status_code_errors.saturating_add(1);
            self.push_error(format!("Request failed with status: {}", sample.status));
        }
    }

    fn record_fault(&mut self, category: FaultCategory, message: String) {
        self.failed_requests = self.failed_requests.saturating_add(1);
        let counter = match category {
            FaultCategory::Connection => Some(&mut self.connection_errors),
            FaultCategory::Read => Some(&mut self.read_errors),
            FaultCategory::InvalidUrl => Some(&mut self.invalid_url_errors),
            FaultCategory::Timeout => Some(&mut self.timeout_errors),
            FaultCategory::Uncategorized => None,
        };
        if let Some(counter) = counter {
            *counter = counter.saturating_add(1);
        }
        self.push_error(message);
    }

    fn push_error(&mut self, message: String) {
        if self.errors.len() < MAX_ERROR_MESSAGES {
            self.errors.push(message);
        }
    }

    /// Records merged so far.
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.completed_requests.saturating_add(self.failed_requests)
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    #[must_use]
    pub const fn completed_requests(&self) -> u64 {
        self.completed_requests
    }

    #[must_use]
    pub const fn failed_requests(&self) -> u64 {
        self.failed_requests
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
