use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use super::accumulator::AccumulationState;
use super::serde_ms;
use super::stats::{mean_duration, median, percentile_table};
use super::types::TargetInfo;

const BYTES_PER_KIB: f64 = 1_024.0;
/// Error rate is kept in hundredths of a percent.
const PERCENT_SCALE: u128 = 10_000;
const PERCENT_DIVISOR: u64 = 100;

/// Min/mean/median/max of one timing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingBreakdown {
    #[serde(serialize_with = "serde_ms::millis")]
    pub min: Duration,
    #[serde(serialize_with = "serde_ms::millis")]
    pub mean: Duration,
    #[serde(serialize_with = "serde_ms::millis")]
    pub median: Duration,
    #[serde(serialize_with = "serde_ms::millis")]
    pub max: Duration,
}

impl TimingBreakdown {
    /// `None` when there are no samples.
    #[must_use]
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        Some(Self {
            min: *sorted.first()?,
            mean: mean_duration(&sorted),
            median: median(&sorted)?,
            max: *sorted.last()?,
        })
    }
}

/// Final, immutable result of one run.
///
/// Durations serialize as fractional milliseconds, except `total_test_time`
/// which serializes as seconds. Transfer rates are KiB per second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSummary {
    pub server_software: Option<String>,
    pub server_hostname: Option<String>,
    pub server_port: Option<u16>,
    pub document_path: String,
    pub document_length: u64,
    pub concurrency_level: usize,
    pub qps: Option<f64>,
    pub total_requests: u64,
    pub completed_requests: u64,
    pub failed_requests: u64,
    /// Failed over total requests, e.g. `"12.50%"`.
    pub error_rate: String,
    pub connection_errors: u64,
    pub read_errors: u64,
    pub status_code_errors: u64,
    pub invalid_url_errors: u64,
    pub timeout_errors: u64,
    pub total_transferred: u64,
    pub html_transferred: u64,
    pub total_body_sent: u64,
    pub requests_per_second: f64,
    #[serde(serialize_with = "serde_ms::millis")]
    pub time_per_request: Duration,
    pub transfer_rate_received: f64,
    pub transfer_rate_sent: f64,
    pub transfer_rate_total: f64,
    #[serde(serialize_with = "serde_ms::seconds")]
    pub total_test_time: Duration,
    pub connection_times: Option<TimingBreakdown>,
    pub waiting_times: Option<TimingBreakdown>,
    pub processing_times: Option<TimingBreakdown>,
    pub total_times: Option<TimingBreakdown>,
    #[serde(serialize_with = "serde_ms::percentiles")]
    pub percentiles: Option<BTreeMap<u8, Duration>>,
    pub errors: Vec<String>,
}

/// Derives the run summary from frozen accumulation state.
///
/// Every rate uses `elapsed` as its denominator and is zero when `elapsed`
/// is zero.
#[must_use]
pub fn summarize(state: &AccumulationState, elapsed: Duration, target: &TargetInfo) -> TestSummary {
    let has_samples = !state.total_times.is_empty() && !state.connect_times.is_empty();
    let breakdown = |samples: &[Duration]| {
        if has_samples {
            TimingBreakdown::from_samples(samples)
        } else {
            None
        }
    };

    let percentiles = if has_samples {
        let mut sorted = state.total_times.clone();
        sorted.sort_unstable();
        Some(percentile_table(&sorted))
    } else {
        None
    };

    let bytes_total = state.bytes_received.saturating_add(state.bytes_sent);

    TestSummary {
        server_software: state.server_software.clone(),
        server_hostname: target.hostname.clone(),
        server_port: target.port,
        document_path: target.document_path.clone(),
        document_length: state.document_length.unwrap_or(0),
        concurrency_level: target.concurrency,
        qps: target.rate,
        total_requests: state.total_requests,
        completed_requests: state.completed_requests,
        failed_requests: state.failed_requests,
        error_rate: format_error_rate(state.failed_requests, state.total_requests),
        connection_errors: state.connection_errors,
        read_errors: state.read_errors,
        status_code_errors: state.status_code_errors,
        invalid_url_errors: state.invalid_url_errors,
        timeout_errors: state.timeout_errors,
        total_transferred: state.bytes_received,
        html_transferred: state.body_bytes_received,
        total_body_sent: state.bytes_sent,
        requests_per_second: per_second(state.completed_requests, elapsed),
        time_per_request: mean_duration(&state.total_times),
        transfer_rate_received: kib_per_second(state.bytes_received, elapsed),
        transfer_rate_sent: kib_per_second(state.bytes_sent, elapsed),
        transfer_rate_total: kib_per_second(bytes_total, elapsed),
        total_test_time: elapsed,
        connection_times: breakdown(&state.connect_times),
        waiting_times: breakdown(&state.wait_times),
        processing_times: breakdown(&state.processing_times),
        total_times: breakdown(&state.total_times),
        percentiles,
        errors: state.errors.clone(),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Throughput is reported as a fractional rate"
)]
fn per_second(value: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { value as f64 / secs } else { 0.0 }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Transfer rates are reported in fractional KiB/s"
)]
fn kib_per_second(bytes: u64, elapsed: Duration) -> f64 {
    per_second(bytes, elapsed) / BYTES_PER_KIB
}

/// Renders `failed / total` as a percentage rounded to two decimals.
pub(super) fn format_error_rate(failed: u64, total: u64) -> String {
    let rate_x100 = error_rate_x100(failed, total);
    format!(
        "{}.{:02}%",
        rate_x100 / PERCENT_DIVISOR,
        rate_x100 % PERCENT_DIVISOR
    )
}

const fn error_rate_x100(failed: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let total = total as u128;
    // Round half up: (2 * failed * scale + total) / (2 * total).
    let numerator = (failed as u128)
        .saturating_mul(PERCENT_SCALE)
        .saturating_mul(2)
        .saturating_add(total);
    let Some(scaled) = numerator.checked_div(total.saturating_mul(2)) else {
        return 0;
    };
    if scaled > u64::MAX as u128 {
        u64::MAX
    } else {
        scaled as u64
    }
}
