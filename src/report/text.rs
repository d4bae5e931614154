use std::time::Duration;

use crate::metrics::{TestSummary, TimingBreakdown};

const NOT_AVAILABLE: &str = "N/A";
const LABEL_WIDTH: usize = 24;

/// Renders the summary as an ApacheBench-style report.
#[must_use]
pub fn render_text(summary: &TestSummary) -> String {
    let mut lines = Vec::new();

    lines.push(field(
        "Server Software",
        summary.server_software.as_deref().unwrap_or(NOT_AVAILABLE),
    ));
    lines.push(field(
        "Server Hostname",
        summary.server_hostname.as_deref().unwrap_or(NOT_AVAILABLE),
    ));
    lines.push(field(
        "Server Port",
        &summary
            .server_port
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |port| port.to_string()),
    ));
    lines.push(String::new());
    lines.push(field("Document Path", &summary.document_path));
    lines.push(field(
        "Document Length",
        &format!("{} bytes", summary.document_length),
    ));
    lines.push(String::new());
    lines.push(field(
        "Concurrency Level",
        &summary.concurrency_level.to_string(),
    ));
    lines.push(field(
        "QPS",
        &summary
            .qps
            .map_or_else(|| "unlimited".to_owned(), |qps| format!("{:.2}", qps)),
    ));
    lines.push(field(
        "Time taken for tests",
        &format!("{:.3} seconds", summary.total_test_time.as_secs_f64()),
    ));
    lines.push(field(
        "Complete requests",
        &summary.completed_requests.to_string(),
    ));
    lines.push(field("Failed requests", &summary.failed_requests.to_string()));
    lines.push(field("Error rate", &summary.error_rate));
    lines.push(field(
        "Connection errors",
        &summary.connection_errors.to_string(),
    ));
    lines.push(field("Read errors", &summary.read_errors.to_string()));
    lines.push(field(
        "Status code errors",
        &summary.status_code_errors.to_string(),
    ));
    lines.push(field(
        "Invalid URL errors",
        &summary.invalid_url_errors.to_string(),
    ));
    lines.push(field("Timeout errors", &summary.timeout_errors.to_string()));
    lines.push(field(
        "Total transferred",
        &format!("{} bytes", summary.total_transferred),
    ));
    lines.push(field(
        "HTML transferred",
        &format!("{} bytes", summary.html_transferred),
    ));
    lines.push(field(
        "Total body sent",
        &format!("{} bytes", summary.total_body_sent),
    ));
    lines.push(field(
        "Requests per second",
        &format!("{:.2} [#/sec] (mean)", summary.requests_per_second),
    ));
    lines.push(field(
        "Time per request",
        &format!("{:.3} [ms] (mean)", millis(summary.time_per_request)),
    ));
    lines.push(field(
        "Transfer rate",
        &format!(
            "{:.2} [Kbytes/sec] received",
            summary.transfer_rate_received
        ),
    ));
    lines.push(format!(
        "{:width$}{:.2} kb/s sent",
        "",
        summary.transfer_rate_sent,
        width = LABEL_WIDTH
    ));
    lines.push(format!(
        "{:width$}{:.2} kb/s total",
        "",
        summary.transfer_rate_total,
        width = LABEL_WIDTH
    ));

    lines.push(String::new());
    lines.push("Connection Times (ms)".to_owned());
    lines.push(format!(
        "{:<12}{:>10}{:>10}{:>10}{:>10}",
        "", "min", "mean", "median", "max"
    ));
    lines.push(timing_row("Connect:", summary.connection_times.as_ref()));
    lines.push(timing_row("Processing:", summary.processing_times.as_ref()));
    lines.push(timing_row("Waiting:", summary.waiting_times.as_ref()));
    lines.push(timing_row("Total:", summary.total_times.as_ref()));

    lines.push(String::new());
    lines.push("Percentage of the requests served within a certain time (ms)".to_owned());
    match summary.percentiles.as_ref() {
        Some(table) if !table.is_empty() => {
            for (percent, latency) in table {
                lines.push(format!("{:>5}%{:>12.3}", percent, millis(*latency)));
            }
        }
        Some(_) | None => lines.push(format!("{:>6}", NOT_AVAILABLE)),
    }

    if !summary.errors.is_empty() {
        lines.push(String::new());
        lines.push(format!("Errors (first {}):", summary.errors.len()));
        for error in &summary.errors {
            lines.push(format!("  {}", error));
        }
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn field(label: &str, value: &str) -> String {
    format!(
        "{:<width$}{}",
        format!("{}:", label),
        value,
        width = LABEL_WIDTH
    )
}

fn timing_row(label: &str, breakdown: Option<&TimingBreakdown>) -> String {
    breakdown.map_or_else(
        || {
            format!(
                "{:<12}{:>10}{:>10}{:>10}{:>10}",
                label, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE
            )
        },
        |times| {
            format!(
                "{:<12}{:>10.3}{:>10.3}{:>10.3}{:>10.3}",
                label,
                millis(times.min),
                millis(times.mean),
                millis(times.median),
                millis(times.max)
            )
        },
    )
}

#[expect(
    clippy::float_arithmetic,
    reason = "Report columns are fractional milliseconds"
)]
fn millis(value: Duration) -> f64 {
    value.as_secs_f64() * 1_000.0
}
