use super::*;
use crate::args::{HttpMethod, PositiveU64, PositiveUsize};
use crate::domain::LoadTestConfig;
use crate::metrics::{
    AccumulationState, ExecutionRecord, PhaseTimings, RequestSample, TargetInfo, TestSummary,
    summarize,
};
use std::time::Duration;
use tempfile::tempdir;

fn config() -> Result<LoadTestConfig, String> {
    let concurrency = PositiveUsize::try_from(5).map_err(|err| err.to_string())?;
    let total = PositiveU64::try_from(50).map_err(|err| err.to_string())?;
    Ok(LoadTestConfig::new("https://api.example.com:8443/v1/items", concurrency, total)
        .with_method(HttpMethod::Post))
}

fn target() -> TargetInfo {
    TargetInfo {
        hostname: Some("api.example.com".to_owned()),
        port: Some(8443),
        document_path: "/v1/items".to_owned(),
        concurrency: 5,
        rate: Some(10.0),
    }
}

fn populated_summary() -> TestSummary {
    let mut state = AccumulationState::new(2);
    for total_ms in [12, 18] {
        state.record(ExecutionRecord::Response(RequestSample {
            timings: PhaseTimings {
                connect: Duration::from_millis(total_ms - 2),
                wait: Duration::from_millis(1),
                processing: Duration::from_millis(1),
                total: Duration::from_millis(total_ms),
            },
            status: 200,
            body_bytes: 64,
            wire_bytes: 128,
            sent_bytes: 0,
            server: Some("gunicorn".to_owned()),
        }));
    }
    summarize(&state, Duration::from_millis(250), &target())
}

#[test]
fn output_file_name_uses_host_method_and_shape() -> Result<(), String> {
    let name = output_file_name(&config()?);
    if name != "api.example.com_POST_5concurrency_50requests.json" {
        return Err(format!("Unexpected file name {}", name));
    }
    Ok(())
}

#[test]
fn write_summary_creates_directory_and_json() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let out_dir = dir.path().join("outputs").join("cli");
    let path = write_summary(&out_dir, &config()?, &populated_summary())
        .map_err(|err| err.to_string())?;

    if path.parent() != Some(out_dir.as_path()) {
        return Err(format!("Unexpected output path {}", path.display()));
    }
    let content = std::fs::read_to_string(&path).map_err(|err| format!("read failed: {}", err))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| format!("invalid json: {}", err))?;
    if value.get("completed_requests").and_then(serde_json::Value::as_u64) != Some(2) {
        return Err(format!("Unexpected JSON {}", content));
    }
    if value.get("server_software").and_then(serde_json::Value::as_str) != Some("gunicorn") {
        return Err(format!("Unexpected server in {}", content));
    }
    Ok(())
}

#[test]
fn render_text_lists_labelled_fields() -> Result<(), String> {
    let text = render_text(&populated_summary());
    for expected in [
        "Server Software:        gunicorn",
        "Server Port:            8443",
        "Document Length:        64 bytes",
        "Complete requests:      2",
        "Error rate:             0.00%",
        "Requests per second:    8.00 [#/sec] (mean)",
        "Time per request:       15.000 [ms] (mean)",
        "Connection Times (ms)",
        "   50%      18.000",
    ] {
        if !text.contains(expected) {
            return Err(format!("Missing {:?} in report:\n{}", expected, text));
        }
    }
    if text.contains("100%") {
        return Err("p100 should not be rendered".to_owned());
    }
    Ok(())
}

#[test]
fn render_text_uses_placeholders_without_samples() -> Result<(), String> {
    let summary = summarize(&AccumulationState::preflight_failed(3), Duration::ZERO, &target());
    let text = render_text(&summary);
    if !text.contains("Server Software:        N/A") {
        return Err(format!("Expected N/A server software:\n{}", text));
    }
    if !text.contains("Total:             N/A") {
        return Err(format!("Expected N/A timing row:\n{}", text));
    }
    if !text.contains("Invalid URL errors:     3") {
        return Err(format!("Expected invalid URL count:\n{}", text));
    }
    Ok(())
}

#[test]
fn render_json_round_trips_counters() -> Result<(), String> {
    let json = render_json(&populated_summary()).map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&json).map_err(|err| format!("invalid json: {}", err))?;
    if value.get("percentiles").and_then(|table| table.get("100")).is_some() {
        return Err("p100 should not be serialized".to_owned());
    }
    if value.get("qps").and_then(serde_json::Value::as_f64) != Some(10.0) {
        return Err(format!("Unexpected qps in {}", json));
    }
    Ok(())
}
