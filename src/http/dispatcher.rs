use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::domain::LoadTestConfig;
use crate::error::AppResult;
use crate::metrics::{AccumulationState, ExecutionRecord, FaultCategory, TestSummary, summarize};

use super::client::ReqwestTransport;
use super::executor::execute;
use super::preflight::probe_target;
use super::rate::Pacer;
use super::transport::HttpTransport;

/// Runs a load test against `config.url` over a pooled `reqwest` client.
///
/// # Errors
///
/// Returns an error when the configuration is invalid or the HTTP client
/// cannot be built. Request failures never surface here; they are counted in
/// the summary.
pub async fn run_load_test(config: &LoadTestConfig) -> AppResult<TestSummary> {
    let transport = ReqwestTransport::new(&config.client, config.concurrency.get())?;
    run_with_transport(config, Arc::new(transport)).await
}

/// Runs a load test over the given transport.
///
/// The target is probed once first; if the probe fails no load is sent and
/// every requested unit is reported as an invalid-URL failure with zero
/// elapsed time. Otherwise exactly `total_requests` executions are launched
/// in order, at most `concurrency` of them in flight, optionally paced by
/// `config.rate`, and all of them are awaited before the summary is built.
///
/// # Errors
///
/// Returns an error when the URL, rate or headers fail validation.
pub async fn run_with_transport<T>(config: &LoadTestConfig, transport: Arc<T>) -> AppResult<TestSummary>
where
    T: HttpTransport + 'static,
{
    let url = config.target_url()?;
    let pacing = config.pacing_interval()?;
    let request = Arc::new(config.request_spec(url.clone())?);
    let target = config.target_info(&url);
    let total_requests = config.total_requests.get();

    if let Err(err) = probe_target(transport.as_ref(), &request).await {
        error!("{}", err);
        error!("Invalid or unresponsive URL. Skipping load run.");
        let state = AccumulationState::preflight_failed(total_requests);
        return Ok(summarize(&state, Duration::ZERO, &target));
    }

    info!(
        "Starting {} {} requests against {} (concurrency {}).",
        total_requests,
        request.method,
        url,
        config.concurrency.get()
    );

    let permits = Arc::new(Semaphore::new(config.concurrency.get()));
    let mut pacer = pacing.map(Pacer::new);
    let mut state = AccumulationState::new(total_requests);
    let mut tasks = JoinSet::new();
    let started_at = Instant::now();

    for index in 0..total_requests {
        if let Some(pacer) = pacer.as_ref() {
            pacer.wait().await;
        }
        let permit = match Arc::clone(&permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(err) => {
                error!("Permit pool closed after {} launches: {}", index, err);
                break;
            }
        };
        if let Some(pacer) = pacer.as_mut() {
            pacer.mark();
        }

        let transport = Arc::clone(&transport);
        let request = Arc::clone(&request);
        tasks.spawn(async move {
            let record = execute(transport.as_ref(), &request).await;
            drop(permit);
            record
        });

        while let Some(joined) = tasks.try_join_next() {
            state.record(joined_record(joined));
        }
    }

    debug!("All requests launched; waiting for {} in flight.", tasks.len());
    while let Some(joined) = tasks.join_next().await {
        state.record(joined_record(joined));
    }
    let elapsed = started_at.elapsed();

    info!(
        "Finished in {:.3}s: {} completed, {} failed.",
        elapsed.as_secs_f64(),
        state.completed_requests(),
        state.failed_requests()
    );

    Ok(summarize(&state, elapsed, &target))
}

fn joined_record(joined: Result<ExecutionRecord, JoinError>) -> ExecutionRecord {
    joined.unwrap_or_else(|err| {
        error!("Request task failed: {}", err);
        ExecutionRecord::Fault {
            category: FaultCategory::Uncategorized,
            message: format!("Request task failed: {}", err),
        }
    })
}
