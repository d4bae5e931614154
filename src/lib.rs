//! Core library for the `volley` CLI.
//!
//! `volley` fires a fixed number of HTTP requests at one target with bounded
//! concurrency and optional launch pacing, times every exchange by phase, and
//! folds the results into an ApacheBench-style [`TestSummary`]. The
//! [`run_load_test`] entry point drives a pooled `reqwest` client; any
//! [`http::HttpTransport`] can be plugged in through [`run_with_transport`].
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;

pub use domain::{ClientOptions, LoadTestConfig};
pub use error::{AppError, AppResult};
pub use http::{run_load_test, run_with_transport};
pub use metrics::TestSummary;
