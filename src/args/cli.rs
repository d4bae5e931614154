use clap::Parser;
use std::time::Duration;

use super::defaults::default_output_dir;
use super::parsers::{
    parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize, parse_rate_arg,
};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP load generator - bounded concurrency, optional pacing, per-phase timing and ApacheBench-style summaries."
)]
pub struct TesterArgs {
    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// Number of requests allowed in flight at once
    #[arg(
        long,
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Total number of requests to perform
    #[arg(
        long,
        short = 'n',
        default_value = "100",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP header in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Comma-separated headers (e.g. 'Key1:Value1,Key2:Value2')
    #[arg(long = "headers")]
    pub header_list: Option<String>,

    /// Request body sent with every request
    #[arg(long, short)]
    pub data: Option<String>,

    /// Target launch rate in requests per second
    #[arg(long, short = 'q', value_parser = parse_rate_arg)]
    pub qps: Option<f64>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Maximum redirects to follow (0 disables redirects)
    #[arg(long = "redirect", default_value = "10")]
    pub redirect_limit: u32,

    /// Open a fresh connection for every request
    #[arg(long = "disable-keepalive")]
    pub disable_keepalive: bool,

    /// Accept invalid TLS certificates and hostnames
    #[arg(long)]
    pub insecure: bool,

    /// Do not send the default User-Agent header
    #[arg(long = "no-ua")]
    pub no_ua: bool,

    /// Path to config file (TOML/JSON). Defaults to ./volley.toml or ./volley.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Directory the JSON result file is written to
    #[arg(long = "output-dir", short = 'o', default_value_t = default_output_dir())]
    pub output_dir: String,

    /// Print the summary without writing a result file
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Console rendering of the summary
    #[arg(long, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
