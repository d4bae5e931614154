use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("volley-loadtest/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_REDIRECT_LIMIT: u32 = 10;

pub(crate) fn default_output_dir() -> String {
    "outputs/cli".to_owned()
}
