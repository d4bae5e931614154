use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, OutputFormat, parse_duration_value};
use crate::error::ValidationError;

/// Keys accepted in `volley.toml` / `volley.json`. Every key is optional and
/// mirrors the CLI flag of the same name.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    #[serde(alias = "connections")]
    pub concurrency: Option<usize>,
    pub requests: Option<u64>,
    pub method: Option<HttpMethod>,
    pub headers: Option<Vec<String>>,
    pub data: Option<String>,
    #[serde(alias = "rate")]
    pub qps: Option<f64>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub redirect: Option<u32>,
    pub disable_keepalive: Option<bool>,
    pub insecure: Option<bool>,
    pub no_ua: Option<bool>,
    pub output_dir: Option<String>,
    pub no_save: Option<bool>,
    pub format: Option<OutputFormat>,
    pub no_color: Option<bool>,
}

/// A duration given either as whole seconds or as text such as `"250ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
