//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod plan;
mod types;

#[cfg(test)]
mod tests;

pub use cli::TesterArgs;
pub use types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REDIRECT_LIMIT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::{parse_duration_value, parse_header, parse_rate};
