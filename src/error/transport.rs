use thiserror::Error;

/// A failed HTTP exchange, tagged by where it went wrong.
///
/// Transports report faults through these variants so the classifier can map
/// them onto counters without inspecting client-specific error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportFault {
    #[error("Connection error: {message}")]
    Connect { message: String },
    #[error("OS error: {message}")]
    Io { message: String },
    #[error("Payload error: {message}")]
    Payload { message: String },
    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },
    #[error("Timeout error: {message}")]
    Timeout { message: String },
    #[error("Request failed: {message}")]
    Other { message: String },
}
