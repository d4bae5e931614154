use std::time::Duration;

use serde::Serialize;

/// Counter a transport fault is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    Connection,
    Read,
    InvalidUrl,
    Timeout,
    /// Counted in `failed_requests` only.
    Uncategorized,
}

impl FaultCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FaultCategory::Connection => "connection",
            FaultCategory::Read => "read",
            FaultCategory::InvalidUrl => "invalid_url",
            FaultCategory::Timeout => "timeout",
            FaultCategory::Uncategorized => "uncategorized",
        }
    }
}

/// Per-phase durations of one exchange.
///
/// `connect + wait + processing == total` up to clock resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseTimings {
    /// Issuance until the response head arrived.
    pub connect: Duration,
    /// Response head until the first body chunk.
    pub wait: Duration,
    /// First body chunk until the body was fully read.
    pub processing: Duration,
    pub total: Duration,
}

/// Measurements of one exchange that produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSample {
    pub timings: PhaseTimings,
    pub status: u16,
    pub body_bytes: u64,
    /// Body plus an estimate of the header block as sent on the wire.
    pub wire_bytes: u64,
    pub sent_bytes: u64,
    /// First token of the `Server` header, if one was sent.
    pub server: Option<String>,
}

impl RequestSample {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// What a single execution hands back to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionRecord {
    Response(RequestSample),
    Fault {
        category: FaultCategory,
        message: String,
    },
}

/// Static facts about the target, echoed into the summary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetInfo {
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub document_path: String,
    pub concurrency: usize,
    pub rate: Option<f64>,
}
