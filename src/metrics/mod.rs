//! Result accumulation and the derived run summary.
mod accumulator;
mod serde_ms;
mod stats;
mod summary;
mod types;


pub use accumulator::{AccumulationState, MAX_ERROR_MESSAGES};
pub use stats::{PERCENTILE_CUTS, mean_duration, median, percentile_index, percentile_table};
pub use summary::{TestSummary, TimingBreakdown, summarize};
pub use types::{ExecutionRecord, FaultCategory, PhaseTimings, RequestSample, TargetInfo};
