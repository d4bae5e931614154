use crate::error::TransportFault;
use crate::metrics::FaultCategory;

/// Maps a transport fault onto the single counter it increments.
///
/// `Io` and `Payload` faults both count as read errors; anything the
/// transport could not attribute lands in [`FaultCategory::Uncategorized`],
/// which only counts towards `failed_requests`.
#[must_use]
pub const fn classify(fault: &TransportFault) -> FaultCategory {
    match fault {
        TransportFault::Connect { .. } => FaultCategory::Connection,
        TransportFault::Io { .. } | TransportFault::Payload { .. } => FaultCategory::Read,
        TransportFault::InvalidUrl { .. } => FaultCategory::InvalidUrl,
        TransportFault::Timeout { .. } => FaultCategory::Timeout,
        TransportFault::Other { .. } => FaultCategory::Uncategorized,
    }
}
