use http::StatusCode;
use thiserror::Error;

use crate::error::TransportFault;

use super::transport::{HttpTransport, RequestSpec};

#[derive(Debug, Error)]
pub(super) enum ProbeFailure {
    #[error("URL check failed with status: {0}")]
    Status(StatusCode),
    #[error("URL check failed: {0}")]
    Fault(#[from] TransportFault),
}

/// Sends one probe request and reads its body to the end.
///
/// Any status of 400 or above fails the probe; redirects are left to the
/// client's redirect policy.
pub(super) async fn probe_target<T>(transport: &T, request: &RequestSpec) -> Result<(), ProbeFailure>
where
    T: HttpTransport + ?Sized,
{
    let mut response = transport.send(&request.probe()).await?;
    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(ProbeFailure::Status(status));
    }
    while response.next_chunk().await?.is_some() {}
    Ok(())
}
