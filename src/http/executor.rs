use http::HeaderMap;
use http::header::SERVER;
use tokio::time::Instant;
use tracing::{error, warn};

use crate::error::TransportFault;
use crate::metrics::{ExecutionRecord, PhaseTimings, RequestSample};

use super::classify::classify;
use super::transport::{HttpTransport, RequestSpec};

/// Bytes of framing added per header line: `": "` plus `"\r\n"`.
const HEADER_LINE_OVERHEAD: u64 = 4;

/// Performs one exchange and reports what happened.
///
/// Four instants are taken: issuance, response head received, first body
/// chunk received, body finished. An empty body uses the finish instant as
/// its first chunk. Faults are classified here and never propagate.
pub(super) async fn execute<T>(transport: &T, request: &RequestSpec) -> ExecutionRecord
where
    T: HttpTransport + ?Sized,
{
    let issued_at = Instant::now();
    let mut response = match transport.send(request).await {
        Ok(response) => response,
        Err(fault) => return fault_record(&fault),
    };
    let head_at = Instant::now();

    let status = response.status();
    let header_bytes = header_wire_bytes(response.headers());
    let server = server_token(response.headers());

    let mut first_chunk_at = None;
    let mut body_bytes: u64 = 0;
    loop {
        match response.next_chunk().await {
            Ok(Some(len)) => {
                if first_chunk_at.is_none() {
                    first_chunk_at = Some(Instant::now());
                }
                body_bytes = body_bytes.saturating_add(len);
            }
            Ok(None) => break,
            Err(fault) => return fault_record(&fault),
        }
    }
    let done_at = Instant::now();
    let first_chunk_at = first_chunk_at.unwrap_or(done_at);

    if !status.is_success() {
        warn!("Request failed with status: {}", status.as_u16());
    }

    ExecutionRecord::Response(RequestSample {
        timings: PhaseTimings {
            connect: head_at.saturating_duration_since(issued_at),
            wait: first_chunk_at.saturating_duration_since(head_at),
            processing: done_at.saturating_duration_since(first_chunk_at),
            total: done_at.saturating_duration_since(issued_at),
        },
        status: status.as_u16(),
        body_bytes,
        wire_bytes: body_bytes.saturating_add(header_bytes),
        sent_bytes: request.body_len(),
        server,
    })
}

fn fault_record(fault: &TransportFault) -> ExecutionRecord {
    error!("{}", fault);
    ExecutionRecord::Fault {
        category: classify(fault),
        message: fault.to_string(),
    }
}

/// Estimated size of the header block: `name: value\r\n` per header.
pub(super) fn header_wire_bytes(headers: &HeaderMap) -> u64 {
    headers.iter().fold(0u64, |acc, (name, value)| {
        let line = name.as_str().len().saturating_add(value.as_bytes().len());
        acc.saturating_add(u64::try_from(line).unwrap_or(u64::MAX))
            .saturating_add(HEADER_LINE_OVERHEAD)
    })
}

/// First space-separated token of the `Server` header.
pub(super) fn server_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SERVER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(' ').next())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
