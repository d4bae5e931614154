//! Request dispatch, execution and fault classification.
mod classify;
mod client;
mod dispatcher;
mod executor;
mod preflight;
mod rate;
mod transport;

#[cfg(test)]
mod test_support;

pub use classify::classify;
pub use client::ReqwestTransport;
pub use dispatcher::{run_load_test, run_with_transport};
pub use transport::{HttpTransport, RequestSpec, ResponseStream};
