mod app;
mod config;
mod http;
mod output;
mod transport;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use output::OutputError;
pub use transport::TransportFault;
pub use validation::ValidationError;
