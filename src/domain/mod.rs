//! Run configuration shared by the dispatcher and the front end.
mod run;


pub use run::{ClientOptions, LoadTestConfig};
