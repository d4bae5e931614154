//! Console and file rendering of a finished run.
mod output;
mod text;

#[cfg(test)]
mod tests;

pub use output::{output_file_name, render_json, write_summary};
pub use text::render_text;
