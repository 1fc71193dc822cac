//! CLI command implementations.

mod summarize;

pub use summarize::run_summarize;
