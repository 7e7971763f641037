pub mod commands;
pub mod report;

pub use report::{render_summary, OutputFormat};
