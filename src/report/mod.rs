//! Report rendering: text, Markdown and JSON reports plus the radar chart.

pub mod chart;
pub mod generator;

pub use chart::write_chart;
pub use generator::{
    describe, generate_json_report, generate_markdown_report, generate_text_report,
};
