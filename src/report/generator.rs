//! Report generation.
//!
//! This module renders an assessment report as terminal text, Markdown
//! or JSON.

use anyhow::Result;

use crate::models::{Assessment, Insight, Report, ReportMetadata, Rating};

const BAR_WIDTH: usize = 5;

/// Generate the plain-text report shown in the terminal.
pub fn generate_text_report(report: &Report) -> String {
    let assessment = &report.assessment;
    let mut output = String::new();

    output.push_str(&format!("{}\n", report.title));
    output.push_str(&format!("{}\n\n", "=".repeat(report.title.chars().count())));

    output.push_str(&format!(
        "Overall Innovation Score: {:.2}/5.00\n",
        assessment.average
    ));
    output.push_str(&format!(
        "Category: {} {}\n\n",
        assessment.category.emoji(),
        assessment.category
    ));

    output.push_str("Scores by Dimension:\n");
    let width = assessment
        .scores
        .iter()
        .map(|i| i.label.chars().count())
        .max()
        .unwrap_or(0);
    for insight in &assessment.scores {
        output.push_str(&format!(
            "  {:<width$}  {} {}/5\n",
            insight.label,
            score_bar(insight.score),
            insight.score,
            width = width
        ));
    }
    output.push('\n');

    output.push_str("Key Insights:\n");
    output.push_str(&insight_lines(assessment, "  "));

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.title));
    output.push_str("Your organization's innovation capability analysis.\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_score_section(&report.assessment));
    output.push_str(&generate_dimension_section(&report.assessment));
    output.push_str(&generate_insights_section(&report.assessment));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Questions Answered:** {}\n",
        metadata.questions_answered
    ));
    section.push('\n');

    section
}

/// Generate the overall score section.
fn generate_score_section(assessment: &Assessment) -> String {
    let mut section = String::new();

    section.push_str("## Overall Innovation Score\n\n");
    section.push_str(&format!(
        "**{:.2}** / 5.00 ({} {})\n\n",
        assessment.average,
        assessment.category.emoji(),
        assessment.category
    ));

    section
}

/// Generate the per-dimension score table.
fn generate_dimension_section(assessment: &Assessment) -> String {
    let mut section = String::new();

    section.push_str("## Scores by Dimension\n\n");
    section.push_str("| Dimension | Score | Rating |\n");
    section.push_str("|:---|:---:|:---|\n");

    for insight in &assessment.scores {
        section.push_str(&format!(
            "| {} | {}/5 | {} |\n",
            insight.label,
            insight.score,
            insight.score.label()
        ));
    }
    section.push('\n');

    section
}

/// Generate the key insights section.
fn generate_insights_section(assessment: &Assessment) -> String {
    let mut section = String::new();

    section.push_str("## Key Insights\n\n");
    section.push_str(&insight_lines(assessment, "- "));
    section.push('\n');

    section
}

fn insight_lines(assessment: &Assessment, prefix: &str) -> String {
    let mut lines = String::new();

    for insight in &assessment.strengths {
        lines.push_str(&format!("{}✓ {}\n", prefix, insight.strength_text()));
    }
    for insight in &assessment.weaknesses {
        lines.push_str(&format!("{}⚠ {}\n", prefix, insight.improvement_text()));
    }

    lines
}

fn score_bar(score: Rating) -> String {
    let filled = usize::from(score.value()).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by innovindex v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// One-line summary of an insight, used in logs.
pub fn describe(insight: &Insight) -> String {
    format!("{} ({}/5)", insight.label, insight.score)
}
