//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

use crate::intake::parse_rating_flag;
use crate::models::QUESTION_COUNT;

/// innovindex - Innovation Index self-assessment
///
/// Rate your organization on eight innovation dimensions (1-5) and get an
/// overall score, a category and the key strengths and weaknesses.
/// Runs interactively unless ratings are given by file or flag.
///
/// Examples:
///   innovindex
///   innovindex --answers answers.toml --format markdown -o report.md
///   innovindex -r problemSolving=5,creativity=4,resources=3,collaboration=4 \
///              -r implementation=3,learning=4,customerFocus=2,adaptability=3
///   innovindex --answers answers.json --chart radar.svg --fail-below moderate
///   innovindex --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Answers file (TOML or JSON) mapping question ids to ratings
    #[arg(short, long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Rating for one question, as id=value (repeatable, comma-separated)
    ///
    /// Overrides the same question in --answers.
    #[arg(short, long, value_name = "ID=VALUE", value_delimiter = ',')]
    pub rating: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (text, markdown, json)
    ///
    /// Defaults to the config file setting, or text.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write an SVG radar chart of the scores
    #[arg(long, value_name = "FILE")]
    pub chart: Option<PathBuf>,

    /// Number of strengths to list (1-8)
    #[arg(long, value_name = "COUNT")]
    pub strengths: Option<usize>,

    /// Number of improvement areas to list (1-8)
    #[arg(long, value_name = "COUNT")]
    pub weaknesses: Option<usize>,

    /// Fail if the overall category is below this level
    ///
    /// Useful in scripts. Exit code 2 when the score falls short.
    /// Values: moderate, strong, excellence
    #[arg(long, value_name = "LEVEL")]
    pub fail_below: Option<FailBelowLevel>,

    /// Interactive mode: exit after one assessment instead of offering a retake
    #[arg(long)]
    pub once: bool,

    /// Print the survey questions and exit
    #[arg(long)]
    pub list_questions: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .innovindex.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "INNOVINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .innovindex.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text for the terminal (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a format name as written in the config file.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Category level for --fail-below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum FailBelowLevel {
    Moderate,
    Strong,
    Excellence,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// True when no ratings were supplied and the survey should prompt.
    pub fn is_interactive(&self) -> bool {
        self.answers.is_none() && self.rating.is_empty()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for the early-exit commands
        if self.init_config || self.list_questions {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        for (name, value) in [("strengths", self.strengths), ("weaknesses", self.weaknesses)] {
            if let Some(count) = value {
                if count == 0 || count > QUESTION_COUNT {
                    return Err(format!(
                        "--{} must be between 1 and {}",
                        name, QUESTION_COUNT
                    ));
                }
            }
        }

        if let Some(ref path) = self.answers {
            if !path.is_file() {
                return Err(format!("Answers file does not exist: {}", path.display()));
            }
        }

        for flag in &self.rating {
            parse_rating_flag(flag).map_err(|e| e.to_string())?;
        }

        if self.once && !self.is_interactive() {
            return Err("--once only applies to the interactive survey".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
