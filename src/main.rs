//! innovindex - Innovation Index self-assessment
//!
//! A CLI survey that collects eight 1-5 ratings across innovation
//! dimensions and reports the overall score, its category and the
//! key strengths and weaknesses.
//!
//! Exit codes:
//!   0 - Success (category at or above --fail-below, or no --fail-below set)
//!   1 - Error (invalid or incomplete ratings, config, I/O) or survey cancelled
//!   2 - Category below the --fail-below level

mod analysis;
mod cli;
mod config;
mod error;
mod intake;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, FailBelowLevel, OutputFormat};
use config::{Config, CONFIG_FILE};
use intake::{IntakeSession, SurveyOutcome};
use models::{Assessment, Category, RatingRecord, Report, ReportMetadata, QUESTIONS};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle the early-exit commands (no logging needed)
    if args.init_config {
        return handle_init_config();
    }
    if args.list_questions {
        print_questions();
        return Ok(());
    }

    // Load configuration before logging so `general.verbose` is honoured
    let (mut config, config_origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config)?;

    info!("innovindex v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config ({}): {:?}", config_origin, config);

    match run(&args, &config) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Assessment failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .innovindex.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the report format, insight counts and chart output.");
    Ok(())
}

/// Handle --list-questions.
fn print_questions() {
    for (i, q) in QUESTIONS.iter().enumerate() {
        println!("{}. {} ({})", i + 1, q.label, q.id);
        println!("   {}", q.text);
        println!("   {}", q.description);
    }
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so reports printed on stdout stay clean.
fn init_logging(args: &Args, config: &Config) -> Result<()> {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load configuration from file or use defaults. Also returns where it came from.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => Ok((config, CONFIG_FILE.to_string())),
        None => Ok((Config::default(), "defaults".to_string())),
    }
}

/// Run the assessment workflow. Returns the exit code.
fn run(args: &Args, config: &Config) -> Result<i32> {
    if args.is_interactive() {
        run_interactive(args, config)
    } else {
        run_batch(args, config)
    }
}

/// Score ratings supplied by answers file and/or --rating flags.
fn run_batch(args: &Args, config: &Config) -> Result<i32> {
    let mut session = IntakeSession::new();
    let mut sources = Vec::new();

    if let Some(ref path) = args.answers {
        let answers = intake::load_answers_file(path)?;
        intake::apply_answers(&mut session, &answers)
            .with_context(|| format!("Invalid answers in {}", path.display()))?;
        sources.push(path.display().to_string());
    }

    if !args.rating.is_empty() {
        let flags = args
            .rating
            .iter()
            .map(|flag| intake::parse_rating_flag(flag))
            .collect::<Result<Vec<_>>>()?;
        intake::apply_answers(&mut session, &flags).context("Invalid --rating value")?;
        sources.push("command line".to_string());
    }

    let record = session.submit()?;
    let report = assess(record, config, &sources.join(" + "))?;
    finish(args, config, &report)
}

/// Prompt for ratings on the terminal, offering a retake after each result.
fn run_interactive(args: &Args, config: &Config) -> Result<i32> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut session = IntakeSession::new();

    println!("💡 Innovation Index Toolkit");
    println!("   Assess your organization's innovation capabilities.");
    println!("   Rate each question from 1 (very poorly) to 5 (excellently well).");

    loop {
        let progress = intake::progress_bar()?;
        let record = match intake::run_survey(&mut input, &mut stdout, &mut session, &progress)? {
            SurveyOutcome::Submitted(record) => record,
            SurveyOutcome::Aborted => {
                println!(
                    "\nAssessment cancelled with {} of {} questions answered.",
                    session.answered_count(),
                    QUESTIONS.len()
                );
                return Ok(1);
            }
        };

        println!();
        let report = assess(record, config, "interactive")?;
        let exit_code = finish(args, config, &report)?;

        if args.once
            || !intake::confirm(&mut input, &mut stdout, "\nTake the assessment again?")?
        {
            return Ok(exit_code);
        }

        session.reset();
        info!("Starting a new assessment");
    }
}

/// Aggregate a submitted record into a report.
fn assess(record: RatingRecord, config: &Config, source: &str) -> Result<Report> {
    let assessment = analysis::aggregate_with(&record, &config.insight_limits())?;
    log_assessment(&assessment);

    Ok(Report {
        title: config.report.title.clone(),
        metadata: ReportMetadata {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            source: source.to_string(),
            questions_answered: record.len(),
        },
        ratings: record,
        assessment,
    })
}

fn log_assessment(assessment: &Assessment) {
    info!(
        "Overall score {:.2}/5.00 ({})",
        assessment.average, assessment.category
    );
    for insight in &assessment.strengths {
        debug!("Strength: {}", report::describe(insight));
    }
    for insight in &assessment.weaknesses {
        debug!("Weakness: {}", report::describe(insight));
    }
}

/// Render and deliver the report and chart, then apply --fail-below.
fn finish(args: &Args, config: &Config, report: &Report) -> Result<i32> {
    let format = config.format().unwrap_or_default();
    let rendered = match format {
        OutputFormat::Text => report::generate_text_report(report),
        OutputFormat::Markdown => report::generate_markdown_report(report),
        OutputFormat::Json => report::generate_json_report(report)?,
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Report saved to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;
        }
    }

    if let Some(ref chart) = config.report.chart {
        report::write_chart(&report.assessment, &report.title, Path::new(chart))?;
    }

    // Check --fail-below threshold
    if let Some(level) = args.fail_below {
        let threshold = fail_below_to_category(level);
        if report.assessment.category < threshold {
            warn!(
                "Category {} is below the required {}",
                report.assessment.category, threshold
            );
            eprintln!(
                "\n⛔ Category {} is below {}. Failing (exit code 2).",
                report.assessment.category, threshold
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Convert FailBelowLevel to Category for comparison.
fn fail_below_to_category(level: FailBelowLevel) -> Category {
    match level {
        FailBelowLevel::Moderate => Category::Moderate,
        FailBelowLevel::Strong => Category::Strong,
        FailBelowLevel::Excellence => Category::Excellence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn record(values: [&str; 8]) -> RatingRecord {
        let mut session = IntakeSession::new();
        for (q, v) in QUESTIONS.iter().zip(values) {
            session.answer(q.id, v).unwrap();
        }
        session.submit().unwrap()
    }

    #[test]
    fn test_assess_builds_report() {
        let report = assess(
            record(["5", "5", "4", "4", "3", "3", "2", "2"]),
            &Config::default(),
            "command line",
        )
        .unwrap();

        assert_eq!(report.title, "Innovation Assessment Results");
        assert_eq!(report.metadata.source, "command line");
        assert_eq!(report.metadata.questions_answered, 8);
        assert_eq!(report.assessment.category, Category::Strong);
        assert_eq!(report.assessment.strengths.len(), 2);
        assert_eq!(report.assessment.weaknesses.len(), 1);
    }

    #[test]
    fn test_assess_honours_insight_limits() {
        let mut config = Config::default();
        config.report.strengths = 4;
        config.report.weaknesses = 3;

        let report = assess(record(["3"; 8]), &config, "test").unwrap();
        assert_eq!(report.assessment.strengths.len(), 4);
        assert_eq!(report.assessment.weaknesses.len(), 3);
    }

    const WORKED_EXAMPLE: &str = r#"
problemSolving = 5
creativity = 5
resources = 4
collaboration = 4
implementation = 3
learning = 3
customerFocus = 2
adaptability = 2
"#;

    /// Run a batch assessment writing a JSON report into `dir`.
    fn run_batch_in(dir: &Path, extra: &[&str]) -> (i32, serde_json::Value) {
        let answers = dir.join("answers.toml");
        std::fs::write(&answers, WORKED_EXAMPLE).unwrap();
        let output = dir.join("report.json");

        let mut argv = vec![
            "innovindex".to_string(),
            "--answers".to_string(),
            answers.display().to_string(),
            "--format".to_string(),
            "json".to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));

        let args = Args::try_parse_from(argv).unwrap();
        assert!(args.validate().is_ok());
        let mut config = Config::default();
        config.merge_with_args(&args);

        let exit_code = run_batch(&args, &config).unwrap();
        let report = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        (exit_code, report)
    }

    #[test]
    fn test_rating_flags_override_answers_file() {
        let dir = tempfile::tempdir().unwrap();
        let (exit_code, report) = run_batch_in(dir.path(), &["-r", "creativity=1"]);

        assert_eq!(exit_code, 0);
        assert_eq!(report["ratings"]["creativity"], 1);
        assert_eq!(report["ratings"]["problemSolving"], 5);
        assert_eq!(report["assessment"]["average"], 3.0);
        assert!(report["metadata"]["source"]
            .as_str()
            .unwrap()
            .ends_with("command line"));
    }

    #[test]
    fn test_fail_below_exit_code() {
        let dir = tempfile::tempdir().unwrap();

        // 3.0 is Moderate, below Strong
        let (exit_code, report) =
            run_batch_in(dir.path(), &["-r", "creativity=1", "--fail-below", "strong"]);
        assert_eq!(report["assessment"]["category"], "Moderate");
        assert_eq!(exit_code, 2);

        // 3.5 is Strong, exactly at the threshold
        let (exit_code, report) = run_batch_in(dir.path(), &["--fail-below", "strong"]);
        assert_eq!(report["assessment"]["category"], "Strong");
        assert_eq!(exit_code, 0);

        let (exit_code, _) =
            run_batch_in(dir.path(), &["-r", "creativity=1", "--fail-below", "moderate"]);
        assert_eq!(exit_code, 0);
    }

    #[test]
    fn test_empty_rating_flag_is_rejected() {
        let args = Args::try_parse_from(["innovindex", "-r", "creativity="]).unwrap();
        let err = args.validate().unwrap_err();
        assert!(err.contains("missing a value"));
    }

    #[test]
    fn test_fail_below_mapping() {
        assert_eq!(fail_below_to_category(FailBelowLevel::Moderate), Category::Moderate);
        assert_eq!(fail_below_to_category(FailBelowLevel::Strong), Category::Strong);
        assert_eq!(
            fail_below_to_category(FailBelowLevel::Excellence),
            Category::Excellence
        );
        assert!(Category::Moderate < fail_below_to_category(FailBelowLevel::Strong));
    }
}
