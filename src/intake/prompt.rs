//! Interactive terminal survey.
//!
//! Questions are asked in order. A blank line skips a question (it is
//! asked again on the next pass), `q` quits, and anything that is not a
//! rating from 1 to 5 is reported inline and asked again.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use tracing::{debug, info};

use super::IntakeSession;
use crate::models::{Question, Rating, RatingRecord, QUESTIONS, QUESTION_COUNT};

/// How an interactive survey ended.
#[derive(Debug)]
pub enum SurveyOutcome {
    /// Every question was answered.
    Submitted(RatingRecord),
    /// The user quit or input ended first.
    Aborted,
}

/// What the user did with a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Rated(Rating),
    Skipped,
    Quit,
}

/// Create the answered-questions progress bar.
pub fn progress_bar() -> Result<ProgressBar> {
    let pb = ProgressBar::new(QUESTION_COUNT as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:32.cyan/blue} {pos}/{len} questions answered")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Run the survey until every question is answered or the user quits.
pub fn run_survey<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    session: &mut IntakeSession,
    progress: &ProgressBar,
) -> Result<SurveyOutcome> {
    progress.set_position(session.answered_count() as u64);

    while !session.is_complete() {
        for question in session.unanswered() {
            match ask_question(input, output, question)? {
                Reply::Rated(rating) => {
                    session.set(question.id, rating)?;
                    progress.set_position(session.answered_count() as u64);
                }
                Reply::Skipped => {
                    debug!("Skipped {}", question.id);
                }
                Reply::Quit => {
                    info!("Survey aborted with {} answer(s)", session.answered_count());
                    progress.abandon();
                    return Ok(SurveyOutcome::Aborted);
                }
            }
        }

        if !session.is_complete() {
            writeln!(
                output,
                "\n{} question(s) remaining.",
                session.remaining()
            )?;
        }
    }

    progress.finish();
    Ok(SurveyOutcome::Submitted(session.submit()?))
}

/// Ask one question until a valid reply is given.
fn ask_question<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &Question,
) -> Result<Reply> {
    let position = QUESTIONS
        .iter()
        .position(|q| q.id == question.id)
        .map_or(0, |i| i + 1);

    writeln!(output, "\n[{}/{}] {}", position, QUESTION_COUNT, question.text)?;
    writeln!(output, "      {}", question.description)?;
    for rating in Rating::all() {
        writeln!(output, "      {} - {}", rating, rating.label())?;
    }

    loop {
        write!(output, "   Rating (1-5, blank to skip, q to quit): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Reply::Quit);
        }

        let reply = line.trim();
        if reply.is_empty() {
            return Ok(Reply::Skipped);
        }
        if reply.eq_ignore_ascii_case("q") || reply.eq_ignore_ascii_case("quit") {
            return Ok(Reply::Quit);
        }

        match Rating::parse(question.id, reply) {
            Ok(rating) => return Ok(Reply::Rated(rating)),
            Err(e) => writeln!(output, "   ⚠️  Please select a rating: {}", e)?,
        }
    }
}

/// Ask a yes/no question; anything but `y`/`yes` (or end of input) is no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{} [y/N]: ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }

    let reply = line.trim();
    Ok(reply.eq_ignore_ascii_case("y") || reply.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str, session: &mut IntakeSession) -> (SurveyOutcome, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome =
            run_survey(&mut input, &mut output, session, &ProgressBar::hidden()).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_full_survey_submits() {
        let mut session = IntakeSession::new();
        let (outcome, output) = run("5\n5\n4\n4\n3\n3\n2\n2\n", &mut session);

        match outcome {
            SurveyOutcome::Submitted(record) => {
                assert!(record.is_complete());
                assert_eq!(record.get("adaptability").map(|r| r.value()), Some(2));
            }
            SurveyOutcome::Aborted => panic!("survey should have completed"),
        }
        assert!(output.contains("[1/8] How effectively does your organization identify"));
        assert!(output.contains("5 - Excellently Well"));
    }

    #[test]
    fn test_invalid_input_is_reasked() {
        let mut session = IntakeSession::new();
        let (outcome, output) = run("9\nabc\n5\n5\n4\n4\n3\n3\n2\n2\n", &mut session);

        assert!(matches!(outcome, SurveyOutcome::Submitted(_)));
        assert_eq!(output.matches("Please select a rating").count(), 2);
        assert_eq!(session.rating("problemSolving").map(|r| r.value()), Some(5));
    }

    #[test]
    fn test_skipped_question_is_asked_again() {
        let mut session = IntakeSession::new();
        // Skip problemSolving on the first pass, answer it on the second.
        let (outcome, output) = run("\n5\n4\n4\n3\n3\n2\n2\n1\n", &mut session);

        assert!(matches!(outcome, SurveyOutcome::Submitted(_)));
        assert!(output.contains("1 question(s) remaining."));
        assert_eq!(session.rating("problemSolving").map(|r| r.value()), Some(1));
    }

    #[test]
    fn test_quit_aborts_without_record() {
        let mut session = IntakeSession::new();
        let (outcome, _) = run("4\nq\n", &mut session);

        assert!(matches!(outcome, SurveyOutcome::Aborted));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn test_end_of_input_aborts() {
        let mut session = IntakeSession::new();
        let (outcome, _) = run("4\n4\n", &mut session);
        assert!(matches!(outcome, SurveyOutcome::Aborted));
    }

    #[test]
    fn test_confirm() {
        let mut output = Vec::new();
        assert!(confirm(&mut Cursor::new("y\n"), &mut output, "Again?").unwrap());
        assert!(confirm(&mut Cursor::new("YES\n"), &mut output, "Again?").unwrap());
        assert!(!confirm(&mut Cursor::new("n\n"), &mut output, "Again?").unwrap());
        assert!(!confirm(&mut Cursor::new(""), &mut output, "Again?").unwrap());
    }
}
