//! Non-interactive answer sources: answers files and `--rating` flags.
//!
//! An answers file is a flat table mapping question identifiers to
//! ratings, in TOML or JSON:
//!
//! ```toml
//! problemSolving = 5
//! creativity = "4"
//! ```

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use super::IntakeSession;
use crate::error::AssessmentError;
use crate::models::QUESTION_COUNT;

/// A raw `(question id, value)` pair awaiting validation.
pub type RawAnswer = (String, String);

/// Load raw answers from a TOML or JSON file (picked by extension).
pub fn load_answers_file(path: &Path) -> Result<Vec<RawAnswer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        parse_json_answers(&content)
    } else {
        parse_toml_answers(&content)
    };
    let answers =
        parsed.with_context(|| format!("Failed to parse answers file: {}", path.display()))?;

    info!("Loaded {} answer(s) from {}", answers.len(), path.display());
    Ok(answers)
}

fn parse_json_answers(content: &str) -> Result<Vec<RawAnswer>> {
    let table: BTreeMap<String, serde_json::Value> = serde_json::from_str(content)?;
    Ok(table
        .into_iter()
        .map(|(id, value)| {
            let raw = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(f) if !n.is_i64() && !n.is_u64() => float_text(f),
                    _ => n.to_string(),
                },
                other => other.to_string(),
            };
            (id, raw)
        })
        .collect())
}

fn parse_toml_answers(content: &str) -> Result<Vec<RawAnswer>> {
    let table: BTreeMap<String, toml::Value> = toml::from_str(content)?;
    Ok(table
        .into_iter()
        .map(|(id, value)| {
            let raw = match value {
                toml::Value::String(s) => s,
                toml::Value::Float(f) => float_text(f),
                other => other.to_string(),
            };
            (id, raw)
        })
        .collect())
}

/// Whole-valued floats (`5.0`) read as the integer they hold.
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Parse a `--rating` flag of the form `id=value`.
pub fn parse_rating_flag(flag: &str) -> Result<RawAnswer> {
    let Some((id, value)) = flag.split_once('=') else {
        bail!("Rating '{}' must be in the form id=value", flag);
    };

    let id = id.trim();
    if id.is_empty() {
        bail!("Rating '{}' is missing a question id", flag);
    }

    let value = value.trim();
    if value.is_empty() {
        bail!("Rating '{}' is missing a value", flag);
    }

    Ok((id.to_string(), value.to_string()))
}

/// Feed raw answers into a session, stopping at the first invalid one.
pub fn apply_answers(session: &mut IntakeSession, answers: &[RawAnswer]) -> Result<(), AssessmentError> {
    for (id, raw) in answers {
        session.answer(id, raw)?;
    }
    debug!(
        "Session has {}/{} answers",
        session.answered_count(),
        QUESTION_COUNT
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_toml_answers() {
        let answers = parse_toml_answers(
            r#"
problemSolving = 5
creativity = "4"
"#,
        )
        .unwrap();

        assert_eq!(
            answers,
            vec![
                ("creativity".to_string(), "4".to_string()),
                ("problemSolving".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_json_answers() {
        let answers =
            parse_json_answers(r#"{"learning": 3, "adaptability": "2", "resources": null}"#)
                .unwrap();

        assert_eq!(answers.len(), 3);
        assert!(answers.contains(&("learning".to_string(), "3".to_string())));
        assert!(answers.contains(&("adaptability".to_string(), "2".to_string())));
        assert!(answers.contains(&("resources".to_string(), String::new())));
    }

    #[test]
    fn test_load_answers_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("answers.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        write!(file, r#"{{"creativity": 5}}"#).unwrap();
        assert_eq!(
            load_answers_file(&json_path).unwrap(),
            vec![("creativity".to_string(), "5".to_string())]
        );

        let toml_path = dir.path().join("answers.toml");
        std::fs::write(&toml_path, "creativity = 2\n").unwrap();
        assert_eq!(
            load_answers_file(&toml_path).unwrap(),
            vec![("creativity".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_load_answers_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_answers_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_parse_rating_flag() {
        assert_eq!(
            parse_rating_flag("creativity=4").unwrap(),
            ("creativity".to_string(), "4".to_string())
        );
        assert_eq!(
            parse_rating_flag(" learning = 2 ").unwrap(),
            ("learning".to_string(), "2".to_string())
        );
        assert!(parse_rating_flag("creativity").is_err());
        assert!(parse_rating_flag("=4").is_err());
    }

    #[test]
    fn test_parse_rating_flag_requires_value() {
        let err = parse_rating_flag("creativity=").unwrap_err();
        assert!(err.to_string().contains("missing a value"));
        assert!(parse_rating_flag("creativity=  ").is_err());
    }

    #[test]
    fn test_whole_floats_read_as_integers() {
        let answers = parse_json_answers(r#"{"problemSolving": 5.0, "learning": 3.5}"#).unwrap();
        assert!(answers.contains(&("problemSolving".to_string(), "5".to_string())));
        assert!(answers.contains(&("learning".to_string(), "3.5".to_string())));

        let answers = parse_toml_answers("creativity = 4.0\n").unwrap();
        assert_eq!(answers, vec![("creativity".to_string(), "4".to_string())]);

        let mut session = IntakeSession::new();
        apply_answers(&mut session, &answers).unwrap();
        assert_eq!(session.rating("creativity").map(|r| r.value()), Some(4));
        assert!(session.answer("learning", "3.5").is_err());
    }

    #[test]
    fn test_apply_answers_rejects_out_of_range() {
        let mut session = IntakeSession::new();
        let answers = vec![
            ("creativity".to_string(), "4".to_string()),
            ("learning".to_string(), "7".to_string()),
        ];

        let err = apply_answers(&mut session, &answers).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidRating { ref question, .. } if question == "learning"));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn test_apply_answers_later_values_override() {
        let mut session = IntakeSession::new();
        let answers = vec![
            ("creativity".to_string(), "4".to_string()),
            ("creativity".to_string(), "2".to_string()),
        ];

        apply_answers(&mut session, &answers).unwrap();
        assert_eq!(session.rating("creativity").map(|r| r.value()), Some(2));
    }
}
