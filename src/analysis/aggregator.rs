//! Score aggregation and insight ranking.
//!
//! This module turns a complete rating record into an overall average,
//! a category label and the ranked strength/weakness callouts.

use crate::error::AssessmentError;
use crate::models::{Assessment, Category, Insight, RatingRecord, QUESTIONS};
use tracing::debug;

/// How many insights to surface on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightLimits {
    pub strengths: usize,
    pub weaknesses: usize,
}

impl Default for InsightLimits {
    fn default() -> Self {
        Self {
            strengths: 2,
            weaknesses: 1,
        }
    }
}

/// Aggregate a record with the default insight counts (two strengths, one weakness).
#[allow(dead_code)] // The binary always passes configured limits
pub fn aggregate(record: &RatingRecord) -> Result<Assessment, AssessmentError> {
    aggregate_with(record, &InsightLimits::default())
}

/// Aggregate a record, surfacing the requested number of insights.
///
/// Fails with [`AssessmentError::IncompleteRecord`] unless every question
/// has a rating; a partial record is never averaged.
pub fn aggregate_with(
    record: &RatingRecord,
    limits: &InsightLimits,
) -> Result<Assessment, AssessmentError> {
    let scores = dimension_scores(record)?;

    let average = average_score(&scores);
    let category = Category::from_average(average);
    debug!("Average {:.3} -> {}", average, category);

    Ok(Assessment {
        average,
        category,
        strengths: top_strengths(&scores, limits.strengths),
        weaknesses: top_weaknesses(&scores, limits.weaknesses),
        scores,
    })
}

/// Collect one insight per question, in question order.
fn dimension_scores(record: &RatingRecord) -> Result<Vec<Insight>, AssessmentError> {
    let missing = record.missing();
    if !missing.is_empty() {
        return Err(AssessmentError::IncompleteRecord { missing });
    }

    QUESTIONS
        .iter()
        .map(|q| {
            record
                .get(q.id)
                .map(|rating| Insight::new(q, rating))
                .ok_or_else(|| AssessmentError::IncompleteRecord {
                    missing: vec![q.id.to_string()],
                })
        })
        .collect()
}

/// Arithmetic mean of the scores.
fn average_score(scores: &[Insight]) -> f64 {
    let sum: u32 = scores.iter().map(|i| u32::from(i.score.value())).sum();
    f64::from(sum) / scores.len() as f64
}

/// Highest scores first. Ties keep question order (`sort_by` is stable).
pub fn top_strengths(scores: &[Insight], n: usize) -> Vec<Insight> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(n);
    sorted
}

/// Lowest scores first. Ties keep question order.
pub fn top_weaknesses(scores: &[Insight], n: usize) -> Vec<Insight> {
    let mut sorted = scores.to_vec();
    sorted.sort_by_key(|i| i.score);
    sorted.truncate(n);
    sorted
}
