//! Answer tracking for a single survey session.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::error::AssessmentError;
use crate::models::{find_question, Question, Rating, RatingRecord, QUESTIONS, QUESTION_COUNT};

/// Partial answers collected during one pass through the survey.
///
/// Only validated ratings are stored, so the answered count and the
/// completeness check are always derived from valid numeric answers.
#[derive(Debug, Clone, Default)]
pub struct IntakeSession {
    answers: HashMap<&'static str, Rating>,
}

impl IntakeSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw answer for a question.
    ///
    /// Blank input clears the answer and returns `Ok(None)`. Invalid input
    /// is rejected and the previous answer is kept.
    pub fn answer(&mut self, id: &str, raw: &str) -> Result<Option<Rating>, AssessmentError> {
        let question = lookup(id)?;

        if raw.trim().is_empty() {
            self.answers.remove(question.id);
            return Ok(None);
        }

        let rating = Rating::parse(question.id, raw)?;
        self.answers.insert(question.id, rating);
        debug!("{} = {}", question.id, rating);
        Ok(Some(rating))
    }

    /// Records an already validated rating.
    pub fn set(&mut self, id: &str, rating: Rating) -> Result<(), AssessmentError> {
        let question = lookup(id)?;
        self.answers.insert(question.id, rating);
        Ok(())
    }

    /// Removes the answer for a question, if any.
    #[allow(dead_code)] // Utility for editing answers
    pub fn clear(&mut self, id: &str) {
        self.answers.remove(id);
    }

    /// Returns the current rating for a question.
    #[allow(dead_code)] // Utility accessor
    pub fn rating(&self, id: &str) -> Option<Rating> {
        self.answers.get(id).copied()
    }

    /// Number of questions holding a valid rating.
    pub fn answered_count(&self) -> usize {
        QUESTIONS
            .iter()
            .filter(|q| self.answers.contains_key(q.id))
            .count()
    }

    /// Number of questions still to answer.
    pub fn remaining(&self) -> usize {
        QUESTION_COUNT - self.answered_count()
    }

    /// Fraction of the survey answered, from 0.0 to 1.0.
    #[allow(dead_code)] // The terminal survey uses a position-based progress bar
    pub fn progress(&self) -> f64 {
        self.answered_count() as f64 / QUESTION_COUNT as f64
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == QUESTION_COUNT
    }

    /// Questions without an answer, in survey order.
    pub fn unanswered(&self) -> Vec<&'static Question> {
        QUESTIONS
            .iter()
            .filter(|q| !self.answers.contains_key(q.id))
            .collect()
    }

    /// Snapshot the answers as an immutable record.
    ///
    /// Fails with [`AssessmentError::IncompleteRecord`] until every question
    /// is answered; no partial record is ever produced.
    pub fn submit(&self) -> Result<RatingRecord, AssessmentError> {
        if !self.is_complete() {
            return Err(AssessmentError::IncompleteRecord {
                missing: self.unanswered().iter().map(|q| q.id.to_string()).collect(),
            });
        }

        let ratings: BTreeMap<String, Rating> = self
            .answers
            .iter()
            .map(|(id, rating)| (id.to_string(), *rating))
            .collect();
        Ok(RatingRecord::from_ratings(ratings))
    }

    /// Discards every answer.
    pub fn reset(&mut self) {
        self.answers.clear();
    }
}

fn lookup(id: &str) -> Result<&'static Question, AssessmentError> {
    find_question(id).ok_or_else(|| AssessmentError::unknown_question(id))
}
