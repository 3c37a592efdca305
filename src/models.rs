//! Data models for the innovation assessment.
//!
//! This module contains the fixed question set and the core data
//! structures that flow from intake through aggregation into reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::AssessmentError;

/// A single survey question describing one innovation dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Stable identifier used as the answer key.
    pub id: &'static str,
    /// Short human-readable dimension name.
    pub label: &'static str,
    /// The question prompt.
    pub text: &'static str,
    /// Guidance shown under the prompt.
    pub description: &'static str,
}

/// Number of questions in the survey.
pub const QUESTION_COUNT: usize = 8;

/// The fixed question set, in display and chart axis order.
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: "problemSolving",
        label: "Problem Solving",
        text: "How effectively does your organization identify and solve complex problems?",
        description: "Consider your organization's approach to problem identification and resolution processes.",
    },
    Question {
        id: "creativity",
        label: "Creativity",
        text: "To what extent does your organization encourage and support creative thinking?",
        description: "Evaluate the environment and support for new ideas and creative solutions.",
    },
    Question {
        id: "resources",
        label: "Resources",
        text: "How well does your organization allocate resources for innovation initiatives?",
        description: "Consider both financial and human resources dedicated to innovation.",
    },
    Question {
        id: "collaboration",
        label: "Collaboration",
        text: "How effectively do teams collaborate and share knowledge across the organization?",
        description: "Assess cross-functional teamwork and knowledge sharing practices.",
    },
    Question {
        id: "implementation",
        label: "Implementation",
        text: "How successfully does your organization implement new ideas and solutions?",
        description: "Evaluate the process of turning ideas into practical solutions.",
    },
    Question {
        id: "learning",
        label: "Learning",
        text: "How well does your organization learn from both successes and failures?",
        description: "Consider feedback loops and continuous improvement practices.",
    },
    Question {
        id: "customerFocus",
        label: "Customer Focus",
        text: "How effectively does your organization incorporate customer feedback into innovation?",
        description: "Assess customer input integration in the innovation process.",
    },
    Question {
        id: "adaptability",
        label: "Adaptability",
        text: "How quickly can your organization adapt to changing market conditions?",
        description: "Evaluate organizational agility and response to market changes.",
    },
];

/// Looks up a question by its identifier.
pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// A Likert rating from 1 (very poorly) to 5 (excellently well).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting values outside 1..=5.
    pub fn new(question: &str, value: i64) -> Result<Self, AssessmentError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(AssessmentError::invalid_rating(
                question,
                value.to_string(),
                format!("must be between {} and {}", Self::MIN, Self::MAX),
            ))
        }
    }

    /// Parses a rating from raw user input.
    ///
    /// Only whole numbers are accepted; `"4.5"`, `"four"` and `"0"` are
    /// all rejected rather than coerced.
    pub fn parse(question: &str, raw: &str) -> Result<Self, AssessmentError> {
        let trimmed = raw.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            AssessmentError::invalid_rating(question, trimmed, "not a whole number")
        })?;
        Self::new(question, value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the option label shown next to the value.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Very Poorly",
            2 => "Poorly",
            3 => "Adequately",
            4 => "Well",
            _ => "Excellently Well",
        }
    }

    /// All ratings in ascending order.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ratings keyed by question identifier.
///
/// A record is only valid for scoring once it is complete, i.e. every
/// question in [`QUESTIONS`] has a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RatingRecord {
    ratings: BTreeMap<String, Rating>,
}

impl RatingRecord {
    /// Wraps a set of validated ratings.
    pub fn from_ratings(ratings: BTreeMap<String, Rating>) -> Self {
        Self { ratings }
    }

    /// Returns the rating for a question.
    pub fn get(&self, id: &str) -> Option<Rating> {
        self.ratings.get(id).copied()
    }

    /// Number of ratings held.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Question identifiers that have no rating, in question order.
    pub fn missing(&self) -> Vec<String> {
        QUESTIONS
            .iter()
            .filter(|q| !self.ratings.contains_key(q.id))
            .map(|q| q.id.to_string())
            .collect()
    }

    /// Returns true when every question has a rating.
    pub fn is_complete(&self) -> bool {
        QUESTIONS.iter().all(|q| self.ratings.contains_key(q.id))
    }
}

/// Qualitative label for the overall average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Average below 2.5
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    /// Average from 2.5
    Moderate,
    /// Average from 3.5
    Strong,
    /// Average from 4.5
    Excellence,
}

impl Category {
    /// Maps an average to its category. Lower bounds are inclusive.
    pub fn from_average(average: f64) -> Self {
        if average >= 4.5 {
            Category::Excellence
        } else if average >= 3.5 {
            Category::Strong
        } else if average >= 2.5 {
            Category::Moderate
        } else {
            Category::NeedsImprovement
        }
    }

    /// Returns a marker for terminal and Markdown output.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Excellence => "🟢",
            Category::Strong => "🔵",
            Category::Moderate => "🟡",
            Category::NeedsImprovement => "🔴",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Excellence => write!(f, "Excellence"),
            Category::Strong => write!(f, "Strong"),
            Category::Moderate => write!(f, "Moderate"),
            Category::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// A dimension surfaced with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    /// Question identifier.
    pub question_id: String,
    /// Dimension label.
    pub label: String,
    /// Rating given for the dimension.
    pub score: Rating,
}

impl Insight {
    pub fn new(question: &Question, score: Rating) -> Self {
        Self {
            question_id: question.id.to_string(),
            label: question.label.to_string(),
            score,
        }
    }

    /// Phrase used when listing this insight as a strength.
    pub fn strength_text(&self) -> String {
        format!("Strong {} ({}/5)", self.label.to_lowercase(), self.score)
    }

    /// Phrase used when listing this insight as an improvement area.
    pub fn improvement_text(&self) -> String {
        format!("Improve {} ({}/5)", self.label.to_lowercase(), self.score)
    }
}

/// The scored result of a complete record.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Arithmetic mean of all ratings.
    pub average: f64,
    /// Category of the average.
    pub category: Category,
    /// Every dimension, in question order.
    pub scores: Vec<Insight>,
    /// Highest-rated dimensions.
    pub strengths: Vec<Insight>,
    /// Lowest-rated dimensions.
    pub weaknesses: Vec<Insight>,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Version of the tool that produced the report.
    pub tool_version: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Where the ratings came from.
    pub source: String,
    /// Number of questions answered.
    pub questions_answered: usize,
}

/// A complete assessment report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report heading.
    pub title: String,
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// The submitted ratings.
    pub ratings: RatingRecord,
    /// The scored result.
    pub assessment: Assessment,
}
