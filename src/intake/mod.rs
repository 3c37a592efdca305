//! Rating intake.
//!
//! Collects one rating per question, either interactively or from
//! answers files and command-line flags, and hands out a complete
//! record on submission.

pub mod answers;
pub mod prompt;
pub mod session;

pub use answers::{apply_answers, load_answers_file, parse_rating_flag};
pub use prompt::{confirm, progress_bar, run_survey, SurveyOutcome};
pub use session::IntakeSession;
