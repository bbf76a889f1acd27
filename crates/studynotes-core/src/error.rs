//! Recoverable error types.
//!
//! Each variant is a condition the caller is expected to surface to the end
//! user; none of them leave the underlying collection or session modified.

use thiserror::Error;

/// Errors returned by mutating catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No subject with the given id.
    #[error("subject not found: {0}")]
    SubjectNotFound(String),

    /// No topic with the given id.
    #[error("topic not found: {0}")]
    TopicNotFound(u32),

    /// The topic is the only one left in its subject.
    #[error("cannot delete the last remaining topic ({0})")]
    LastTopic(u32),

    /// Every topic id up to `u32::MAX` is already in use.
    #[error("no topic ids left to allocate")]
    IdsExhausted,
}

/// Errors returned by quiz construction, scoring, and progression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A quiz needs at least one question to be scored.
    #[error("quiz has no questions")]
    Empty,

    /// Two questions share an id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(u32),

    /// `correct_answer` does not index into `options`.
    #[error("question {question_id}: correct answer {correct_answer} is out of range for {options} option(s)")]
    CorrectAnswerOutOfRange {
        question_id: u32,
        correct_answer: usize,
        options: usize,
    },

    /// The chosen option does not exist on the current question.
    #[error("option {option} is out of range for {options} option(s)")]
    InvalidOption { option: usize, options: usize },

    /// "Next" was requested before an option was selected.
    #[error("select an option before moving on")]
    NoSelection,

    /// The attempt is already complete; restart to answer again.
    #[error("quiz already finished")]
    Finished,
}

impl QuizError {
    /// Returns `true` for errors raised by an in-progress session rather
    /// than by malformed quiz data.
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidOption { .. } | QuizError::NoSelection | QuizError::Finished
        )
    }
}

/// Errors from the grade calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    #[error("{field} must be between 0 and 10, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}
