//! studynotes-core: Catalog, search, and quiz scoring.
//!
//! This crate defines the data model, the catalog query and editing
//! operations, quiz scoring, and the per-user overlay state that the rest of
//! studynotes builds on.

pub mod catalog;
pub mod error;
pub mod grades;
pub mod model;
pub mod overlay;
pub mod parser;
pub mod quiz;
pub mod report;

const BUILTIN_QUIZ: &str = include_str!("../data/quiz.toml");

/// The quiz shipped with the binary.
pub fn builtin_quiz() -> anyhow::Result<quiz::Quiz> {
    parser::parse_quiz_str(BUILTIN_QUIZ, std::path::Path::new("builtin-quiz.toml"))
}
