//! Core data model types for studynotes.
//!
//! These are the fundamental types the rest of the workspace uses to
//! represent subjects, topics, quiz questions, and scored attempts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single study unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Identifier, unique across the whole catalog.
    pub id: u32,
    /// Short display title.
    pub title: String,
    /// One-line summary shown under the title.
    #[serde(default)]
    pub description: String,
    /// Markdown body. Opaque to this crate.
    #[serde(default)]
    pub content: String,
    /// Free-form tags, in authoring order.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A topic that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTopic {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTopic {
    /// Attach an id, producing a full [`Topic`].
    pub fn with_id(self, id: u32) -> Topic {
        Topic {
            id,
            title: self.title,
            description: self.description,
            content: self.content,
            tags: self.tags,
        }
    }
}

/// A named grouping of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Slug identifier (e.g. "algoritmos-estruturas-dados").
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Topics owned by this subject, in display order.
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Subject {
    /// Look up one of this subject's topics by id.
    pub fn topic(&self, id: u32) -> Option<&Topic> {
        find_topic(&self.topics, id)
    }
}

/// Find a topic by id in any topic sequence.
pub fn find_topic(topics: &[Topic], id: u32) -> Option<&Topic> {
    topics.iter().find(|t| t.id == id)
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Identifier, unique within its quiz.
    pub id: u32,
    /// The prompt.
    pub question: String,
    /// Answer choices, addressed by 0-based index.
    pub options: Vec<String>,
    /// Index into `options` of the correct choice.
    pub correct_answer: usize,
    /// Shown to the user after grading.
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Whether `option` is the correct choice for this question.
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

/// The option a user picked for a given question.
///
/// Answers carry the question id so they cannot drift out of alignment when
/// questions are reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub option: usize,
}

impl Answer {
    pub fn new(question_id: u32, option: usize) -> Self {
        Self {
            question_id,
            option,
        }
    }
}

/// Score summary for a completed quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizResult {
    /// Same as `correct_answers`.
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    /// 0-100, rounded half up.
    pub percentage: u32,
}

impl QuizResult {
    /// Performance band for this result.
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_percentage(self.percentage)
    }
}

/// Coarse performance bands used when presenting a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    KeepStudying,
}

impl ScoreBand {
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= 90 {
            ScoreBand::Excellent
        } else if percentage >= 80 {
            ScoreBand::VeryGood
        } else if percentage >= 60 {
            ScoreBand::Good
        } else {
            ScoreBand::KeepStudying
        }
    }

    /// Encouragement line shown next to the score.
    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You have mastered the material.",
            ScoreBand::VeryGood => "Very good! Keep studying.",
            ScoreBand::Good => "Good. Review a few concepts.",
            ScoreBand::KeepStudying => "Keep studying, you can do it!",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "excellent"),
            ScoreBand::VeryGood => write!(f, "very-good"),
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::KeepStudying => write!(f, "keep-studying"),
        }
    }
}

/// Direction of travel through a displayed topic sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Previous => write!(f, "previous"),
            Direction::Next => write!(f, "next"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "previous" | "prev" => Ok(Direction::Previous),
            "next" => Ok(Direction::Next),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}
