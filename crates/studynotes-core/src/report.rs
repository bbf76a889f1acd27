//! Quiz attempt reports with JSON persistence and markdown rendering.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Answer, QuizResult};
use crate::quiz::{Quiz, ReviewItem};

/// A finished quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the attempt finished.
    pub created_at: DateTime<Utc>,
    pub quiz_id: String,
    pub quiz_title: String,
    pub result: QuizResult,
    /// Per-question review, in question order.
    pub review: Vec<ReviewItem>,
}

impl QuizReport {
    /// Build a report for `answers` against `quiz`.
    pub fn new(quiz: &Quiz, answers: &[Answer]) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            result: quiz.score(answers),
            review: quiz.review(answers),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render as markdown.
    pub fn to_markdown(&self) -> String {
        let r = &self.result;
        let mut md = String::new();
        let _ = writeln!(md, "# {}\n", self.quiz_title);
        let _ = writeln!(
            md,
            "**{}%** ({} of {} correct) - {}\n",
            r.percentage,
            r.correct_answers,
            r.total_questions,
            r.band().message()
        );
        let _ = writeln!(md, "| Correct | Wrong | Total |");
        let _ = writeln!(md, "|---------|-------|-------|");
        let _ = writeln!(
            md,
            "| {} | {} | {} |\n",
            r.correct_answers, r.wrong_answers, r.total_questions
        );

        let _ = writeln!(md, "## Review\n");
        for (i, item) in self.review.iter().enumerate() {
            let mark = if item.is_correct { "correct" } else { "wrong" };
            let _ = writeln!(md, "{}. {} ({mark})", i + 1, item.question);
            let _ = writeln!(
                md,
                "   - Your answer: {}",
                item.chosen.as_deref().unwrap_or("(none)")
            );
            if !item.is_correct {
                let _ = writeln!(md, "   - Correct answer: {}", item.correct);
            }
            if !item.explanation.is_empty() {
                let _ = writeln!(md, "   - {}", item.explanation);
            }
        }
        md
    }
}
