//! Quiz scoring and the one-question-at-a-time progression state machine.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Answer, QuizQuestion, QuizResult};

/// A validated, non-empty list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Build a quiz, checking that it has questions, that question ids are
    /// unique, and that every correct answer indexes into its options.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<QuizQuestion>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(QuizError::DuplicateQuestion(q.id));
            }
            if q.correct_answer >= q.options.len() {
                return Err(QuizError::CorrectAnswerOutOfRange {
                    question_id: q.id,
                    correct_answer: q.correct_answer,
                    options: q.options.len(),
                });
            }
        }

        Ok(Self {
            id: id.into(),
            title: title.into(),
            questions,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// A constructed quiz is never empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Score a set of answers. Never fails: a `Quiz` always has questions.
    pub fn score(&self, answers: &[Answer]) -> QuizResult {
        tally(answers, &self.questions)
    }

    /// Per-question breakdown of an attempt.
    pub fn review(&self, answers: &[Answer]) -> Vec<ReviewItem> {
        self.questions
            .iter()
            .map(|q| {
                let chosen = answer_for(answers, q.id);
                ReviewItem {
                    question_id: q.id,
                    question: q.question.clone(),
                    chosen: chosen.and_then(|i| q.options.get(i).cloned()),
                    correct: q.options[q.correct_answer].clone(),
                    is_correct: chosen.is_some_and(|i| q.is_correct(i)),
                    explanation: q.explanation.clone(),
                }
            })
            .collect()
    }
}

/// One row of an answer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question_id: u32,
    pub question: String,
    /// Text of the chosen option, `None` if unanswered.
    pub chosen: Option<String>,
    /// Text of the correct option.
    pub correct: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Score answers against a question list.
///
/// Each question is matched with the answer carrying its id; a question
/// without one counts as wrong. An empty question list is rejected.
pub fn calculate_quiz_result(
    answers: &[Answer],
    questions: &[QuizQuestion],
) -> Result<QuizResult, QuizError> {
    if questions.is_empty() {
        return Err(QuizError::Empty);
    }
    Ok(tally(answers, questions))
}

/// Pair positional option indices with the question ids they answer.
///
/// A list shorter than `questions` leaves the tail unanswered; extra entries
/// are dropped.
pub fn answers_from_positions(questions: &[QuizQuestion], options: &[usize]) -> Vec<Answer> {
    questions
        .iter()
        .zip(options)
        .map(|(q, &option)| Answer::new(q.id, option))
        .collect()
}

fn answer_for(answers: &[Answer], question_id: u32) -> Option<usize> {
    answers
        .iter()
        .find(|a| a.question_id == question_id)
        .map(|a| a.option)
}

fn tally(answers: &[Answer], questions: &[QuizQuestion]) -> QuizResult {
    let total = questions.len() as u32;
    let correct = questions
        .iter()
        .filter(|q| answer_for(answers, q.id).is_some_and(|option| q.is_correct(option)))
        .count() as u32;

    QuizResult {
        score: correct,
        total_questions: total,
        correct_answers: correct,
        wrong_answers: total - correct,
        percentage: percentage(correct, total),
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer math.
fn percentage(part: u32, whole: u32) -> u32 {
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Where an attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizState {
    /// Waiting on question `index`, with the option picked so far.
    Answering {
        index: usize,
        selected: Option<usize>,
    },
    /// Every question has been answered.
    Completed(QuizResult),
}

impl QuizState {
    const fn start() -> Self {
        QuizState::Answering {
            index: 0,
            selected: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, QuizState::Completed(_))
    }
}

/// Outcome of a successful [`QuizSession::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Question(usize),
    /// The last question was answered.
    Finished(QuizResult),
}

type CompletionCallback<'a> = Box<dyn FnMut(&QuizResult) + 'a>;

/// A single attempt at a quiz.
pub struct QuizSession<'a> {
    quiz: &'a Quiz,
    state: QuizState,
    answers: Vec<Answer>,
    on_complete: Option<CompletionCallback<'a>>,
}

impl fmt::Debug for QuizSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz", &self.quiz.id)
            .field("state", &self.state)
            .field("answers", &self.answers)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl<'a> QuizSession<'a> {
    pub fn new(quiz: &'a Quiz) -> Self {
        Self {
            quiz,
            state: QuizState::start(),
            answers: Vec::with_capacity(quiz.len()),
            on_complete: None,
        }
    }

    /// Register a callback invoked once when the attempt completes.
    pub fn on_complete(mut self, callback: impl FnMut(&QuizResult) + 'a) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn quiz(&self) -> &Quiz {
        self.quiz
    }

    /// Answers recorded so far, in question order.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// The question being answered, or `None` once completed.
    pub fn current_question(&self) -> Option<&'a QuizQuestion> {
        match self.state {
            QuizState::Answering { index, .. } => self.quiz.questions.get(index),
            QuizState::Completed(_) => None,
        }
    }

    /// Whether the current question is the last one.
    pub fn is_last_question(&self) -> bool {
        matches!(self.state, QuizState::Answering { index, .. } if index + 1 == self.quiz.len())
    }

    /// Percentage of the quiz reached, counting the current question.
    pub fn progress(&self) -> u32 {
        match self.state {
            QuizState::Answering { index, .. } => {
                percentage(index as u32 + 1, self.quiz.len() as u32)
            }
            QuizState::Completed(_) => 100,
        }
    }

    /// Pick an option for the current question. Picking again overrides.
    pub fn select(&mut self, option: usize) -> Result<(), QuizError> {
        let QuizState::Answering { index, .. } = self.state else {
            return Err(QuizError::Finished);
        };
        let options = self.quiz.questions[index].options.len();
        if option >= options {
            return Err(QuizError::InvalidOption { option, options });
        }
        self.state = QuizState::Answering {
            index,
            selected: Some(option),
        };
        Ok(())
    }

    /// Commit the selection and move to the next question, or finish.
    ///
    /// Without a selection this is rejected with [`QuizError::NoSelection`]
    /// and the state does not change.
    pub fn next(&mut self) -> Result<Advance, QuizError> {
        let (index, option) = match self.state {
            QuizState::Answering {
                index,
                selected: Some(option),
            } => (index, option),
            QuizState::Answering { selected: None, .. } => return Err(QuizError::NoSelection),
            QuizState::Completed(_) => return Err(QuizError::Finished),
        };

        let question = &self.quiz.questions[index];
        self.answers.push(Answer::new(question.id, option));

        if index + 1 < self.quiz.len() {
            self.state = QuizState::Answering {
                index: index + 1,
                selected: None,
            };
            return Ok(Advance::Question(index + 1));
        }

        let result = self.quiz.score(&self.answers);
        self.state = QuizState::Completed(result);
        tracing::debug!(
            quiz = %self.quiz.id,
            correct = result.correct_answers,
            total = result.total_questions,
            "quiz completed"
        );
        if let Some(callback) = self.on_complete.as_mut() {
            callback(&result);
        }
        Ok(Advance::Finished(result))
    }

    /// Start over from the first question with no answers.
    pub fn restart(&mut self) {
        self.state = QuizState::start();
        self.answers.clear();
    }

    /// Review of the attempt so far.
    pub fn review(&self) -> Vec<ReviewItem> {
        self.quiz.review(&self.answers)
    }
}
