//! Quiz session engine.
//!
//! A session walks linearly through its own copy of the questions. Answers
//! are recorded per position and the correct tally is recomputed from them,
//! so re-answering a question before advancing never double-counts.

use chrono::{DateTime, Utc};

use crate::error::SessionError;
use crate::model::Question;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `current_index < total_questions`.
    InProgress,
    /// `current_index == total_questions`.
    Completed,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    HasMore,
    Finished,
}

/// One run through a chosen set of questions.
///
/// Only constructible through [`QuizSession::new`], which keeps `answers`
/// parallel to `questions`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    field_id: String,
    topic_id: String,
    subtopic_id: String,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    correct_answers: usize,
    total_questions: usize,
    completed: bool,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start a session over `questions`. An empty set starts completed.
    pub fn new(
        field_id: impl Into<String>,
        topic_id: impl Into<String>,
        subtopic_id: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        let total_questions = questions.len();
        Self {
            field_id: field_id.into(),
            topic_id: topic_id.into(),
            subtopic_id: subtopic_id.into(),
            answers: vec![None; total_questions],
            questions,
            current_index: 0,
            correct_answers: 0,
            total_questions,
            completed: total_questions == 0,
            started_at: Utc::now(),
        }
    }

    /// Override the recorded start time.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn subtopic_id(&self) -> &str {
        &self.subtopic_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The option chosen for question `index`, if any.
    pub fn answer_for(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> SessionState {
        if self.completed {
            SessionState::Completed
        } else {
            SessionState::InProgress
        }
    }

    /// The question at the current position, `None` once past the end.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Record `option_index` for the current question and report whether it
    /// is correct. Does not advance.
    ///
    /// Answering again overwrites the previous choice. Rejected calls leave
    /// the session untouched.
    pub fn answer(&mut self, option_index: usize) -> Result<bool, SessionError> {
        if self.completed {
            return Err(SessionError::Completed);
        }
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(SessionError::Completed)?;
        if option_index >= question.options.len() {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
                len: question.options.len(),
            });
        }

        let is_correct = question.is_correct(option_index);
        let slot = self
            .answers
            .get_mut(self.current_index)
            .ok_or(SessionError::Completed)?;
        *slot = Some(option_index);
        self.correct_answers = self.count_correct();
        Ok(is_correct)
    }

    /// Move to the next question. A no-op once completed.
    pub fn advance(&mut self) -> Progress {
        if self.completed {
            return Progress::Finished;
        }
        self.current_index += 1;
        if self.current_index >= self.total_questions {
            self.current_index = self.total_questions;
            self.completed = true;
            Progress::Finished
        } else {
            Progress::HasMore
        }
    }

    /// End the session early; unanswered questions stay unanswered.
    pub fn finish(&mut self) {
        self.current_index = self.total_questions;
        self.completed = true;
    }

    /// Correct answers as a percentage of all questions, `0.0` when empty.
    pub fn score_percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct_answers as f64 / self.total_questions as f64 * 100.0
    }

    /// Time since the session started.
    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.started_at
    }

    fn count_correct(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| matches!(a, Some(choice) if q.is_correct(*choice)))
            .count()
    }
}
