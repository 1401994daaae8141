//! Finished-quiz results.
//!
//! A [`QuizResult`] is derived data: names, score, per-difficulty tallies and
//! the questions that were missed. It holds no reference back into the
//! repository or the session.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{Difficulty, Question};
use crate::session::QuizSession;

/// Display names for a field/topic/subtopic selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionNames {
    pub field_name: String,
    pub topic_name: String,
    pub subtopic_name: String,
}

/// Letter grade for a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::APlus
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::B
        } else if percentage >= 60.0 {
            Grade::C
        } else {
            Grade::D
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::APlus => write!(f, "A+"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
        }
    }
}

/// The outcome of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Unique result identifier.
    pub id: Uuid,
    /// When the result was produced.
    pub completed_at: DateTime<Utc>,
    pub field_name: String,
    pub topic_name: String,
    pub subtopic_name: String,
    /// Number of correctly answered questions.
    pub score: usize,
    pub total_questions: usize,
    /// `score / total_questions * 100`, or `0.0` for an empty quiz.
    pub percentage: f64,
    /// Elapsed time as `H:MM:SS`, when known.
    #[serde(default)]
    pub time_taken: Option<String>,
    /// Correct answers per difficulty; every level is present.
    pub difficulty_breakdown: BTreeMap<Difficulty, usize>,
    /// Full questions answered wrongly or left unanswered.
    pub incorrect_questions: Vec<Question>,
}

impl QuizResult {
    /// Package a completed session.
    pub fn from_session(
        session: &QuizSession,
        names: SelectionNames,
        time_taken: Option<String>,
    ) -> Result<Self, SessionError> {
        if !session.is_completed() {
            return Err(SessionError::NotCompleted);
        }

        let mut difficulty_breakdown: BTreeMap<Difficulty, usize> =
            Difficulty::ALL.iter().map(|&d| (d, 0)).collect();
        let mut incorrect_questions = Vec::new();

        for (i, question) in session.questions().iter().enumerate() {
            match session.answer_for(i) {
                Some(choice) if question.is_correct(choice) => {
                    *difficulty_breakdown.entry(question.difficulty).or_default() += 1;
                }
                _ => incorrect_questions.push(question.clone()),
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            completed_at: Utc::now(),
            field_name: names.field_name,
            topic_name: names.topic_name,
            subtopic_name: names.subtopic_name,
            score: session.correct_answers(),
            total_questions: session.total_questions(),
            percentage: session.score_percentage(),
            time_taken,
            difficulty_breakdown,
            incorrect_questions,
        })
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }

    /// Questions not answered correctly. Zero if a stored result claims
    /// more correct answers than questions.
    pub fn incorrect_count(&self) -> usize {
        self.total_questions.saturating_sub(self.score)
    }

    /// Correct answers at one difficulty level.
    pub fn correct_at(&self, difficulty: Difficulty) -> usize {
        self.difficulty_breakdown
            .get(&difficulty)
            .copied()
            .unwrap_or(0)
    }
}

/// Format a duration as `H:MM:SS`, prefixed with `N day(s), ` past a day.
/// Sub-second precision is dropped; negative durations clamp to zero.
pub fn format_elapsed(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize, difficulty: Difficulty) -> Question {
        Question {
            id: id.into(),
            question: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_option_index: correct,
            explanation: String::new(),
            option_explanations: vec![],
            difficulty,
            tags: vec![],
        }
    }

    fn names() -> SelectionNames {
        SelectionNames {
            field_name: "Data Science".into(),
            topic_name: "Machine Learning".into(),
            subtopic_name: "Linear Regression".into(),
        }
    }

    #[test]
    fn result_partitions_answers() {
        let mut s = QuizSession::new(
            "FLD_DSC",
            "TPC_MLG",
            "STC_LRG",
            vec![
                question("1", 1, Difficulty::Easy),
                question("2", 0, Difficulty::Hard),
                question("3", 2, Difficulty::Hard),
            ],
        );
        for choice in [1, 1, 2] {
            s.answer(choice).unwrap();
            s.advance();
        }

        let result = QuizResult::from_session(&s, names(), Some("0:01:05".into())).unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.total_questions, 3);
        assert!((result.percentage - 66.67).abs() < 0.01);
        assert_eq!(result.incorrect_questions.len(), 1);
        assert_eq!(result.incorrect_questions[0].id, "2");
        assert_eq!(result.correct_at(Difficulty::Easy), 1);
        assert_eq!(result.correct_at(Difficulty::Medium), 0);
        assert_eq!(result.correct_at(Difficulty::Hard), 1);
        assert_eq!(result.difficulty_breakdown.len(), 3);
        assert_eq!(result.grade(), Grade::C);
        assert_eq!(result.incorrect_count(), 1);
    }

    #[test]
    fn inconsistent_stored_counts_do_not_underflow() {
        let json = r#"{
  "id": "6f1c2a8e-3b4d-4c5e-9f60-718293a4b5c6",
  "completed_at": "2026-01-01T00:00:00Z",
  "field_name": "Data Science",
  "topic_name": "Machine Learning",
  "subtopic_name": "Linear Regression",
  "score": 5,
  "total_questions": 3,
  "percentage": 166.7,
  "difficulty_breakdown": { "EASY": 0, "MEDIUM": 0, "HARD": 0 },
  "incorrect_questions": []
}"#;
        let result: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.incorrect_count(), 0);
        assert_eq!(result.grade(), Grade::APlus);
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let mut s = QuizSession::new("f", "t", "s", vec![question("1", 0, Difficulty::Easy)]);
        s.finish();
        let result = QuizResult::from_session(&s, names(), None).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.incorrect_questions.len(), 1);
    }

    #[test]
    fn in_progress_session_has_no_result() {
        let s = QuizSession::new("f", "t", "s", vec![question("1", 0, Difficulty::Easy)]);
        assert_eq!(
            QuizResult::from_session(&s, names(), None),
            Err(SessionError::NotCompleted)
        );
    }

    #[test]
    fn empty_session_result() {
        let s = QuizSession::new("f", "t", "s", vec![]);
        let result = QuizResult::from_session(&s, names(), None).unwrap();
        assert_eq!(result.percentage, 0.0);
        assert!(result.incorrect_questions.is_empty());
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(Grade::from_percentage(95.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(90.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(85.0), Grade::A);
        assert_eq!(Grade::from_percentage(70.0), Grade::B);
        assert_eq!(Grade::from_percentage(60.0), Grade::C);
        assert_eq!(Grade::from_percentage(59.9), Grade::D);
        assert_eq!(Grade::APlus.to_string(), "A+");
    }

    #[test]
    fn format_elapsed_like_a_clock() {
        assert_eq!(format_elapsed(chrono::Duration::seconds(65)), "0:01:05");
        assert_eq!(format_elapsed(chrono::Duration::milliseconds(3_725_900)), "1:02:05");
        assert_eq!(format_elapsed(chrono::Duration::seconds(86_400 + 61)), "1 day, 0:01:01");
        assert_eq!(format_elapsed(chrono::Duration::days(3)), "3 days, 0:00:00");
        assert_eq!(format_elapsed(chrono::Duration::seconds(-5)), "0:00:00");
    }
}
