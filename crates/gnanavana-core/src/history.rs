//! Result history with JSON persistence and aggregate summary.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::result::QuizResult;

/// Every quiz result recorded so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultHistory {
    #[serde(default)]
    results: Vec<QuizResult>,
}

/// Totals across a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_quizzes: usize,
    /// Mean of per-quiz percentages.
    pub average_percentage: f64,
    pub total_questions: usize,
    pub total_correct: usize,
    /// `total_correct / total_questions * 100`.
    pub overall_accuracy: f64,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: QuizResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    pub fn latest(&self) -> Option<&QuizResult> {
        self.results.last()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Aggregate totals; all zeros for an empty history.
    pub fn summary(&self) -> HistorySummary {
        let total_quizzes = self.results.len();
        let total_questions: usize = self.results.iter().map(|r| r.total_questions).sum();
        let total_correct: usize = self.results.iter().map(|r| r.score).sum();

        let average_percentage = if total_quizzes == 0 {
            0.0
        } else {
            self.results.iter().map(|r| r.percentage).sum::<f64>() / total_quizzes as f64
        };
        let overall_accuracy = if total_questions == 0 {
            0.0
        } else {
            total_correct as f64 / total_questions as f64 * 100.0
        };

        HistorySummary {
            total_quizzes,
            average_percentage,
            total_questions,
            total_correct,
            overall_accuracy,
        }
    }

    /// Save the history as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize history")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        Ok(())
    }

    /// Load a history from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history from {}", path.display()))?;
        let history: ResultHistory =
            serde_json::from_str(&content).context("failed to parse history JSON")?;
        Ok(history)
    }

    /// Load a history, treating a missing file as empty.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use std::collections::BTreeMap;

    fn result(score: usize, total: usize) -> QuizResult {
        QuizResult {
            id: uuid::Uuid::new_v4(),
            completed_at: chrono::Utc::now(),
            field_name: "Data Science".into(),
            topic_name: "Machine Learning".into(),
            subtopic_name: "Trees".into(),
            score,
            total_questions: total,
            percentage: if total == 0 {
                0.0
            } else {
                score as f64 / total as f64 * 100.0
            },
            time_taken: None,
            difficulty_breakdown: Difficulty::ALL.iter().map(|&d| (d, 0)).collect::<BTreeMap<_, _>>(),
            incorrect_questions: vec![],
        }
    }

    #[test]
    fn summary_of_empty_history() {
        let summary = ResultHistory::new().summary();
        assert_eq!(summary.total_quizzes, 0);
        assert_eq!(summary.average_percentage, 0.0);
        assert_eq!(summary.overall_accuracy, 0.0);
    }

    #[test]
    fn summary_arithmetic() {
        let mut history = ResultHistory::new();
        history.push(result(1, 2));
        history.push(result(4, 4));
        let summary = history.summary();
        assert_eq!(summary.total_quizzes, 2);
        assert!((summary.average_percentage - 75.0).abs() < 1e-9);
        assert_eq!(summary.total_questions, 6);
        assert_eq!(summary.total_correct, 5);
        assert!((summary.overall_accuracy - 83.333).abs() < 0.01);
        assert_eq!(history.latest().unwrap().score, 4);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/history.json");
        let mut history = ResultHistory::new();
        history.push(result(3, 5));
        history.save_json(&path).unwrap();

        let loaded = ResultHistory::load_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.results()[0].score, 3);
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let history = ResultHistory::load_or_default(&dir.path().join("none.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ResultHistory::load_or_default(&path).is_err());
    }
}
