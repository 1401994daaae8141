//! Core data model types for gnanavana.
//!
//! The content hierarchy is Field → Topic → Subtopic → Question. Everything
//! here is immutable once loaded; sessions work on their own copies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How hard a question is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a content-file value, falling back to `Medium` for anything
    /// absent or unrecognised. Matching is case-sensitive.
    pub fn from_content(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Medium => write!(f, "MEDIUM"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its subtopic.
    pub id: String,
    /// The question text.
    pub question: String,
    /// Answer options, at least two.
    pub options: Vec<String>,
    /// Index into `options` of the right answer.
    pub correct_option_index: usize,
    /// Explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
    /// Per-option explanations; empty or parallel to `options`.
    #[serde(default)]
    pub option_explanations: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    /// The text of the correct option.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_option_index)
            .map(String::as_str)
    }

    /// Whether `option_index` is the right answer.
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option_index
    }
}

/// A leaf content unit: one content file worth of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: String,
    pub name: String,
    pub topic_id: String,
    pub field_id: String,
    /// Ordering key among siblings; never displayed.
    pub rank: f64,
    #[serde(default)]
    pub description: String,
    /// Always equal to `questions.len()`.
    pub total_questions: usize,
    /// Name of the content file this subtopic was loaded from.
    pub file_name: String,
    pub questions: Vec<Question>,
}

impl Subtopic {
    /// Build a subtopic, deriving `total_questions` from the question list.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        name: String,
        topic_id: String,
        field_id: String,
        rank: f64,
        description: String,
        file_name: String,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            name,
            topic_id,
            field_id,
            rank,
            description,
            total_questions: questions.len(),
            file_name,
            questions,
        }
    }
}

/// A subject area within a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub field_id: String,
    #[serde(default)]
    pub description: String,
    /// Sorted ascending by rank after load.
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    /// Total questions across all subtopics.
    pub fn question_count(&self) -> usize {
        self.subtopics.iter().map(|s| s.total_questions).sum()
    }
}

/// Top-level subject area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Sorted by canonical topic order after load.
    pub topics: Vec<Topic>,
}

impl Field {
    pub fn subtopic_count(&self) -> usize {
        self.topics.iter().map(|t| t.subtopics.len()).sum()
    }

    pub fn question_count(&self) -> usize {
        self.topics.iter().map(Topic::question_count).sum()
    }
}

/// Canonical learning order for known topic ids. Unknown topics sort last.
pub fn topic_order(topic_id: &str) -> u32 {
    match topic_id {
        "TPC_MLG" => 1,
        "TPC_DLG" => 2,
        "TPC_IMG" => 3,
        "TPC_NLP" => 4,
        "TPC_GAI" => 5,
        _ => 999,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Easy.to_string(), "EASY");
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("hard".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::from_content(None), Difficulty::Medium);
        assert_eq!(Difficulty::from_content(Some("easy")), Difficulty::Medium);
        assert_eq!(Difficulty::from_content(Some("EXPERT")), Difficulty::Medium);
        assert_eq!(Difficulty::from_content(Some("EASY")), Difficulty::Easy);
    }

    #[test]
    fn subtopic_counts_its_questions() {
        let q = Question {
            id: "q1".into(),
            question: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            correct_option_index: 1,
            explanation: String::new(),
            option_explanations: vec![],
            difficulty: Difficulty::Easy,
            tags: vec![],
        };
        assert_eq!(q.correct_option(), Some("4"));
        let sub = Subtopic::new(
            "STC_ADD".into(),
            "Addition".into(),
            "TPC_MLG".into(),
            "FLD_DSC".into(),
            0.1,
            String::new(),
            "FLD_DSC_TPC_MLG_100_STC_ADD.json".into(),
            vec![q.clone(), q],
        );
        assert_eq!(sub.total_questions, 2);
    }

    #[test]
    fn canonical_topic_order() {
        assert!(topic_order("TPC_MLG") < topic_order("TPC_IMG"));
        assert!(topic_order("TPC_IMG") < topic_order("TPC_NLP"));
        assert_eq!(topic_order("TPC_XYZ"), 999);
    }
}
