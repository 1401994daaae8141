//! JSON content file parser.
//!
//! Each content file holds one subtopic. File names carry routing metadata
//! (`FLD_<x>_TPC_<y>_<rank*1000>_STC_<z>.json`) that fills gaps in, and is
//! checked against, the ids inside the file.

use std::path::Path;

use serde::Deserialize;

use crate::error::ContentError;
use crate::model::{Difficulty, Question, Subtopic};

/// Routing metadata recovered from a content file name.
#[derive(Debug, Clone, PartialEq)]
pub struct FileNameMeta {
    pub field_id: String,
    pub topic_id: String,
    pub rank: f64,
    pub subtopic_id: String,
}

/// A parsed content file: the subtopic plus the display names needed to
/// place it in the tree.
#[derive(Debug, Clone)]
pub struct ParsedSubtopic {
    pub field_name: String,
    pub topic_name: String,
    pub subtopic: Subtopic,
}

/// Intermediate JSON structure for parsing content files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSubtopicFile {
    #[serde(default)]
    field_id: Option<String>,
    #[serde(default)]
    field_name: String,
    #[serde(default)]
    topic_id: Option<String>,
    #[serde(default)]
    topic_name: String,
    #[serde(default)]
    subtopic_id: Option<String>,
    #[serde(default)]
    subtopic_name: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "str")]
    rank: Option<f64>,
    #[serde(default)]
    questions: Vec<JsonQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonQuestion {
    #[serde(default)]
    id: String,
    #[serde(default)]
    question: String,
    options: Vec<String>,
    correct_option_index: i64,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    option_explanations: Vec<String>,
    /// Any JSON value; only the exact level names are recognised.
    #[serde(default)]
    difficulty: Option<serde_json::Value>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Recover routing metadata from a content file name.
///
/// Returns `None` when the stem has fewer than seven `_`-separated tokens.
/// A non-numeric rank token yields a rank of `0.0`.
pub fn parse_file_name(name: &str) -> Option<FileNameMeta> {
    let stem = Path::new(name).file_stem()?.to_str()?;
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 7 {
        return None;
    }

    let rank_token = parts[4];
    let rank = if !rank_token.is_empty() && rank_token.chars().all(|c| c.is_ascii_digit()) {
        rank_token.parse::<f64>().map(|r| r / 1000.0).unwrap_or(0.0)
    } else {
        0.0
    };

    Some(FileNameMeta {
        field_id: format!("{}_{}", parts[0], parts[1]),
        topic_id: format!("{}_{}", parts[2], parts[3]),
        rank,
        subtopic_id: format!("{}_{}", parts[5], parts[6]),
    })
}

/// Parse raw bytes from a content source.
pub fn parse_subtopic_bytes(bytes: &[u8], file_name: &str) -> Result<ParsedSubtopic, ContentError> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| ContentError::malformed(file_name, format!("not valid UTF-8: {e}")))?;
    parse_subtopic_str(content, file_name)
}

/// Parse a JSON string into a subtopic (useful for testing).
pub fn parse_subtopic_str(content: &str, file_name: &str) -> Result<ParsedSubtopic, ContentError> {
    let file_meta = parse_file_name(file_name)
        .ok_or_else(|| ContentError::UnparseableFileName(file_name.to_string()))?;

    let parsed: JsonSubtopicFile = serde_json::from_str(content)
        .map_err(|e| ContentError::malformed(file_name, e.to_string()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| convert_question(q, i, file_name))
        .collect::<Result<Vec<_>, _>>()?;

    let subtopic = Subtopic::new(
        non_empty_or(parsed.subtopic_id, &file_meta.subtopic_id),
        parsed.subtopic_name,
        non_empty_or(parsed.topic_id, &file_meta.topic_id),
        non_empty_or(parsed.field_id, &file_meta.field_id),
        parsed.rank.unwrap_or(file_meta.rank),
        parsed.description,
        file_name.to_string(),
        questions,
    );

    Ok(ParsedSubtopic {
        field_name: parsed.field_name,
        topic_name: parsed.topic_name,
        subtopic,
    })
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Validate one question record and convert it to the model type.
fn convert_question(q: JsonQuestion, position: usize, file_name: &str) -> Result<Question, ContentError> {
    let label = if q.id.is_empty() {
        format!("question #{}", position + 1)
    } else {
        format!("question {}", q.id)
    };

    if q.options.len() < 2 {
        return Err(ContentError::malformed(
            file_name,
            format!("{label} has {} option(s), need at least 2", q.options.len()),
        ));
    }

    let correct_option_index = usize::try_from(q.correct_option_index)
        .ok()
        .filter(|&i| i < q.options.len())
        .ok_or_else(|| {
            ContentError::malformed(
                file_name,
                format!(
                    "{label} has correctOptionIndex {} outside 0..{}",
                    q.correct_option_index,
                    q.options.len()
                ),
            )
        })?;

    if !q.option_explanations.is_empty() && q.option_explanations.len() != q.options.len() {
        return Err(ContentError::malformed(
            file_name,
            format!(
                "{label} has {} option explanations for {} options",
                q.option_explanations.len(),
                q.options.len()
            ),
        ));
    }

    Ok(Question {
        id: q.id,
        question: q.question,
        options: q.options,
        correct_option_index,
        explanation: q.explanation,
        option_explanations: q.option_explanations,
        difficulty: Difficulty::from_content(
            q.difficulty.as_ref().and_then(serde_json::Value::as_str),
        ),
        tags: q.tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "FLD_DSC_TPC_MLG_150_STC_LRG.json";

    const VALID_JSON: &str = r#"{
  "fieldId": "FLD_DSC",
  "fieldName": "Data Science",
  "topicId": "TPC_MLG",
  "topicName": "Machine Learning",
  "subtopicId": "STC_LRG",
  "subtopicName": "Linear Regression",
  "description": "Fitting lines to data",
  "str": 0.15,
  "questions": [
    {
      "id": "LRG_001",
      "question": "What does linear regression predict?",
      "options": ["A category", "A continuous value", "A cluster", "A rule"],
      "correctOptionIndex": 1,
      "explanation": "Regression predicts continuous targets.",
      "optionExplanations": ["Classification", "Correct", "Clustering", "Rule mining"],
      "difficulty": "EASY",
      "tags": ["regression", "basics"]
    },
    {
      "id": "LRG_002",
      "question": "Which loss is minimised by ordinary least squares?",
      "options": ["Hinge", "Cross-entropy", "Squared error"],
      "correctOptionIndex": 2
    }
  ]
}"#;

    #[test]
    fn parse_file_name_tokens() {
        let meta = parse_file_name(FILE).unwrap();
        assert_eq!(meta.field_id, "FLD_DSC");
        assert_eq!(meta.topic_id, "TPC_MLG");
        assert_eq!(meta.subtopic_id, "STC_LRG");
        assert!((meta.rank - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_file_name_rejects_short_names() {
        assert!(parse_file_name("FLD_DSC_TPC_MLG_150.json").is_none());
        assert!(parse_file_name("notes.json").is_none());
    }

    #[test]
    fn parse_file_name_non_numeric_rank() {
        let meta = parse_file_name("FLD_DSC_TPC_MLG_abc_STC_LRG.json").unwrap();
        assert_eq!(meta.rank, 0.0);
    }

    #[test]
    fn parse_valid_json() {
        let parsed = parse_subtopic_str(VALID_JSON, FILE).unwrap();
        assert_eq!(parsed.field_name, "Data Science");
        assert_eq!(parsed.topic_name, "Machine Learning");
        let sub = parsed.subtopic;
        assert_eq!(sub.id, "STC_LRG");
        assert_eq!(sub.total_questions, 2);
        assert_eq!(sub.questions.len(), sub.total_questions);
        assert_eq!(sub.questions[0].difficulty, Difficulty::Easy);
        assert_eq!(sub.questions[0].correct_option_index, 1);
        // Missing difficulty falls back to MEDIUM.
        assert_eq!(sub.questions[1].difficulty, Difficulty::Medium);
        assert!(sub.questions[1].option_explanations.is_empty());
    }

    #[test]
    fn missing_ids_fall_back_to_file_name() {
        let json = r#"{ "subtopicName": "Trees", "questions": [] }"#;
        let parsed = parse_subtopic_str(json, "FLD_DSC_TPC_MLG_300_STC_TRE.json").unwrap();
        assert_eq!(parsed.subtopic.field_id, "FLD_DSC");
        assert_eq!(parsed.subtopic.topic_id, "TPC_MLG");
        assert_eq!(parsed.subtopic.id, "STC_TRE");
        assert!((parsed.subtopic.rank - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn non_string_difficulty_defaults_to_medium() {
        let json = r#"{ "questions": [
  { "id": "a", "options": ["x", "y"], "correctOptionIndex": 0, "difficulty": 3 },
  { "id": "b", "options": ["x", "y"], "correctOptionIndex": 1, "difficulty": null },
  { "id": "c", "options": ["x", "y"], "correctOptionIndex": 1, "difficulty": ["HARD"] },
  { "id": "d", "options": ["x", "y"], "correctOptionIndex": 0, "difficulty": "HARD" }
] }"#;
        let sub = parse_subtopic_str(json, FILE).unwrap().subtopic;
        let levels: Vec<_> = sub.questions.iter().map(|q| q.difficulty).collect();
        assert_eq!(
            levels,
            vec![Difficulty::Medium, Difficulty::Medium, Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[test]
    fn missing_correct_index_is_malformed() {
        let json = r#"{
  "subtopicId": "STC_LRG",
  "questions": [{ "id": "x", "question": "?", "options": ["a", "b"] }]
}"#;
        let err = parse_subtopic_str(json, FILE).unwrap_err();
        assert!(matches!(err, ContentError::MalformedContent { .. }));
    }

    #[test]
    fn out_of_range_correct_index_is_malformed() {
        let json = r#"{ "questions": [{ "options": ["a", "b"], "correctOptionIndex": 2 }] }"#;
        let err = parse_subtopic_str(json, FILE).unwrap_err();
        assert!(err.to_string().contains("correctOptionIndex 2"));

        let json = r#"{ "questions": [{ "options": ["a", "b"], "correctOptionIndex": -1 }] }"#;
        assert!(parse_subtopic_str(json, FILE).is_err());
    }

    #[test]
    fn single_option_is_malformed() {
        let json = r#"{ "questions": [{ "options": ["only"], "correctOptionIndex": 0 }] }"#;
        assert!(parse_subtopic_str(json, FILE).is_err());
    }

    #[test]
    fn mismatched_option_explanations_are_malformed() {
        let json = r#"{ "questions": [{
  "options": ["a", "b", "c"],
  "correctOptionIndex": 0,
  "optionExplanations": ["only one"]
}] }"#;
        assert!(parse_subtopic_str(json, FILE).is_err());
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_subtopic_str("{ not json ]", FILE);
        assert!(matches!(result, Err(ContentError::MalformedContent { .. })));
    }

    #[test]
    fn unparseable_name_is_reported_before_content() {
        let result = parse_subtopic_str(VALID_JSON, "readme.json");
        assert!(matches!(result, Err(ContentError::UnparseableFileName(_))));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let result = parse_subtopic_bytes(&[0xff, 0xfe, 0x00], FILE);
        assert!(matches!(result, Err(ContentError::MalformedContent { .. })));
    }
}
