//! Content validation.
//!
//! Loading is forgiving; this module reports what a content author would
//! want fixed, without changing what gets loaded.

use std::collections::HashSet;

use crate::model::Field;
use crate::parser::parse_file_name;
use crate::repository::{ContentRepository, LoadDiagnostic};

/// A warning from content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The content file concerned, if any.
    pub file: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate everything a repository loaded, plus what it skipped.
pub fn validate_repository(repo: &ContentRepository) -> Vec<ValidationWarning> {
    validate_catalog(repo.load_all(), repo.diagnostics())
}

/// Validate a loaded tree and its load diagnostics.
pub fn validate_catalog(fields: &[Field], diagnostics: &[LoadDiagnostic]) -> Vec<ValidationWarning> {
    let mut warnings: Vec<ValidationWarning> = diagnostics
        .iter()
        .map(|d| ValidationWarning {
            file: Some(d.file.clone()),
            message: format!("skipped: {}", d.error),
        })
        .collect();

    for field in fields {
        for topic in &field.topics {
            for sub in &topic.subtopics {
                let file = Some(sub.file_name.clone());
                let mut warn = |message: String| {
                    warnings.push(ValidationWarning {
                        file: file.clone(),
                        message,
                    })
                };

                // File name tokens versus the ids inside the file
                if let Some(meta) = parse_file_name(&sub.file_name) {
                    if meta.field_id != sub.field_id {
                        warn(format!(
                            "file name says field {} but content says {}",
                            meta.field_id, sub.field_id
                        ));
                    }
                    if meta.topic_id != sub.topic_id {
                        warn(format!(
                            "file name says topic {} but content says {}",
                            meta.topic_id, sub.topic_id
                        ));
                    }
                    if meta.subtopic_id != sub.id {
                        warn(format!(
                            "file name says subtopic {} but content says {}",
                            meta.subtopic_id, sub.id
                        ));
                    }
                }

                if sub.name.trim().is_empty() {
                    warn("subtopic has no name".into());
                }
                if sub.questions.is_empty() {
                    warn("subtopic has no questions".into());
                }

                let mut seen_ids = HashSet::new();
                for (i, q) in sub.questions.iter().enumerate() {
                    if !q.id.is_empty() && !seen_ids.insert(q.id.as_str()) {
                        warn(format!("duplicate question ID: {}", q.id));
                    }
                    if q.question.trim().is_empty() {
                        warn(format!("question #{} has empty text", i + 1));
                    }
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn clean_content_has_no_warnings() {
        let repo = ContentRepository::new(MemorySource::new().with_file(
            "FLD_DSC_TPC_MLG_100_STC_LRG.json",
            r#"{
  "fieldId": "FLD_DSC", "topicId": "TPC_MLG", "subtopicId": "STC_LRG",
  "subtopicName": "Linear Regression",
  "questions": [{ "id": "a", "question": "?", "options": ["x", "y"], "correctOptionIndex": 0 }]
}"#,
        ));
        assert!(validate_repository(&repo).is_empty());
    }

    #[test]
    fn reports_mismatches_duplicates_and_skips() {
        let repo = ContentRepository::new(
            MemorySource::new()
                .with_file(
                    "FLD_DSC_TPC_MLG_100_STC_LRG.json",
                    r#"{
  "fieldId": "FLD_DSC", "topicId": "TPC_DLG", "subtopicId": "STC_LRG",
  "subtopicName": "Linear Regression",
  "questions": [
    { "id": "a", "question": "?", "options": ["x", "y"], "correctOptionIndex": 0 },
    { "id": "a", "question": " ", "options": ["x", "y"], "correctOptionIndex": 1 }
  ]
}"#,
                )
                .with_file("FLD_DSC_TPC_MLG_200_STC_BAD.json", "{ broken"),
        );
        let warnings = validate_repository(&repo);
        assert!(warnings.iter().any(|w| w.message.contains("skipped")));
        assert!(warnings.iter().any(|w| w.message.contains("says topic TPC_MLG")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question ID")));
        assert!(warnings.iter().any(|w| w.message.contains("empty text")));
    }
}
