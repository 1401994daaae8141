//! Quiz content repository.
//!
//! Loads every content file from a [`ContentSource`] once, assembles the
//! Field → Topic → Subtopic tree, and serves lookups and question sets from
//! that cached tree. Files that cannot be parsed are skipped and recorded as
//! diagnostics; they never abort the load.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use rand::Rng;

use crate::error::ContentError;
use crate::model::{topic_order, Field, Question, Subtopic, Topic};
use crate::parser::{parse_file_name, parse_subtopic_bytes};
use crate::result::SelectionNames;
use crate::shuffle::shuffle_questions;
use crate::source::{ContentSource, DirectorySource};

/// A content file that was skipped during load, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// File name, or the source description when listing itself failed.
    pub file: String,
    pub error: ContentError,
}

/// The assembled tree plus everything that went wrong building it.
#[derive(Debug, Default)]
struct Catalog {
    fields: Vec<Field>,
    diagnostics: Vec<LoadDiagnostic>,
}

/// Read-only, lazily loaded quiz content.
pub struct ContentRepository {
    source: Box<dyn ContentSource>,
    catalog: OnceLock<Catalog>,
}

impl ContentRepository {
    pub fn new(source: impl ContentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            catalog: OnceLock::new(),
        }
    }

    /// Repository over a directory of `.json` content files.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectorySource::new(dir))
    }

    /// The full, ordered field hierarchy.
    ///
    /// The first call reads the source; later calls return the cached tree.
    pub fn load_all(&self) -> &[Field] {
        &self.catalog().fields
    }

    /// Files skipped during load.
    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.catalog().diagnostics
    }

    /// `true` when no subtopic could be loaded at all.
    pub fn is_empty(&self) -> bool {
        self.load_all().iter().all(|f| f.subtopic_count() == 0)
    }

    /// Description of the underlying source.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn get_field(&self, field_id: &str) -> Option<&Field> {
        self.load_all().iter().find(|f| f.id == field_id)
    }

    pub fn get_topic(&self, field_id: &str, topic_id: &str) -> Option<&Topic> {
        self.get_field(field_id)?
            .topics
            .iter()
            .find(|t| t.id == topic_id)
    }

    pub fn get_subtopic(
        &self,
        field_id: &str,
        topic_id: &str,
        subtopic_id: &str,
    ) -> Option<&Subtopic> {
        self.get_topic(field_id, topic_id)?
            .subtopics
            .iter()
            .find(|s| s.id == subtopic_id)
    }

    /// A copy of a subtopic's questions, optionally shuffled and truncated.
    ///
    /// Shuffling randomises question order and each question's options.
    /// `limit` truncates after shuffling. Unknown selections yield an empty
    /// list.
    pub fn get_questions(
        &self,
        field_id: &str,
        topic_id: &str,
        subtopic_id: &str,
        shuffle: bool,
        limit: Option<usize>,
    ) -> Vec<Question> {
        self.get_questions_with_rng(
            field_id,
            topic_id,
            subtopic_id,
            shuffle,
            limit,
            &mut rand::rng(),
        )
    }

    /// [`get_questions`](Self::get_questions) with a caller-supplied
    /// generator.
    pub fn get_questions_with_rng<R: Rng + ?Sized>(
        &self,
        field_id: &str,
        topic_id: &str,
        subtopic_id: &str,
        shuffle: bool,
        limit: Option<usize>,
        rng: &mut R,
    ) -> Vec<Question> {
        let Some(subtopic) = self.get_subtopic(field_id, topic_id, subtopic_id) else {
            tracing::debug!("no subtopic {field_id}/{topic_id}/{subtopic_id}");
            return Vec::new();
        };

        let mut questions = subtopic.questions.clone();
        if shuffle {
            questions = shuffle_questions(questions, rng);
        }
        if let Some(limit) = limit {
            questions.truncate(limit);
        }
        questions
    }

    /// Display names for a selection, `"Unknown"` for anything missing.
    pub fn resolve_names(&self, field_id: &str, topic_id: &str, subtopic_id: &str) -> SelectionNames {
        let unknown = || "Unknown".to_string();
        SelectionNames {
            field_name: self
                .get_field(field_id)
                .map(|f| f.name.clone())
                .unwrap_or_else(unknown),
            topic_name: self
                .get_topic(field_id, topic_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(unknown),
            subtopic_name: self
                .get_subtopic(field_id, topic_id, subtopic_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(unknown),
        }
    }

    fn catalog(&self) -> &Catalog {
        self.catalog
            .get_or_init(|| build_catalog(self.source.as_ref()))
    }
}

/// Read, parse, group, and sort everything the source offers.
fn build_catalog(source: &dyn ContentSource) -> Catalog {
    let mut catalog = Catalog::default();

    let names = match source.list() {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("no content loaded from {}: {}", source.describe(), e);
            catalog.diagnostics.push(LoadDiagnostic {
                file: source.describe(),
                error: e,
            });
            return catalog;
        }
    };

    let mut field_index: HashMap<String, usize> = HashMap::new();
    let mut topic_index: HashMap<(String, String), (usize, usize)> = HashMap::new();
    let mut loaded = 0usize;

    for name in names {
        // Filename tokens are checked before the file is read at all.
        if parse_file_name(&name).is_none() {
            tracing::debug!("skipping {name}: not a content file name");
            catalog.diagnostics.push(LoadDiagnostic {
                error: ContentError::UnparseableFileName(name.clone()),
                file: name,
            });
            continue;
        }

        let parsed = match source
            .read(&name)
            .and_then(|bytes| parse_subtopic_bytes(&bytes, &name))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("skipping {name}: {e}");
                catalog.diagnostics.push(LoadDiagnostic { file: name, error: e });
                continue;
            }
        };

        let subtopic = parsed.subtopic;
        let field_id = subtopic.field_id.clone();
        let topic_id = subtopic.topic_id.clone();

        let fi = *field_index.entry(field_id.clone()).or_insert_with(|| {
            catalog.fields.push(Field {
                id: field_id.clone(),
                name: parsed.field_name.clone(),
                description: String::new(),
                topics: Vec::new(),
            });
            catalog.fields.len() - 1
        });

        let (fi, ti) = *topic_index
            .entry((field_id.clone(), topic_id.clone()))
            .or_insert_with(|| {
                let topics = &mut catalog.fields[fi].topics;
                topics.push(Topic {
                    id: topic_id.clone(),
                    name: parsed.topic_name.clone(),
                    field_id: field_id.clone(),
                    description: String::new(),
                    subtopics: Vec::new(),
                });
                (fi, topics.len() - 1)
            });

        catalog.fields[fi].topics[ti].subtopics.push(subtopic);
        loaded += 1;
    }

    for field in &mut catalog.fields {
        for topic in &mut field.topics {
            topic.subtopics.sort_by(|a, b| a.rank.total_cmp(&b.rank));
        }
        // Stable sort: unknown topics keep their encounter order at the end.
        field.topics.sort_by_key(|t| topic_order(&t.id));
    }

    tracing::info!(
        "loaded {loaded} subtopic(s) in {} field(s) from {} ({} skipped)",
        catalog.fields.len(),
        source.describe(),
        catalog.diagnostics.len()
    );

    catalog
}
