//! The `gnanavana validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gnanavana_core::validate::validate_repository;
use gnanavana_core::ContentRepository;

use super::load_settings;

pub fn execute(config: Option<PathBuf>, content_dir: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config, content_dir)?;
    let repo = ContentRepository::from_dir(&settings.content_dir);

    let fields = repo.load_all();
    let subtopics: usize = fields.iter().map(|f| f.subtopic_count()).sum();
    let questions: usize = fields.iter().map(|f| f.question_count()).sum();
    println!(
        "Content: {} ({} fields, {} subtopics, {} questions)",
        repo.source_description(),
        fields.len(),
        subtopics,
        questions
    );

    let warnings = validate_repository(&repo);
    for w in &warnings {
        let prefix = w
            .file
            .as_ref()
            .map(|file| format!("  [{file}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if repo.is_empty() {
        anyhow::bail!("no content available in {}", repo.source_description());
    }

    if warnings.is_empty() {
        println!("All content valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
