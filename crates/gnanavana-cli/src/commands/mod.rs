pub mod history;
pub mod init;
pub mod list;
pub mod quiz;
pub mod report;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use gnanavana_core::config::{load_config_from, QuizConfig};
use gnanavana_core::ContentRepository;

/// Load config, letting a `--content-dir` flag win over it.
pub fn load_settings(config: Option<PathBuf>, content_dir: Option<PathBuf>) -> Result<QuizConfig> {
    let mut settings = load_config_from(config.as_deref())?;
    if let Some(dir) = content_dir {
        settings.content_dir = dir;
    }
    Ok(settings)
}

/// Open the content repository, failing when nothing could be loaded.
pub fn open_repository(settings: &QuizConfig) -> Result<ContentRepository> {
    let repo = ContentRepository::from_dir(&settings.content_dir);
    if repo.is_empty() {
        anyhow::bail!(
            "no content available in {} ({} file(s) skipped)",
            repo.source_description(),
            repo.diagnostics().len()
        );
    }
    Ok(repo)
}
