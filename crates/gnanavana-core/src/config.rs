//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level gnanavana configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Directory holding the content files.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Questions per quiz when the caller gives no limit. `0` means all.
    #[serde(default = "default_question_limit")]
    pub default_question_limit: usize,
    /// Shuffle questions and options by default.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Where finished results are appended.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
    /// Where rendered reports are written.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("quiz_data")
}
fn default_question_limit() -> usize {
    20
}
fn default_true() -> bool {
    true
}
fn default_history_path() -> PathBuf {
    PathBuf::from("gnanavana-results/history.json")
}
fn default_report_dir() -> PathBuf {
    PathBuf::from("gnanavana-results")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            default_question_limit: default_question_limit(),
            shuffle: true,
            history_path: default_history_path(),
            report_dir: default_report_dir(),
        }
    }
}

impl QuizConfig {
    /// The configured limit as an option, `None` meaning "all questions".
    pub fn question_limit(&self) -> Option<usize> {
        match self.default_question_limit {
            0 => None,
            n => Some(n),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gnanavana.toml` in the current directory
/// 2. `~/.config/gnanavana/config.toml`
///
/// Environment variable overrides: `GNANAVANA_CONTENT_DIR`, `GNANAVANA_HISTORY`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gnanavana.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(dir) = std::env::var("GNANAVANA_CONTENT_DIR") {
        config.content_dir = PathBuf::from(dir);
    }
    if let Ok(history) = std::env::var("GNANAVANA_HISTORY") {
        config.history_path = PathBuf::from(history);
    }

    config.content_dir = resolve_path(&config.content_dir);
    config.history_path = resolve_path(&config.history_path);
    config.report_dir = resolve_path(&config.report_dir);

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gnanavana"))
}
