//! gnanavana-report: rendering of finished quiz results.
//!
//! Plain text for terminals, Markdown for notes and pull requests, and a
//! self-contained HTML page for reviewing missed questions.

pub mod html;
pub mod markdown;
pub mod text;

use std::path::Path;

use anyhow::Result;

use gnanavana_core::QuizResult;

/// Output formats a result can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Markdown,
    Json,
}

impl ReportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Render a result in the given format.
pub fn render(result: &QuizResult, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Html => html::generate_html(result),
        ReportFormat::Markdown => markdown::render(result),
        ReportFormat::Json => serde_json::to_string_pretty(result)?,
    })
}

/// Write a rendered result to `path`, creating parent directories.
pub fn write_report(result: &QuizResult, format: ReportFormat, path: &Path) -> Result<()> {
    let rendered = render(result, format)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse() {
        assert_eq!("HTML".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Markdown.extension(), "md");
    }

    #[test]
    fn write_each_format() {
        let result = fixtures::result();
        let dir = tempfile::tempdir().unwrap();
        for format in [ReportFormat::Html, ReportFormat::Markdown, ReportFormat::Json] {
            let path = dir.path().join(format!("out/report.{}", format.extension()));
            write_report(&result, format, &path).unwrap();
            assert!(path.exists());
        }
        let json = std::fs::read_to_string(dir.path().join("out/report.json")).unwrap();
        let back: QuizResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 2);
    }
}
