//! The `gnanavana history` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};

use gnanavana_core::config::load_config_from;
use gnanavana_core::history::ResultHistory;

/// Output formats for `gnanavana history`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    Text,
    Json,
}

pub fn execute(config: Option<PathBuf>, format: HistoryFormat) -> Result<()> {
    let settings = load_config_from(config.as_deref())?;
    let history = ResultHistory::load_or_default(&settings.history_path)?;

    if format == HistoryFormat::Json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No quiz results yet. Take a quiz with `gnanavana quiz`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz #", "Topic", "Subtopic", "Score", "Percentage", "Time"]);
    for (i, result) in history.results().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&result.topic_name),
            Cell::new(&result.subtopic_name),
            Cell::new(format!("{}/{}", result.score, result.total_questions)),
            Cell::new(format!("{:.1}%", result.percentage)),
            Cell::new(result.time_taken.as_deref().unwrap_or("Unknown")),
        ]);
    }
    println!("{table}");

    let summary = history.summary();
    println!(
        "\nTotal quizzes: {}  Average score: {:.1}%  Total questions: {}  Overall accuracy: {:.1}%",
        summary.total_quizzes,
        summary.average_percentage,
        summary.total_questions,
        summary.overall_accuracy
    );

    Ok(())
}
