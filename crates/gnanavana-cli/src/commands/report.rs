//! The `gnanavana report` command.

use std::path::PathBuf;

use anyhow::Result;

use gnanavana_core::config::load_config_from;
use gnanavana_core::history::ResultHistory;
use gnanavana_report::{write_report, ReportFormat};

pub fn execute(
    config: Option<PathBuf>,
    format: String,
    quiz: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_config_from(config.as_deref())?;
    let format: ReportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let history = ResultHistory::load_or_default(&settings.history_path)?;

    let result = match quiz {
        Some(n) => n
            .checked_sub(1)
            .and_then(|i| history.results().get(i))
            .ok_or_else(|| anyhow::anyhow!("no quiz #{n} in history ({} recorded)", history.len()))?,
        None => history
            .latest()
            .ok_or_else(|| anyhow::anyhow!("no quiz results yet"))?,
    };

    let path = output.unwrap_or_else(|| {
        settings
            .report_dir
            .join(format!("result-{}.{}", result.id, format.extension()))
    });
    write_report(result, format, &path)?;
    println!("Report written to: {}", path.display());

    Ok(())
}
