//! The `gnanavana list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::{load_settings, open_repository};

pub fn execute(config: Option<PathBuf>, content_dir: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config, content_dir)?;
    let repo = open_repository(&settings)?;

    for field in repo.load_all() {
        println!("{} ({})", field.name, field.id);

        let mut table = Table::new();
        table.set_header(vec!["Topic", "Subtopic", "Name", "Questions"]);
        for topic in &field.topics {
            for sub in &topic.subtopics {
                table.add_row(vec![
                    Cell::new(format!("{} ({})", topic.name, topic.id)),
                    Cell::new(&sub.id),
                    Cell::new(&sub.name),
                    Cell::new(sub.total_questions),
                ]);
            }
        }
        println!("{table}\n");
    }

    let skipped = repo.diagnostics().len();
    if skipped > 0 {
        eprintln!("{skipped} file(s) skipped; run `gnanavana validate` for details.");
    }

    Ok(())
}
