//! Markdown rendering of a quiz result.

use gnanavana_core::{Difficulty, QuizResult};

/// Render a result as a Markdown document.
pub fn render(result: &QuizResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Quiz result: {}\n\n", result.subtopic_name));
    md.push_str(&format!(
        "**{}** / **{}** | {}\n\n",
        result.field_name,
        result.topic_name,
        result.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("| Score | Percentage | Grade | Time |\n");
    md.push_str("|-------|-----------:|:-----:|------|\n");
    md.push_str(&format!(
        "| {}/{} | {:.1}% | {} | {} |\n\n",
        result.score,
        result.total_questions,
        result.percentage,
        result.grade(),
        result.time_taken.as_deref().unwrap_or("Unknown")
    ));

    md.push_str("## Correct by difficulty\n\n");
    for d in Difficulty::ALL {
        md.push_str(&format!("- {d}: {}\n", result.correct_at(d)));
    }

    if !result.incorrect_questions.is_empty() {
        md.push_str("\n## Review\n");
        for (i, q) in result.incorrect_questions.iter().enumerate() {
            md.push_str(&format!("\n### {}. {}\n\n", i + 1, q.question));
            for (j, option) in q.options.iter().enumerate() {
                let mark = if q.is_correct(j) { "x" } else { " " };
                md.push_str(&format!("- [{mark}] {option}\n"));
            }
            if !q.explanation.is_empty() {
                md.push_str(&format!("\n> {}\n", q.explanation));
            }
        }
    }

    md
}
