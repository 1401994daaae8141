//! Plain-text summaries for the terminal.

use std::fmt::Write;

use gnanavana_core::{Difficulty, QuizResult};

/// Multi-line summary of a finished quiz.
pub fn render_summary(result: &QuizResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} / {} / {}",
        result.field_name, result.topic_name, result.subtopic_name
    );
    let _ = writeln!(
        out,
        "Score: {}/{} ({:.1}%)  Grade: {}",
        result.score,
        result.total_questions,
        result.percentage,
        result.grade()
    );
    let _ = writeln!(
        out,
        "Time taken: {}",
        result.time_taken.as_deref().unwrap_or("Unknown")
    );

    let breakdown: Vec<String> = Difficulty::ALL
        .iter()
        .map(|d| format!("{d} {}", result.correct_at(*d)))
        .collect();
    let _ = writeln!(out, "Correct by difficulty: {}", breakdown.join(", "));

    if !result.incorrect_questions.is_empty() {
        let _ = writeln!(out, "\nReview ({} missed):", result.incorrect_count());
        for (i, q) in result.incorrect_questions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, q.question);
            let _ = writeln!(out, "     Answer: {}", q.correct_option().unwrap_or("-"));
            if !q.explanation.is_empty() {
                let _ = writeln!(out, "     {}", q.explanation);
            }
        }
    }

    out
}
