//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use gnanavana_core::{Difficulty, QuizResult};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a quiz result.
pub fn generate_html(result: &QuizResult) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gnanavana result: {}</title>\n",
        html_escape(&result.subtopic_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>{}</h1>\n",
        html_escape(&result.subtopic_name)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} / {} | {} questions | {}</p>\n",
        html_escape(&result.field_name),
        html_escape(&result.topic_name),
        result.total_questions,
        result.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Score</th><th>Percentage</th><th>Grade</th><th>Correct</th><th>Incorrect</th><th>Time</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}/{}</td><td>{:.1}%</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        result.score,
        result.total_questions,
        result.percentage,
        if result.percentage >= 60.0 { "pass" } else { "fail" },
        result.grade(),
        result.score,
        result.incorrect_count(),
        html_escape(result.time_taken.as_deref().unwrap_or("Unknown")),
    ));
    html.push_str("</table>\n");

    html.push_str("<h3>Correct by difficulty</h3>\n");
    html.push_str(&generate_bar_chart(result));
    html.push_str("</section>\n");

    // Review of missed questions
    if !result.incorrect_questions.is_empty() {
        html.push_str("<section class=\"review\">\n");
        html.push_str("<h2>Review</h2>\n");
        for (i, q) in result.incorrect_questions.iter().enumerate() {
            html.push_str("<article class=\"question\">\n");
            html.push_str(&format!(
                "<h3>{}. {} <span class=\"badge\">{}</span></h3>\n",
                i + 1,
                html_escape(&q.question),
                q.difficulty
            ));
            html.push_str("<ol type=\"A\">\n");
            for (j, option) in q.options.iter().enumerate() {
                let class = if q.is_correct(j) { " class=\"pass\"" } else { "" };
                html.push_str(&format!("<li{}>{}", class, html_escape(option)));
                if let Some(why) = q.option_explanations.get(j).filter(|w| !w.is_empty()) {
                    html.push_str(&format!(" <small>{}</small>", html_escape(why)));
                }
                html.push_str("</li>\n");
            }
            html.push_str("</ol>\n");
            if !q.explanation.is_empty() {
                html.push_str(&format!(
                    "<p class=\"explanation\">{}</p>\n",
                    html_escape(&q.explanation)
                ));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(result).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(result: &QuizResult, path: &Path) -> Result<()> {
    let html = generate_html(result);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(result: &QuizResult) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let max_count = Difficulty::ALL
        .iter()
        .map(|d| result.correct_at(*d))
        .max()
        .unwrap_or(0)
        .max(1);

    let total_height = Difficulty::ALL.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let count = result.correct_at(*difficulty);
        let y = i * (bar_height + padding) + padding;
        let width = count * max_width / max_count;

        let color = match difficulty {
            Difficulty::Easy => "#22c55e",
            Difficulty::Medium => "#eab308",
            Difficulty::Hard => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            difficulty
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.badge { font-size: 0.7rem; padding: 0.1rem 0.4rem; border: 1px solid var(--border); border-radius: 4px; }
.question { border-top: 1px solid var(--border); padding: 0.5rem 0; }
.explanation { font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
