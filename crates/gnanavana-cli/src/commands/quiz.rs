//! The `gnanavana quiz` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gnanavana_core::history::ResultHistory;
use gnanavana_core::result::format_elapsed;
use gnanavana_core::{Progress, QuizResult, QuizSession, SessionError};
use gnanavana_report::{text, write_report, ReportFormat};

use super::{load_settings, open_repository};

/// Options for one quiz run.
pub struct QuizArgs {
    pub field: String,
    pub topic: String,
    pub subtopic: String,
    pub limit: Option<usize>,
    pub no_shuffle: bool,
    pub seed: Option<u64>,
    pub report: Option<String>,
    pub no_save: bool,
}

pub fn execute(args: QuizArgs, config: Option<PathBuf>, content_dir: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config, content_dir)?;
    let report_format = args
        .report
        .as_deref()
        .map(|f| f.parse::<ReportFormat>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;

    let repo = open_repository(&settings)?;
    let subtopic = repo
        .get_subtopic(&args.field, &args.topic, &args.subtopic)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no subtopic {}/{}/{}; run `gnanavana list` to see what is available",
                args.field,
                args.topic,
                args.subtopic
            )
        })?;

    let shuffle = settings.shuffle && !args.no_shuffle;
    let limit = args.limit.or(settings.question_limit());
    let questions = match args.seed {
        Some(seed) => repo.get_questions_with_rng(
            &args.field,
            &args.topic,
            &args.subtopic,
            shuffle,
            limit,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => repo.get_questions(&args.field, &args.topic, &args.subtopic, shuffle, limit),
    };
    if questions.is_empty() {
        anyhow::bail!("no questions found for subtopic {}", subtopic.name);
    }

    tracing::debug!(
        "starting {} with {} question(s), shuffle={shuffle}",
        subtopic.id,
        questions.len()
    );
    let mut session = QuizSession::new(&args.field, &args.topic, &args.subtopic, questions);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())?;

    let names = repo.resolve_names(&args.field, &args.topic, &args.subtopic);
    let time_taken = format_elapsed(session.elapsed(Utc::now()));
    let result = QuizResult::from_session(&session, names, Some(time_taken))?;

    println!("\n{}", text::render_summary(&result));

    if let Some(format) = report_format {
        let path = settings
            .report_dir
            .join(format!("result-{}.{}", result.id, format.extension()));
        write_report(&result, format, &path)?;
        println!("Report written to: {}", path.display());
    }

    if !args.no_save {
        let mut history = ResultHistory::load_or_default(&settings.history_path)?;
        history.push(result);
        history
            .save_json(&settings.history_path)
            .context("failed to save result history")?;
        println!("Result saved to: {}", settings.history_path.display());
    }

    Ok(())
}

/// Drive a session from line-based input until it completes.
///
/// Each line is a 1-based option number; `q` or end of input finishes the
/// quiz early.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut QuizSession,
    mut input: R,
    mut out: W,
) -> Result<()> {
    let total = session.total_questions();

    while let Some(question) = session.current_question().cloned() {
        writeln!(
            out,
            "\nQuestion {} of {} [{}]",
            session.current_index() + 1,
            total,
            question.difficulty
        )?;
        writeln!(out, "{}", question.question)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, option)?;
        }

        loop {
            write!(out, "Answer (1-{}, q to finish): ", question.options.len())?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                session.finish();
                return Ok(());
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                session.finish();
                return Ok(());
            }

            let choice = match line.parse::<usize>() {
                Ok(n) if n >= 1 => n - 1,
                _ => {
                    writeln!(out, "Please enter a number between 1 and {}.", question.options.len())?;
                    continue;
                }
            };

            match session.answer(choice) {
                Ok(true) => writeln!(out, "Correct!")?,
                Ok(false) => writeln!(
                    out,
                    "Incorrect. The answer is: {}",
                    question.correct_option().unwrap_or("-")
                )?,
                Err(SessionError::OptionOutOfRange { len, .. }) => {
                    writeln!(out, "Please enter a number between 1 and {len}.")?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            if let Some(why) = question.option_explanations.get(choice).filter(|w| !w.is_empty()) {
                writeln!(out, "  {why}")?;
            }
            if !question.explanation.is_empty() {
                writeln!(out, "  {}", question.explanation)?;
            }
            break;
        }

        if session.advance() == Progress::Finished {
            break;
        }
    }

    Ok(())
}
