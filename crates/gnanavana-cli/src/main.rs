//! gnanavana CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gnanavana", version, about = "Terminal quiz runner for structured learning content")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz on one subtopic
    Quiz {
        /// Field id (e.g. "FLD_DSC")
        #[arg(long)]
        field: String,

        /// Topic id (e.g. "TPC_MLG")
        #[arg(long)]
        topic: String,

        /// Subtopic id (e.g. "STC_LRG")
        #[arg(long)]
        subtopic: String,

        /// Maximum number of questions (default from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Keep stored question and option order
        #[arg(long)]
        no_shuffle: bool,

        /// Seed for reproducible shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Also write a report: html, markdown, json
        #[arg(long)]
        report: Option<String>,

        /// Do not append the result to the history
        #[arg(long)]
        no_save: bool,

        /// Content directory (overrides config)
        #[arg(long)]
        content_dir: Option<PathBuf>,
    },

    /// List fields, topics, and subtopics
    List {
        /// Content directory (overrides config)
        #[arg(long)]
        content_dir: Option<PathBuf>,
    },

    /// Validate content files
    Validate {
        /// Content directory (overrides config)
        #[arg(long)]
        content_dir: Option<PathBuf>,
    },

    /// Show past quiz results
    History {
        /// Output format
        #[arg(long, value_enum, default_value_t = commands::history::HistoryFormat::Text)]
        format: commands::history::HistoryFormat,
    },

    /// Render a past result as a report
    Report {
        /// Output format: html, markdown, json
        #[arg(long, default_value = "html")]
        format: String,

        /// 1-based quiz number from `history` (default: latest)
        #[arg(long)]
        quiz: Option<usize>,

        /// Output file (default: report directory from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create starter config and example content
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gnanavana=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Quiz {
            field,
            topic,
            subtopic,
            limit,
            no_shuffle,
            seed,
            report,
            no_save,
            content_dir,
        } => commands::quiz::execute(
            commands::quiz::QuizArgs {
                field,
                topic,
                subtopic,
                limit,
                no_shuffle,
                seed,
                report,
                no_save,
            },
            config,
            content_dir,
        ),
        Commands::List { content_dir } => commands::list::execute(config, content_dir),
        Commands::Validate { content_dir } => commands::validate::execute(config, content_dir),
        Commands::History { format } => commands::history::execute(config, format),
        Commands::Report {
            format,
            quiz,
            output,
        } => commands::report::execute(config, format, quiz, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
