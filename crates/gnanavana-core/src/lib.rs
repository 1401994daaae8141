//! gnanavana-core: Quiz content repository, session engine, and results.
//!
//! This crate defines the content model, loads it from JSON content files,
//! and runs quiz sessions over it. Rendering and the CLI live in the
//! `gnanavana-report` and `gnanavana-cli` crates.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod parser;
pub mod repository;
pub mod result;
pub mod session;
pub mod shuffle;
pub mod source;
pub mod validate;

pub use error::{ContentError, SessionError};
pub use model::{Difficulty, Field, Question, Subtopic, Topic};
pub use repository::{ContentRepository, LoadDiagnostic};
pub use result::{QuizResult, SelectionNames};
pub use session::{Progress, QuizSession, SessionState};
