//! # Errors
//!
//! `AppError` covers every failure the generators can report.
//! Formatting failures are the only kind callers swallow (per declaration).

use derive_more::{Display, From};

/// Generation failure.
///
/// Only `Io` and `General` convert implicitly; the tagged variants are built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Filesystem failure while reading a document or config.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document or config file could not be decoded as YAML/JSON.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A reference could not be resolved, or the document is malformed.
    /// These abort the whole run.
    #[from(ignore)]
    #[display("Resolution Error: {_0}")]
    Resolution(String),

    /// The formatter rejected generated text.
    #[from(ignore)]
    #[display("Format Error: {_0}")]
    Format(String),

    /// Two sources resolved to the same declaration name (strict mode only).
    #[from(ignore)]
    #[display("Name Collision: '{name}' produced by both {first} and {second}")]
    NameCollision {
        /// The colliding declaration name.
        name: String,
        /// Origin of the first declaration.
        first: String,
        /// Origin of the second declaration.
        second: String,
    },

    /// Anything else.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {}

/// `Result` with [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
