#![deny(missing_docs)]

//! # CLI Errors
//!
//! Failures surfaced by the `typegen` binary.

use derive_more::{Display, From};
use typegen_core::AppError;

/// Command failure.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Generation failure from the core library.
    #[display("{}", _0)]
    Core(AppError),

    /// Writing output failed.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Manifest serialization failure.
    #[display("Manifest Error: {}", _0)]
    Manifest(serde_json::Error),

    /// Bad arguments or missing inputs.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// `Result` with [`CliError`].
pub type CliResult<T> = Result<T, CliError>;
