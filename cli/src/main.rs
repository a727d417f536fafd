#![deny(missing_docs)]

//! # Typegen CLI
//!
//! Command line interface for the TypeScript declaration generator.
//!
//! Supported Commands:
//! - `definitions`: One declaration file per named schema.
//! - `paths`: Entity/params declaration files per operation, plus a manifest.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CliResult;

mod common;
mod definitions;
mod error;
mod paths;
mod sink;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API description to TypeScript declarations")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one declaration per named definition.
    Definitions(definitions::DefinitionsArgs),
    /// Generate entity and params declarations per route operation.
    Paths(paths::PathsArgs),
}

fn main() -> CliResult<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typegen=info,typegen_core=info".into()),
        )
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Definitions(args) => definitions::execute(args)?,
        Commands::Paths(args) => paths::execute(args)?,
    }

    Ok(())
}
