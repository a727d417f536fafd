#![deny(missing_docs)]

//! # Definitions Command
//!
//! One declaration file per named definition.

use typegen_core::{generate_definitions, DefaultFormatter};

use crate::common::CommonArgs;
use crate::error::CliResult;
use crate::sink::write_declarations;

/// Arguments for the definitions command.
#[derive(clap::Args, Debug, Clone)]
pub struct DefinitionsArgs {
    /// Input and config options.
    #[clap(flatten)]
    pub common: CommonArgs,
}

/// Executes the definitions command.
pub fn execute(args: &DefinitionsArgs) -> CliResult<()> {
    let config = args.common.generator_config()?;
    let document = args.common.document()?;

    let declarations = generate_definitions(&document, &config, &DefaultFormatter)?;
    let written = write_declarations(
        &args.common.out_dir,
        declarations.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )?;

    tracing::info!(
        "Generated {} definition files in {:?}",
        written.len(),
        args.common.out_dir
    );
    Ok(())
}
