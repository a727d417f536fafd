#![deny(missing_docs)]

//! # Paths Command
//!
//! Entity and params declarations per operation, plus a manifest of all artifacts.

use typegen_core::{generate_paths, DefaultFormatter};

use crate::common::CommonArgs;
use crate::error::CliResult;
use crate::sink::{write_declarations, write_manifest};

/// Arguments for the paths command.
#[derive(clap::Args, Debug, Clone)]
pub struct PathsArgs {
    /// Input and config options.
    #[clap(flatten)]
    pub common: CommonArgs,

    /// Skip writing the JSON manifest.
    #[clap(long)]
    pub no_manifest: bool,
}

/// Executes the paths command.
pub fn execute(args: &PathsArgs) -> CliResult<()> {
    let config = args.common.generator_config()?;
    let document = args.common.document()?;

    let artifacts = generate_paths(&document, &config, &DefaultFormatter)?;

    let declarations = artifacts.values().flatten().flat_map(|a| {
        let entity = a.entity_name.as_deref().map(|n| (n, a.entity.as_str()));
        let params = a.params_name.as_deref().map(|n| (n, a.params.as_str()));
        entity.into_iter().chain(params)
    });
    let written = write_declarations(&args.common.out_dir, declarations)?;

    if !args.no_manifest {
        let manifest = write_manifest(&args.common.out_dir, &artifacts)?;
        tracing::info!("Wrote manifest {:?}", manifest);
    }

    tracing::info!(
        "Generated {} operation files for {} routes in {:?}",
        written.len(),
        artifacts.len(),
        args.common.out_dir
    );
    Ok(())
}
