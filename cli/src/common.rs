#![deny(missing_docs)]

//! # Shared Arguments
//!
//! Input document and configuration options common to every command.

use std::path::PathBuf;

use typegen_core::{load_document, ApiDocument, ApiSource, DefaultResolver, GeneratorConfig};

use crate::error::{CliError, CliResult};

/// Options shared by `definitions` and `paths`.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the API description (YAML or JSON).
    #[clap(long, default_value = "docs/openapi.yaml")]
    pub api_path: PathBuf,

    /// URL of a remote API description; takes the place of `--api-path`.
    #[clap(long, conflicts_with = "api_path")]
    pub api_url: Option<String>,

    /// Directory receiving the generated `.ts` files.
    #[clap(long, default_value = "generated")]
    pub out_dir: PathBuf,

    /// Optional generator config file (YAML or JSON).
    #[clap(long, env = "TYPEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides `namingTemplate` from the config file.
    #[clap(long)]
    pub naming_template: Option<String>,

    /// Fail on declaration name collisions.
    #[clap(long)]
    pub strict: bool,
}

impl CommonArgs {
    /// Loads the config file (if any) and applies flag overrides.
    pub fn generator_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(template) = &self.naming_template {
            config.naming_template = template.clone();
        }
        config.strict_names |= self.strict;
        Ok(config)
    }

    /// Resolves and normalizes the API description.
    pub fn document(&self) -> CliResult<ApiDocument> {
        let source = match &self.api_url {
            Some(url) => ApiSource::Url(url.clone()),
            None if self.api_path.exists() => ApiSource::Path(self.api_path.clone()),
            None => {
                return Err(CliError::General(format!(
                    "API description not found: {:?}",
                    self.api_path
                )))
            }
        };
        Ok(load_document(&source, &DefaultResolver)?)
    }
}
