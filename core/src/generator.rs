#![deny(missing_docs)]

//! # Generation Entry Points
//!
//! Glue between document loading and the two builders.

use crate::config::GeneratorConfig;
use crate::definitions::build_definitions;
use crate::error::{AppError, AppResult};
use crate::formatter::Formatter;
use crate::oas::models::ApiDocument;
use crate::oas::normalization::normalize_document;
use crate::oas::resolver::{ApiSource, Resolver};
use crate::operations::{build_artifacts, OperationArtifact};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Resolves `source` with `resolver` and normalizes the result.
pub fn load_document(source: &ApiSource, resolver: &dyn Resolver) -> AppResult<ApiDocument> {
    let tree = resolver.resolve(source)?;
    let document = normalize_document(&tree)?;
    tracing::info!(
        "Loaded document: {} definitions, {} paths",
        document.definitions.len(),
        document.paths.len()
    );
    Ok(document)
}

/// Generates one declaration per definition, keyed by declaration name.
pub fn generate_definitions(
    document: &ApiDocument,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> AppResult<IndexMap<String, String>> {
    build_definitions(&document.definitions, config, formatter)
}

/// Generates operation artifacts for every route, keyed by route.
///
/// Declaration names are checked across the whole document. A repeated name is
/// logged, or rejected with [`AppError::NameCollision`] when `strict_names` is set.
pub fn generate_paths(
    document: &ApiDocument,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> AppResult<IndexMap<String, Vec<OperationArtifact>>> {
    let mut output = IndexMap::new();
    let mut owners: HashMap<String, String> = HashMap::new();

    for (route, operations) in &document.paths {
        let artifacts = build_artifacts(route, operations, config, formatter);

        for artifact in &artifacts {
            let owner = format!("{} {}", artifact.verb, artifact.route);
            for name in artifact.declaration_names() {
                let Some(first) = owners.insert(name.to_string(), owner.clone()) else {
                    continue;
                };
                if config.strict_names {
                    return Err(AppError::NameCollision {
                        name: name.to_string(),
                        first,
                        second: owner,
                    });
                }
                tracing::warn!("Declaration '{}' from {} overwrites {}", name, owner, first);
            }
        }

        output.insert(route.clone(), artifacts);
    }

    Ok(output)
}
