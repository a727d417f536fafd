#![deny(missing_docs)]

//! # Definition Builder
//!
//! One declaration per top-level named schema.

use crate::codegen::DeclarationRole;
use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult};
use crate::formatter::{format_or_empty, Formatter};
use crate::naming::definition_name;
use crate::oas::models::SchemaNode;
use crate::type_mapping::synthesize_declaration;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Synthesizes every definition, in document order.
///
/// Keys are converted to UpperCamelCase. A declaration that fails to format is
/// logged and kept as an empty string. Two keys converting to the same name
/// overwrite each other, or fail with [`AppError::NameCollision`] in strict mode.
pub fn build_definitions(
    definitions: &IndexMap<String, SchemaNode>,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> AppResult<IndexMap<String, String>> {
    let mut output = IndexMap::new();
    let mut origins: HashMap<String, &str> = HashMap::new();

    for (key, schema) in definitions {
        let name = definition_name(key);

        if let Some(first) = origins.insert(name.clone(), key.as_str()) {
            if config.strict_names {
                return Err(AppError::NameCollision {
                    name,
                    first: format!("definition '{}'", first),
                    second: format!("definition '{}'", key),
                });
            }
            tracing::warn!(
                "Definition '{}' overwrites '{}' as declaration '{}'",
                key,
                first,
                name
            );
        }

        tracing::debug!("Generating definition {}", name);
        let text = synthesize_declaration(schema, &name, DeclarationRole::Definition);
        let formatted = format_or_empty(formatter, &text, &config.format, &name);
        output.insert(name, formatted);
    }

    Ok(output)
}
