#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Options recognised by the generators. Every field has a default, so an
//! empty config file (or none at all) is valid.

use crate::error::{AppError, AppResult};
use crate::forms::FormElementMap;
use crate::formatter::FormatOptions;
use crate::naming::DEFAULT_NAMING_TEMPLATE;
use crate::oas::document::parse_document_str;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Generator options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Template for operation declaration names (`{path}` and `{operationId}` tokens).
    pub naming_template: String,
    /// Attach raw JSON of response schemas and parameter lists to operation artifacts.
    pub include_raw_json_schema: bool,
    /// Widget library mapping; when present, artifacts carry form field descriptors.
    pub type_library_element_map: Option<FormElementMap>,
    /// Fail with a name collision instead of silently overwriting.
    pub strict_names: bool,
    /// Formatter layout options.
    pub format: FormatOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming_template: DEFAULT_NAMING_TEMPLATE.to_string(),
            include_raw_json_schema: false,
            type_library_element_map: None,
            strict_names: false,
            format: FormatOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a config from a YAML or JSON file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
            .map_err(|e| AppError::Parse(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Parses a config from YAML or JSON text.
    pub fn from_str_content(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value = parse_document_str(content)?;
        serde_json::from_value(value).map_err(|e| AppError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.naming_template, "{path}{operationId}");
        assert!(!config.include_raw_json_schema);
        assert!(config.type_library_element_map.is_none());
        assert!(!config.strict_names);
        assert_eq!(config.format.indent_width, 2);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_str_content(
            "namingTemplate: 'api_{operationId}'\nformat:\n  indentWidth: 4\n",
        )
        .unwrap();
        assert_eq!(config.naming_template, "api_{operationId}");
        assert_eq!(config.format.indent_width, 4);
        assert!(!config.strict_names);
    }

    #[test]
    fn test_element_map_from_json() {
        let config = GeneratorConfig::from_str_content(
            r#"{"typeLibraryElementMap": {"library": "element-ui", "elements": {"string": "ElInput"}}}"#,
        )
        .unwrap();
        let map = config.type_library_element_map.unwrap();
        assert_eq!(map.library, "element-ui");
        assert_eq!(map.elements["string"], "ElInput");
        assert_eq!(map.fallback, "Input");
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(
            GeneratorConfig::from_str_content("  \n").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = GeneratorConfig::from_str_content("strictNames: 'sometimes'").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
