#![deny(missing_docs)]

//! # Typegen Core
//!
//! Compiles API descriptions (Swagger 2 / OpenAPI 3) into TypeScript declarations:
//! one per named definition, and an entity/params pair per route operation.

/// Shared error types.
pub mod error;

/// Generator options.
pub mod config;

/// API description loading, resolution and normalization.
pub mod oas;

/// Declaration naming.
pub mod naming;

/// Declaration rendering primitives.
pub mod codegen;

/// Schema -> TypeScript type synthesis.
pub mod type_mapping;

/// Formatter contract and default implementation.
pub mod formatter;

/// Per-definition declarations.
pub mod definitions;

/// Per-operation artifacts.
pub mod operations;

/// Form field descriptors.
pub mod forms;

/// Top-level entry points.
pub mod generator;

pub use codegen::{DeclarationKind, DeclarationRole, DeclarationTable, GeneratedDeclaration};
pub use config::GeneratorConfig;
pub use definitions::build_definitions;
pub use error::{AppError, AppResult};
pub use formatter::{DefaultFormatter, FormatOptions, Formatter};
pub use forms::{FormDetails, FormElementMap, FormField};
pub use generator::{generate_definitions, generate_paths, load_document};
pub use naming::{resolve_name, NameRole, DEFAULT_NAMING_TEMPLATE};
pub use oas::{ApiDocument, ApiSource, DefaultResolver, Resolver, SchemaKind, SchemaNode};
pub use operations::{build_artifacts, OperationArtifact, VerbFlags};
pub use type_mapping::{synthesize, synthesize_declaration, HoistContext, TypeExpression};
