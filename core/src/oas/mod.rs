#![deny(missing_docs)]

//! # API Description Input
//!
//! - **document**: YAML/JSON loading.
//! - **resolver**: Reference resolution into a self-contained tree.
//! - **normalization**: Raw tree -> typed `SchemaNode` / `ApiDocument`.
//! - **models**: The normalized representation.

pub mod document;
pub mod models;
pub mod normalization;
pub(crate) mod ref_utils;
pub mod resolver;

pub use document::{fetch_document, parse_document_str, read_document};
pub use models::{
    ApiDocument, ArrayItems, EnumSchema, ObjectSchema, Operation, ParamLocation, Parameter,
    PrimitiveKind, RequiredSet, Response, SchemaKind, SchemaNode, Verb,
};
pub use normalization::{normalize_document, normalize_schema};
pub use resolver::{ApiSource, DefaultResolver, Resolver};
