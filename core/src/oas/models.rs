#![deny(missing_docs)]

//! # Schema Models
//!
//! Intermediate Representation (IR) for a dereferenced API description.
//!
//! The normalizer produces these from raw JSON; the type mapper and the
//! builders only ever see this closed vocabulary of kinds.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Canonical primitive kinds after normalization.
///
/// `integer` and `number` collapse into `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// `string`
    String,
    /// `integer` / `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `any`
    Any,
}

impl PrimitiveKind {
    /// The canonical tag of this kind, as used in `typeLibraryElementMap` keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Any => "any",
        }
    }
}

/// Requiredness information carried by an object schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum RequiredSet {
    /// The schema says nothing about requiredness.
    #[default]
    Unspecified,
    /// Object-wide flag: every property required (`true`) or none (`false`).
    All(bool),
    /// Explicit list of required property names.
    Names(IndexSet<String>),
}

impl RequiredSet {
    /// Resolves requiredness of `name`.
    ///
    /// Unspecified defaults to required; an explicit list that lacks the name
    /// resolves to not required.
    pub fn is_required(&self, name: &str) -> bool {
        match self {
            RequiredSet::Unspecified => true,
            RequiredSet::All(flag) => *flag,
            RequiredSet::Names(names) => names.contains(name),
        }
    }

    /// Like [`RequiredSet::is_required`], but uses `fallback` when nothing is specified.
    pub fn is_required_or(&self, name: &str, fallback: bool) -> bool {
        match self {
            RequiredSet::Unspecified => fallback,
            other => other.is_required(name),
        }
    }
}

/// Object schema: ordered properties plus requiredness.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectSchema {
    /// Properties in document order.
    pub properties: IndexMap<String, SchemaNode>,
    /// Requiredness of the properties.
    pub required: RequiredSet,
}

/// Array item shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayItems {
    /// `items` absent.
    Unspecified,
    /// Homogeneous array.
    Single(Box<SchemaNode>),
    /// Tuple-like ordered members.
    Tuple(Vec<SchemaNode>),
}

/// Enum schema: literal values over one primitive kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumSchema {
    /// The underlying primitive kind.
    pub kind: PrimitiveKind,
    /// Literal values in document order.
    pub values: Vec<Value>,
}

/// The kind-specific part of a schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaKind {
    /// Structural record.
    Object(ObjectSchema),
    /// List or tuple.
    Array {
        /// Item shape.
        items: ArrayItems,
    },
    /// Scalar.
    Primitive {
        /// Canonical primitive kind.
        primitive: PrimitiveKind,
    },
    /// Literal union.
    Enum(EnumSchema),
    /// A `$ref` the resolver left in place to break a cycle.
    Reference {
        /// The pointer that was not expanded.
        pointer: String,
    },
    /// No type information at all.
    Any,
    /// A `type` tag outside the known vocabulary.
    Unknown {
        /// The raw tag.
        tag: String,
    },
}

/// One node of the structural type description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    /// `description` of the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `title` of the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The kind and its payload.
    #[serde(flatten)]
    pub kind: SchemaKind,
}

impl SchemaNode {
    /// A node of the given kind without metadata.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            description: None,
            title: None,
            kind,
        }
    }

    /// Shorthand for a primitive node.
    pub fn primitive(primitive: PrimitiveKind) -> Self {
        Self::new(SchemaKind::Primitive { primitive })
    }

    /// Shorthand for an object node.
    pub fn object(properties: IndexMap<String, SchemaNode>, required: RequiredSet) -> Self {
        Self::new(SchemaKind::Object(ObjectSchema {
            properties,
            required,
        }))
    }

    /// Shorthand for a homogeneous array node.
    pub fn array_of(item: SchemaNode) -> Self {
        Self::new(SchemaKind::Array {
            items: ArrayItems::Single(Box::new(item)),
        })
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Comment text for the node: description, failing that title. Empty strings count as absent.
    pub fn comment(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().filter(|s| !s.is_empty()))
    }

    /// Whether the node is an object.
    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object(_))
    }

    /// Whether the node is an array.
    pub fn is_array(&self) -> bool {
        matches!(self.kind, SchemaKind::Array { .. })
    }
}

/// HTTP verbs recognised on a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
}

impl Verb {
    /// Parses a path-item key (case-insensitive). Non-verb keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Verb::Get),
            "put" => Some(Verb::Put),
            "post" => Some(Verb::Post),
            "delete" => Some(Verb::Delete),
            "options" => Some(Verb::Options),
            "head" => Some(Verb::Head),
            "patch" => Some(Verb::Patch),
            _ => None,
        }
    }

    /// Lower-case name, as written in documents.
    pub fn as_lower(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Put => "put",
            Verb::Post => "post",
            Verb::Delete => "delete",
            Verb::Options => "options",
            Verb::Head => "head",
            Verb::Patch => "patch",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_lower().to_ascii_uppercase())
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// `in: body` (or an OpenAPI 3 `requestBody`).
    Body,
    /// `in: query`
    Query,
    /// `in: header`
    Header,
    /// `in: path`
    Path,
    /// `in: formData`
    FormData,
}

impl ParamLocation {
    /// Parses the `in` field.
    pub fn from_in(value: &str) -> Option<Self> {
        match value {
            "body" => Some(ParamLocation::Body),
            "query" => Some(ParamLocation::Query),
            "header" => Some(ParamLocation::Header),
            "path" => Some(ParamLocation::Path),
            "formData" => Some(ParamLocation::FormData),
            _ => None,
        }
    }
}

/// An operation parameter.
///
/// Body parameters carry a nested schema; the others carry their primitive,
/// enum or simple array type directly in `schema`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    pub location: ParamLocation,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Description of the parameter.
    pub description: Option<String>,
    /// Type of the parameter.
    pub schema: SchemaNode,
    /// Raw parameter object, as dereferenced.
    pub raw: Value,
}

impl Parameter {
    /// Whether this is a body parameter.
    pub fn is_body(&self) -> bool {
        self.location == ParamLocation::Body
    }
}

/// A response entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Response description.
    pub description: Option<String>,
    /// Normalized schema, if the response has one.
    pub schema: Option<SchemaNode>,
    /// Raw schema, as dereferenced.
    pub raw_schema: Option<Value>,
}

/// One HTTP verb on one route.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Route path (e.g. `/pets/{id}`).
    pub route: String,
    /// HTTP verb.
    pub verb: Verb,
    /// `operationId`.
    pub operation_id: Option<String>,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code, in declaration order.
    pub responses: IndexMap<String, Response>,
    /// Human summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
}

/// A dereferenced, normalized API description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiDocument {
    /// Top-level named schemas, in document order.
    pub definitions: IndexMap<String, SchemaNode>,
    /// Routes, each mapping verbs (in document order) to operations.
    pub paths: IndexMap<String, IndexMap<Verb, Operation>>,
}
