#![deny(missing_docs)]

//! # Schema Normalization
//!
//! Pure transform from a dereferenced document (`serde_json::Value`) into the
//! [`ApiDocument`] IR. Nothing is edited in place; every call builds a new tree.
//!
//! Both Swagger 2.0 (`definitions`, `in: body`, response `schema`) and
//! OpenAPI 3 (`components/schemas`, `requestBody`, response `content`) layouts are read.

use crate::error::{AppError, AppResult};
use crate::oas::models::{
    ApiDocument, ArrayItems, EnumSchema, ObjectSchema, Operation, ParamLocation, Parameter,
    PrimitiveKind, RequiredSet, Response, SchemaKind, SchemaNode, Verb,
};
use crate::oas::ref_utils::extract_ref_name;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Shape a schema object resolves to before enum handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Object,
    Array,
    Primitive(PrimitiveKind),
    Unknown,
}

type Rule = (fn(&Map<String, Value>) -> bool, Shape);

/// Kind canonicalization rules, evaluated top to bottom; first match wins.
/// Anything that matches none of them is `any`.
const KIND_RULES: &[Rule] = &[
    (|m| type_tag(m) == Some("string"), Shape::Primitive(PrimitiveKind::String)),
    (|m| type_tag(m) == Some("integer"), Shape::Primitive(PrimitiveKind::Number)),
    (|m| type_tag(m) == Some("number"), Shape::Primitive(PrimitiveKind::Number)),
    (|m| type_tag(m) == Some("boolean"), Shape::Primitive(PrimitiveKind::Boolean)),
    (|m| type_tag(m) == Some("null"), Shape::Primitive(PrimitiveKind::Null)),
    (|m| type_tag(m) == Some("any"), Shape::Primitive(PrimitiveKind::Any)),
    (|m| type_tag(m) == Some("object"), Shape::Object),
    (|m| type_tag(m) == Some("array"), Shape::Array),
    (|m| type_tag(m).is_some(), Shape::Unknown),
    (|m| m.contains_key("properties"), Shape::Object),
    (|m| m.contains_key("items"), Shape::Array),
    (|m| m.get("default").is_some_and(Value::is_boolean), Shape::Primitive(PrimitiveKind::Boolean)),
    (|m| m.get("default").is_some_and(Value::is_number), Shape::Primitive(PrimitiveKind::Number)),
    (|m| m.get("default").is_some_and(Value::is_string), Shape::Primitive(PrimitiveKind::String)),
];

/// The `type` tag of a schema object.
///
/// A list of tags (`[string, "null"]`) yields its first non-null entry.
fn type_tag(map: &Map<String, Value>) -> Option<&str> {
    match map.get("type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(tags) => {
            let tags: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
            tags.iter()
                .copied()
                .find(|t| *t != "null")
                .or_else(|| tags.first().copied())
        }
        _ => None,
    }
}

fn classify(map: &Map<String, Value>) -> Option<Shape> {
    KIND_RULES
        .iter()
        .find(|(matches, _)| matches(map))
        .map(|(_, shape)| *shape)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Normalizes a single schema object.
pub fn normalize_schema(value: &Value) -> SchemaNode {
    let Value::Object(map) = value else {
        return SchemaNode::new(SchemaKind::Any);
    };

    let mut node = SchemaNode::new(normalize_kind(map));
    node.description = string_field(map, "description");
    node.title = string_field(map, "title");
    node
}

fn normalize_kind(map: &Map<String, Value>) -> SchemaKind {
    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        tracing::debug!(
            "Unexpanded reference to '{}' treated as any",
            extract_ref_name(pointer)
        );
        return SchemaKind::Reference {
            pointer: pointer.to_string(),
        };
    }

    let shape = classify(map);

    if let Some(values) = map.get("enum").and_then(Value::as_array) {
        let kind = match shape {
            Some(Shape::Primitive(kind)) => Some(kind),
            None => Some(infer_enum_kind(values)),
            _ => None,
        };
        if let Some(kind) = kind {
            return SchemaKind::Enum(EnumSchema {
                kind,
                values: values.clone(),
            });
        }
    }

    match shape {
        Some(Shape::Primitive(primitive)) => SchemaKind::Primitive { primitive },
        Some(Shape::Object) => SchemaKind::Object(normalize_object(map)),
        Some(Shape::Array) => SchemaKind::Array {
            items: normalize_items(map.get("items")),
        },
        Some(Shape::Unknown) => SchemaKind::Unknown {
            tag: type_tag(map).unwrap_or_default().to_string(),
        },
        None => SchemaKind::Any,
    }
}

/// Kind of an enum with no `type`: string only when every value is a string.
fn infer_enum_kind(values: &[Value]) -> PrimitiveKind {
    if !values.is_empty() && values.iter().all(Value::is_string) {
        PrimitiveKind::String
    } else if !values.is_empty() && values.iter().all(Value::is_number) {
        PrimitiveKind::Number
    } else if !values.is_empty() && values.iter().all(Value::is_boolean) {
        PrimitiveKind::Boolean
    } else {
        PrimitiveKind::Any
    }
}

fn normalize_object(map: &Map<String, Value>) -> ObjectSchema {
    let properties = map
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| (name.clone(), normalize_schema(prop)))
                .collect()
        })
        .unwrap_or_default();

    let required = match map.get("required") {
        Some(Value::Bool(flag)) => RequiredSet::All(*flag),
        Some(Value::Array(names)) => RequiredSet::Names(
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => RequiredSet::Unspecified,
    };

    ObjectSchema {
        properties,
        required,
    }
}

fn normalize_items(items: Option<&Value>) -> ArrayItems {
    match items {
        Some(Value::Array(members)) => {
            ArrayItems::Tuple(members.iter().map(normalize_schema).collect())
        }
        Some(item @ Value::Object(_)) => ArrayItems::Single(Box::new(normalize_schema(item))),
        _ => ArrayItems::Unspecified,
    }
}

/// Normalizes a whole dereferenced document.
///
/// Fails with [`AppError::Resolution`] when `paths` is structurally malformed.
pub fn normalize_document(root: &Value) -> AppResult<ApiDocument> {
    let mut doc = ApiDocument::default();

    let definition_sources = [
        root.get("definitions"),
        root.get("components").and_then(|c| c.get("schemas")),
    ];
    for source in definition_sources.into_iter().flatten() {
        if let Some(defs) = source.as_object() {
            for (name, schema) in defs {
                doc.definitions
                    .insert(name.clone(), normalize_schema(schema));
            }
        }
    }

    let Some(paths) = root.get("paths") else {
        return Ok(doc);
    };
    let paths = paths
        .as_object()
        .ok_or_else(|| AppError::Resolution("`paths` must be a mapping".into()))?;

    for (route, item) in paths {
        let item = item.as_object().ok_or_else(|| {
            AppError::Resolution(format!("Path item '{}' must be a mapping", route))
        })?;

        let common = item
            .get("parameters")
            .and_then(Value::as_array)
            .map(|list| normalize_parameters(list))
            .unwrap_or_default();

        let mut operations = IndexMap::new();
        for (key, op) in item {
            let Some(verb) = Verb::from_key(key) else {
                continue;
            };
            let op = op.as_object().ok_or_else(|| {
                AppError::Resolution(format!("Operation {} {} must be a mapping", verb, route))
            })?;
            operations.insert(verb, normalize_operation(route, verb, op, &common));
        }
        doc.paths.insert(route.clone(), operations);
    }

    Ok(doc)
}

fn normalize_operation(
    route: &str,
    verb: Verb,
    op: &Map<String, Value>,
    common: &[Parameter],
) -> Operation {
    let own = op
        .get("parameters")
        .and_then(Value::as_array)
        .map(|list| normalize_parameters(list))
        .unwrap_or_default();

    // Path-level parameters apply unless the operation overrides (name, in).
    let mut parameters: Vec<Parameter> = common
        .iter()
        .filter(|c| {
            !own.iter()
                .any(|p| p.name == c.name && p.location == c.location)
        })
        .cloned()
        .collect();
    parameters.extend(own);

    if let Some(body) = op.get("requestBody").and_then(Value::as_object) {
        parameters.push(request_body_parameter(body));
    }

    let responses = op
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(code, resp)| (code.clone(), normalize_response(resp)))
                .collect()
        })
        .unwrap_or_default();

    Operation {
        route: route.to_string(),
        verb,
        operation_id: string_field(op, "operationId"),
        parameters,
        responses,
        summary: string_field(op, "summary"),
        description: string_field(op, "description"),
    }
}

fn normalize_parameters(list: &[Value]) -> Vec<Parameter> {
    list.iter().filter_map(normalize_parameter).collect()
}

fn normalize_parameter(value: &Value) -> Option<Parameter> {
    let map = value.as_object()?;
    let name = string_field(map, "name")?;
    let Some(location) = map
        .get("in")
        .and_then(Value::as_str)
        .and_then(ParamLocation::from_in)
    else {
        tracing::debug!("Skipping parameter '{}' with unsupported location", name);
        return None;
    };

    // Swagger 2 non-body parameters carry their type inline; OpenAPI 3 nests it under `schema`.
    let schema = match map.get("schema") {
        Some(schema) => normalize_schema(schema),
        None if location == ParamLocation::Body => SchemaNode::new(SchemaKind::Any),
        None => {
            let mut node = normalize_schema(value);
            node.description = None;
            node.title = None;
            node
        }
    };

    Some(Parameter {
        name,
        location,
        required: map.get("required").and_then(Value::as_bool).unwrap_or(false),
        description: string_field(map, "description"),
        schema,
        raw: value.clone(),
    })
}

fn request_body_parameter(body: &Map<String, Value>) -> Parameter {
    let raw_schema = json_media_schema(body);
    Parameter {
        name: "body".to_string(),
        location: ParamLocation::Body,
        required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
        description: string_field(body, "description"),
        schema: raw_schema
            .map(normalize_schema)
            .unwrap_or_else(|| SchemaNode::new(SchemaKind::Any)),
        raw: Value::Object(body.clone()),
    }
}

/// Schema of the JSON media type in a `content` map (first media type as fallback).
fn json_media_schema(map: &Map<String, Value>) -> Option<&Value> {
    let content = map.get("content")?.as_object()?;
    let media = content
        .iter()
        .find(|(media, _)| media.contains("json"))
        .or_else(|| content.iter().next())?;
    media.1.get("schema")
}

fn normalize_response(value: &Value) -> Response {
    let map = value.as_object();
    let raw_schema = map.and_then(|m| m.get("schema").or_else(|| json_media_schema(m)));

    Response {
        description: map.and_then(|m| string_field(m, "description")),
        schema: raw_schema.map(normalize_schema),
        raw_schema: raw_schema.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_and_number_collapse() {
        for tag in ["integer", "number"] {
            let node = normalize_schema(&json!({ "type": tag }));
            assert_eq!(
                node.kind,
                SchemaKind::Primitive {
                    primitive: PrimitiveKind::Number
                }
            );
        }
    }

    #[test]
    fn test_fallback_rules_in_order() {
        let node = normalize_schema(&json!({ "properties": { "a": { "type": "string" } } }));
        assert!(node.is_object());

        let node = normalize_schema(&json!({ "items": { "type": "string" } }));
        assert!(node.is_array());

        let node = normalize_schema(&json!({ "default": true }));
        assert_eq!(
            node.kind,
            SchemaKind::Primitive {
                primitive: PrimitiveKind::Boolean
            }
        );

        let node = normalize_schema(&json!({ "description": "nothing else" }));
        assert_eq!(node.kind, SchemaKind::Any);
        assert_eq!(node.comment(), Some("nothing else"));
    }

    #[test]
    fn test_default_value_picks_primitive() {
        let kind = |schema: Value| normalize_schema(&schema).kind;
        assert_eq!(
            kind(json!({ "default": "draft" })),
            SchemaKind::Primitive {
                primitive: PrimitiveKind::String
            }
        );
        assert_eq!(
            kind(json!({ "default": 10 })),
            SchemaKind::Primitive {
                primitive: PrimitiveKind::Number
            }
        );
        assert_eq!(
            kind(json!({ "default": 0.5, "description": "ratio" })),
            SchemaKind::Primitive {
                primitive: PrimitiveKind::Number
            }
        );
        // An explicit tag outranks the default's type.
        assert_eq!(
            kind(json!({ "type": "string", "default": 10 })),
            SchemaKind::Primitive {
                primitive: PrimitiveKind::String
            }
        );
        assert_eq!(kind(json!({ "default": null })), SchemaKind::Any);
    }

    #[test]
    fn test_unknown_tag_is_observable() {
        let node = normalize_schema(&json!({ "type": "file" }));
        assert_eq!(
            node.kind,
            SchemaKind::Unknown {
                tag: "file".into()
            }
        );
    }

    #[test]
    fn test_enum_keeps_order_and_kind() {
        let node = normalize_schema(&json!({ "type": "integer", "enum": [3, 1, 2] }));
        match node.kind {
            SchemaKind::Enum(e) => {
                assert_eq!(e.kind, PrimitiveKind::Number);
                assert_eq!(e.values, vec![json!(3), json!(1), json!(2)]);
            }
            other => panic!("expected enum, got {:?}", other),
        }

        let node = normalize_schema(&json!({ "enum": ["b", "a"] }));
        assert!(matches!(
            node.kind,
            SchemaKind::Enum(EnumSchema {
                kind: PrimitiveKind::String,
                ..
            })
        ));
    }

    #[test]
    fn test_mixed_enum_without_type_is_any() {
        match normalize_schema(&json!({ "enum": ["a b", 1] })).kind {
            SchemaKind::Enum(e) => {
                assert_eq!(e.kind, PrimitiveKind::Any);
                assert_eq!(e.values, vec![json!("a b"), json!(1)]);
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_nullable_type_list() {
        let node = normalize_schema(&json!({ "type": ["null", "string"] }));
        assert_eq!(
            node.kind,
            SchemaKind::Primitive {
                primitive: PrimitiveKind::String
            }
        );
    }

    #[test]
    fn test_required_variants() {
        let obj = |required: Value| match normalize_schema(
            &json!({ "type": "object", "properties": {}, "required": required }),
        )
        .kind
        {
            SchemaKind::Object(o) => o.required,
            _ => unreachable!(),
        };
        assert_eq!(obj(json!(true)), RequiredSet::All(true));
        assert!(matches!(obj(json!(["id"])), RequiredSet::Names(n) if n.contains("id")));

        match normalize_schema(&json!({ "type": "object" })).kind {
            SchemaKind::Object(o) => assert_eq!(o.required, RequiredSet::Unspecified),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_tuple_and_marker() {
        let node = normalize_schema(&json!({
            "type": "array",
            "items": [{ "type": "string" }, { "$ref": "#/definitions/Node" }]
        }));
        match node.kind {
            SchemaKind::Array {
                items: ArrayItems::Tuple(members),
            } => {
                assert_eq!(members.len(), 2);
                assert!(matches!(members[1].kind, SchemaKind::Reference { .. }));
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_swagger2_document() {
        let root = json!({
            "swagger": "2.0",
            "definitions": { "Pet": { "type": "object" } },
            "paths": {
                "/pets/{id}": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "type": "integer" }
                    ],
                    "put": {
                        "operationId": "updatePet",
                        "parameters": [
                            { "name": "pet", "in": "body", "schema": { "type": "object" } }
                        ],
                        "responses": { "200": { "description": "ok", "schema": { "type": "object" } } }
                    },
                    "get": { "operationId": "getPet", "responses": {} }
                }
            }
        });

        let doc = normalize_document(&root).unwrap();
        assert_eq!(doc.definitions.len(), 1);

        let ops = &doc.paths["/pets/{id}"];
        let verbs: Vec<Verb> = ops.keys().copied().collect();
        assert_eq!(verbs, vec![Verb::Put, Verb::Get]);

        let put = &ops[&Verb::Put];
        assert_eq!(put.parameters.len(), 2);
        assert_eq!(put.parameters[0].name, "id");
        assert_eq!(
            put.parameters[0].schema.kind,
            SchemaKind::Primitive {
                primitive: PrimitiveKind::Number
            }
        );
        assert!(put.parameters[1].is_body());
        assert!(put.responses["200"].schema.as_ref().unwrap().is_object());
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let root = json!({
            "paths": {
                "/pets/{id}": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "type": "string" },
                        { "name": "id", "in": "query", "type": "string" },
                        { "name": "trace", "in": "header", "type": "string" }
                    ],
                    "get": {
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "type": "integer",
                                "description": "Pet id"
                            }
                        ]
                    }
                }
            }
        });

        let doc = normalize_document(&root).unwrap();
        let params = &doc.paths["/pets/{id}"][&Verb::Get].parameters;
        let described: Vec<(&str, ParamLocation)> =
            params.iter().map(|p| (p.name.as_str(), p.location)).collect();
        assert_eq!(
            described,
            vec![
                ("id", ParamLocation::Query),
                ("trace", ParamLocation::Header),
                ("id", ParamLocation::Path),
            ]
        );

        let overridden = &params[2];
        assert_eq!(overridden.description.as_deref(), Some("Pet id"));
        assert_eq!(
            overridden.schema.kind,
            SchemaKind::Primitive {
                primitive: PrimitiveKind::Number
            }
        );
    }

    #[test]
    fn test_normalize_openapi3_document() {
        let root = json!({
            "openapi": "3.0.0",
            "components": { "schemas": { "Pet": { "type": "object" } } },
            "paths": {
                "/pets": {
                    "post": {
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": { "type": "object" } } }
                        },
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": { "type": "string" } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let doc = normalize_document(&root).unwrap();
        assert!(doc.definitions.contains_key("Pet"));
        let post = &doc.paths["/pets"][&Verb::Post];
        assert_eq!(post.parameters.len(), 1);
        assert!(post.parameters[0].is_body());
        assert!(post.parameters[0].required);
        assert!(post.responses["200"].schema.as_ref().unwrap().is_array());
    }

    #[test]
    fn test_malformed_paths_are_resolution_errors() {
        let err = normalize_document(&json!({ "paths": [] })).unwrap_err();
        assert!(matches!(err, AppError::Resolution(_)));
    }
}
