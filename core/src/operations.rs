#![deny(missing_docs)]

//! # Operation Artifact Builder
//!
//! Per-verb generation for a route: one response entity type and one
//! parameter holder type, plus metadata for templating.

use crate::codegen::{
    record_body, record_member, DeclarationKind, DeclarationRole, DeclarationTable,
    GeneratedDeclaration,
};
use crate::config::GeneratorConfig;
use crate::forms::{form_details, FormDetails};
use crate::formatter::{format_or_empty, Formatter};
use crate::naming::{resolve_name, route_slug, short_name, NameRole};
use crate::oas::models::{Operation, Parameter, Response, SchemaKind, SchemaNode, Verb};
use crate::type_mapping::{synthesize, synthesize_declaration, HoistContext};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Verb identity flags; exactly one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbFlags {
    /// GET
    pub is_get: bool,
    /// PUT
    pub is_put: bool,
    /// POST
    pub is_post: bool,
    /// DELETE
    pub is_delete: bool,
    /// OPTIONS
    pub is_options: bool,
    /// HEAD
    pub is_head: bool,
    /// PATCH
    pub is_patch: bool,
}

impl From<Verb> for VerbFlags {
    fn from(verb: Verb) -> Self {
        let mut flags = VerbFlags::default();
        match verb {
            Verb::Get => flags.is_get = true,
            Verb::Put => flags.is_put = true,
            Verb::Post => flags.is_post = true,
            Verb::Delete => flags.is_delete = true,
            Verb::Options => flags.is_options = true,
            Verb::Head => flags.is_head = true,
            Verb::Patch => flags.is_patch = true,
        }
        flags
    }
}

/// Everything generated for one verb on one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationArtifact {
    /// Route path.
    pub route: String,
    /// HTTP verb.
    pub verb: Verb,
    /// Verb identity flags.
    #[serde(flatten)]
    pub flags: VerbFlags,
    /// Short name (last route segment).
    pub name: String,
    /// `operationId`.
    pub operation_id: Option<String>,
    /// Operation summary.
    pub summary: Option<String>,
    /// Whether the 200 response is an array.
    pub is_array_entity: bool,
    /// Name of the response declaration, when one was generated.
    pub entity_name: Option<String>,
    /// Name of the parameter declaration, when one was generated.
    pub params_name: Option<String>,
    /// Response declaration text (empty when not applicable).
    pub entity: String,
    /// Parameter declaration text (empty when not applicable).
    pub params: String,
    /// Raw response schema as pretty JSON (`includeRawJsonSchema`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_entity_schema: Option<String>,
    /// Raw parameter list as pretty JSON (`includeRawJsonSchema`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_params_schema: Option<String>,
    /// Form descriptors (`typeLibraryElementMap`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormDetails>,
}

impl OperationArtifact {
    /// Declaration names produced by this artifact.
    pub fn declaration_names(&self) -> impl Iterator<Item = &str> {
        self.entity_name
            .as_deref()
            .into_iter()
            .chain(self.params_name.as_deref())
    }
}

/// Builds artifacts for every verb of `route`, in the order the mapping yields them.
pub fn build_artifacts(
    route: &str,
    operations: &IndexMap<Verb, Operation>,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> Vec<OperationArtifact> {
    operations
        .iter()
        .map(|(verb, op)| build_artifact(route, *verb, op, config, formatter))
        .collect()
}

fn build_artifact(
    route: &str,
    verb: Verb,
    op: &Operation,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> OperationArtifact {
    let slug = route_slug(verb, route);
    let operation_id = op.operation_id.as_deref().unwrap_or_default();

    let mut artifact = OperationArtifact {
        route: route.to_string(),
        verb,
        flags: verb.into(),
        name: short_name(route),
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        is_array_entity: false,
        entity_name: None,
        params_name: None,
        entity: String::new(),
        params: String::new(),
        raw_entity_schema: None,
        raw_params_schema: None,
        form: None,
    };

    // 1. Response entity
    if let Some(response) = select_response(op) {
        if let Some(schema) = &response.schema {
            let name = resolve_name(&config.naming_template, &slug, operation_id, NameRole::Entity);
            tracing::debug!("Generating {} {} entity {}", verb, route, name);

            let text = match response_comment(schema, response) {
                Some(described) => synthesize_declaration(&described, &name, DeclarationRole::Entity),
                None => synthesize_declaration(schema, &name, DeclarationRole::Entity),
            };
            artifact.entity = format_or_empty(formatter, &text, &config.format, &name);
            artifact.is_array_entity = op
                .responses
                .get("200")
                .and_then(|r| r.schema.as_ref())
                .is_some_and(|s| s.is_array());
            artifact.entity_name = Some(name);

            if config.include_raw_json_schema {
                artifact.raw_entity_schema = response.raw_schema.as_ref().map(pretty_json);
            }
        }
    }

    // 2. Parameter holder
    if !op.parameters.is_empty() {
        let name = resolve_name(&config.naming_template, &slug, operation_id, NameRole::Params);
        tracing::debug!("Generating {} {} params {}", verb, route, name);

        let text = params_declaration(op, &name);
        artifact.params = format_or_empty(formatter, &text, &config.format, &name);
        artifact.params_name = Some(name);

        if config.include_raw_json_schema {
            let raw: Vec<Value> = op.parameters.iter().map(|p| p.raw.clone()).collect();
            artifact.raw_params_schema = Some(pretty_json(&Value::Array(raw)));
        }
    }

    // 3. Form descriptors
    if let Some(map) = &config.type_library_element_map {
        artifact.form = Some(form_details(&op.parameters, map));
    }

    artifact
}

/// Picks the response to synthesize: an object or array `200`, otherwise the
/// first array response of any status code.
fn select_response(op: &Operation) -> Option<&Response> {
    op.responses
        .get("200")
        .filter(|r| {
            r.schema
                .as_ref()
                .is_some_and(|s| s.is_object() || s.is_array())
        })
        .or_else(|| {
            op.responses
                .values()
                .find(|r| r.schema.as_ref().is_some_and(SchemaNode::is_array))
        })
}

/// The schema with the response description as its comment, when the schema has none.
fn response_comment(schema: &SchemaNode, response: &Response) -> Option<SchemaNode> {
    let description = response.description.as_deref().filter(|d| !d.is_empty())?;
    match schema.comment() {
        Some(_) => None,
        None => Some(schema.clone().with_description(description)),
    }
}

/// Renders the parameter holder declaration, hoisted shapes first.
fn params_declaration(op: &Operation, name: &str) -> String {
    let mut table = DeclarationTable::new();

    let members: Vec<String> = match op.parameters.as_slice() {
        // The whole request body is the parameter object: splice its properties.
        [body] if body.is_body() && body.schema.is_object() => {
            flattened_body_members(body, &mut table, name)
        }
        params => params
            .iter()
            .map(|p| {
                let mut ctx = HoistContext::new(&mut table, name);
                let ty = synthesize(&p.schema, Some(&mut ctx));
                record_member(&p.name, ty.as_str(), p.required, p.description.as_deref())
            })
            .collect(),
    };

    let root = GeneratedDeclaration {
        name: name.to_string(),
        kind: DeclarationKind::Interface,
        body: record_body(&members),
        comment: op
            .description
            .as_deref()
            .or(op.summary.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        role: DeclarationRole::Params,
    };
    table.assemble(&root)
}

/// Members of a lone body parameter's object schema.
///
/// When the schema says nothing about requiredness, the parameter's own
/// `required` flag applies to every property.
fn flattened_body_members(body: &Parameter, table: &mut DeclarationTable, name: &str) -> Vec<String> {
    let SchemaKind::Object(obj) = &body.schema.kind else {
        return Vec::new();
    };

    obj.properties
        .iter()
        .map(|(prop_name, prop)| {
            let mut ctx = HoistContext::new(&mut *table, name);
            let ty = synthesize(prop, Some(&mut ctx));
            record_member(
                prop_name,
                ty.as_str(),
                obj.required.is_required_or(prop_name, body.required),
                prop.comment(),
            )
        })
        .collect()
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
