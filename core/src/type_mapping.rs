#![deny(missing_docs)]

//! # Type Mapping
//!
//! Recursive synthesis of TypeScript type expressions from [`SchemaNode`]s.
//!
//! Mapping rules:
//! - primitives map to `string` / `number` / `boolean` / `null` / `any`
//! - enums become literal unions (`"a" | "b"`, `1 | 2`) in source order
//! - objects become inline records, one member per property in source order
//! - arrays append `[]`; object items are hoisted to `<Parent>Item` when a
//!   [`HoistContext`] is available, or wrapped in `Array<...>` otherwise
//! - tuple items are joined into a union and hoisted the same way
//! - references left by cycle breaking, unknown tags and untyped nodes become `any`

use crate::codegen::{
    record_body, record_member, DeclarationKind, DeclarationRole, DeclarationTable,
    GeneratedDeclaration,
};
use crate::naming::hoisted_name;
use crate::oas::models::{ArrayItems, EnumSchema, ObjectSchema, PrimitiveKind, SchemaKind, SchemaNode};
use serde_json::Value;
use std::fmt;

/// Result of synthesizing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    /// Structural expression that can be used as an array element as is.
    Inline(String),
    /// Literal union; needs parentheses before an array suffix.
    Union(String),
    /// Bare name of a hoisted declaration (possibly with array suffixes).
    Reference(String),
}

impl TypeExpression {
    /// The expression text.
    pub fn as_str(&self) -> &str {
        match self {
            TypeExpression::Inline(s) | TypeExpression::Union(s) | TypeExpression::Reference(s) => s,
        }
    }

    /// The expression followed by `[]`, parenthesized when required.
    pub fn array_of(&self) -> String {
        match self {
            TypeExpression::Union(s) => format!("({})[]", s),
            other => format!("{}[]", other.as_str()),
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(rootTable, proposedName)` pair that enables hoisting.
#[derive(Debug)]
pub struct HoistContext<'t> {
    /// Table that receives hoisted declarations for the current top-level call.
    pub table: &'t mut DeclarationTable,
    /// Name of the declaration currently being built.
    pub name: String,
}

impl<'t> HoistContext<'t> {
    /// Creates a context for the declaration `name`.
    pub fn new(table: &'t mut DeclarationTable, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }
}

/// Synthesizes a type expression for `node`.
///
/// Without a context nothing is hoisted and nested objects stay inline.
pub fn synthesize(node: &SchemaNode, ctx: Option<&mut HoistContext<'_>>) -> TypeExpression {
    match ctx {
        Some(ctx) => {
            let name = ctx.name.clone();
            synth(node, Some(&mut *ctx.table), &name)
        }
        None => synth(node, None, ""),
    }
}

fn synth(node: &SchemaNode, mut table: Option<&mut DeclarationTable>, name: &str) -> TypeExpression {
    match &node.kind {
        SchemaKind::Primitive { primitive } => TypeExpression::Inline(primitive_type(*primitive).into()),
        SchemaKind::Enum(e) => enum_union(e),
        SchemaKind::Object(obj) => TypeExpression::Inline(object_record(obj, table, name)),
        SchemaKind::Array { items } => match items {
            ArrayItems::Unspecified => TypeExpression::Inline("any[]".into()),
            ArrayItems::Single(item) => single_item_array(item, table.as_deref_mut(), name),
            ArrayItems::Tuple(members) => tuple_array(members, table.as_deref_mut(), name),
        },
        SchemaKind::Reference { .. } | SchemaKind::Any | SchemaKind::Unknown { .. } => {
            TypeExpression::Inline("any".into())
        }
    }
}

/// Scalar type name for a primitive kind.
pub fn primitive_type(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Number => "number",
        PrimitiveKind::Boolean => "boolean",
        PrimitiveKind::Null => "null",
        PrimitiveKind::Any => "any",
    }
}

/// Literal union over the enum values, in source order.
pub fn enum_union(e: &EnumSchema) -> TypeExpression {
    let literals: Vec<String> = e
        .values
        .iter()
        .map(|value| enum_literal(e.kind, value))
        .collect();

    match literals.len() {
        0 => TypeExpression::Inline("never".into()),
        1 => TypeExpression::Inline(literals.concat()),
        _ => TypeExpression::Union(literals.join(" | ")),
    }
}

/// A string enum quotes every value; otherwise each value renders by its own JSON type.
fn enum_literal(kind: PrimitiveKind, value: &Value) -> String {
    match (kind, value) {
        (_, Value::String(_)) => value.to_string(),
        (PrimitiveKind::String, other) => Value::String(other.to_string()).to_string(),
        (_, Value::Object(_) | Value::Array(_)) => "any".to_string(),
        (_, other) => other.to_string(),
    }
}

fn object_record(obj: &ObjectSchema, mut table: Option<&mut DeclarationTable>, name: &str) -> String {
    let members: Vec<String> = obj
        .properties
        .iter()
        .map(|(prop_name, prop)| {
            let ty = synth(prop, table.as_deref_mut(), name);
            record_member(
                prop_name,
                ty.as_str(),
                obj.required.is_required(prop_name),
                prop.comment(),
            )
        })
        .collect();
    record_body(&members)
}

fn single_item_array(
    item: &SchemaNode,
    table: Option<&mut DeclarationTable>,
    name: &str,
) -> TypeExpression {
    let item_name = hoisted_name(name);

    match (table, &item.kind) {
        (Some(table), SchemaKind::Object(obj)) => {
            let body = object_record(obj, Some(&mut *table), &item_name);
            table.insert(GeneratedDeclaration {
                name: item_name.clone(),
                kind: DeclarationKind::Interface,
                body,
                comment: item.comment().map(str::to_string),
                role: DeclarationRole::NestedItem,
            });
            TypeExpression::Reference(format!("{}[]", item_name))
        }
        (None, SchemaKind::Object(obj)) => {
            TypeExpression::Inline(format!("Array<{}>", object_record(obj, None, &item_name)))
        }
        (table, _) => {
            let inner = synth(item, table, &item_name);
            match inner {
                TypeExpression::Reference(_) => TypeExpression::Reference(inner.array_of()),
                _ => TypeExpression::Inline(inner.array_of()),
            }
        }
    }
}

fn tuple_array(
    members: &[SchemaNode],
    mut table: Option<&mut DeclarationTable>,
    name: &str,
) -> TypeExpression {
    let item_name = hoisted_name(name);
    let parts: Vec<String> = members
        .iter()
        .map(|member| synth(member, table.as_deref_mut(), &item_name).as_str().to_string())
        .collect();

    let joined = match parts.len() {
        0 => TypeExpression::Inline("any".into()),
        1 => TypeExpression::Inline(parts.concat()),
        _ => TypeExpression::Union(parts.join(" | ")),
    };

    match table {
        Some(table) => {
            table.insert(GeneratedDeclaration {
                name: item_name.clone(),
                kind: DeclarationKind::TypeAlias,
                body: joined.as_str().to_string(),
                comment: None,
                role: DeclarationRole::NestedItem,
            });
            TypeExpression::Reference(format!("{}[]", item_name))
        }
        None => TypeExpression::Inline(joined.array_of()),
    }
}

/// Declaration kind chosen for a root node: interfaces for objects, aliases otherwise.
pub fn root_kind(node: &SchemaNode) -> DeclarationKind {
    if node.is_object() {
        DeclarationKind::Interface
    } else {
        DeclarationKind::TypeAlias
    }
}

/// Synthesizes `node` as the top-level declaration `name`, with a fresh hoisting table.
///
/// Returns the unformatted text: hoisted declarations followed by the root one.
pub fn synthesize_declaration(node: &SchemaNode, name: &str, role: DeclarationRole) -> String {
    let mut table = DeclarationTable::new();
    let body = {
        let mut ctx = HoistContext::new(&mut table, name);
        synthesize(node, Some(&mut ctx))
    };

    let root = GeneratedDeclaration {
        name: name.to_string(),
        kind: root_kind(node),
        body: body.as_str().to_string(),
        comment: node.comment().map(str::to_string),
        role,
    };
    table.assemble(&root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::RequiredSet;
    use indexmap::IndexMap;
    use serde_json::json;

    fn prim(kind: PrimitiveKind) -> SchemaNode {
        SchemaNode::primitive(kind)
    }

    fn object(props: Vec<(&str, SchemaNode)>, required: RequiredSet) -> SchemaNode {
        let properties: IndexMap<String, SchemaNode> = props
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        SchemaNode::object(properties, required)
    }

    fn names(list: &[&str]) -> RequiredSet {
        RequiredSet::Names(list.iter().map(|s| s.to_string()).collect())
    }

    fn pet() -> SchemaNode {
        object(
            vec![
                ("id", prim(PrimitiveKind::Number)),
                ("name", prim(PrimitiveKind::String)),
            ],
            names(&["id"]),
        )
    }

    #[test]
    fn test_primitives() {
        assert_eq!(synthesize(&prim(PrimitiveKind::String), None).as_str(), "string");
        assert_eq!(synthesize(&prim(PrimitiveKind::Null), None).as_str(), "null");
        let unknown = SchemaNode::new(SchemaKind::Unknown { tag: "file".into() });
        assert_eq!(synthesize(&unknown, None).as_str(), "any");
        let marker = SchemaNode::new(SchemaKind::Reference {
            pointer: "#/definitions/Node".into(),
        });
        assert_eq!(synthesize(&marker, None).as_str(), "any");
    }

    #[test]
    fn test_enum_quoting() {
        let strings = EnumSchema {
            kind: PrimitiveKind::String,
            values: vec![json!("b"), json!("a\"q")],
        };
        assert_eq!(enum_union(&strings).as_str(), r#""b" | "a\"q""#);

        let numbers = EnumSchema {
            kind: PrimitiveKind::Number,
            values: vec![json!(2), json!(1.5)],
        };
        assert_eq!(enum_union(&numbers).as_str(), "2 | 1.5");

        let flags = EnumSchema {
            kind: PrimitiveKind::Boolean,
            values: vec![json!(true)],
        };
        assert_eq!(enum_union(&flags), TypeExpression::Inline("true".into()));
    }

    #[test]
    fn test_mixed_enum_renders_each_value_by_type() {
        let mixed = EnumSchema {
            kind: PrimitiveKind::Any,
            values: vec![json!("a b"), json!(1), json!(null), json!(false)],
        };
        assert_eq!(enum_union(&mixed).as_str(), r#""a b" | 1 | null | false"#);

        let stray_string = EnumSchema {
            kind: PrimitiveKind::Number,
            values: vec![json!(1), json!("two")],
        };
        assert_eq!(enum_union(&stray_string).as_str(), r#"1 | "two""#);

        let mixed = SchemaNode::new(SchemaKind::Enum(mixed));
        assert_eq!(
            synthesize_declaration(&mixed, "M", DeclarationRole::Definition),
            "export type M = \"a b\" | 1 | null | false;\n"
        );
    }

    #[test]
    fn test_object_members_and_requiredness() {
        let text = synthesize(&pet(), None);
        assert_eq!(text.as_str(), "{\nid: number;\nname?: string;\n}");

        let all_optional = object(vec![("a", prim(PrimitiveKind::Any))], RequiredSet::All(false));
        assert_eq!(synthesize(&all_optional, None).as_str(), "{\na?: any;\n}");

        let unspecified = object(vec![("a", prim(PrimitiveKind::Any))], RequiredSet::Unspecified);
        assert_eq!(synthesize(&unspecified, None).as_str(), "{\na: any;\n}");
    }

    #[test]
    fn test_property_comments() {
        let node = object(
            vec![("id", prim(PrimitiveKind::Number).with_description("Identifier"))],
            RequiredSet::All(true),
        );
        assert_eq!(
            synthesize(&node, None).as_str(),
            "{\n/**\n * Identifier\n */\nid: number;\n}"
        );
    }

    #[test]
    fn test_array_of_object_hoists_with_context() {
        let node = SchemaNode::array_of(pet());
        let mut table = DeclarationTable::new();
        let expr = {
            let mut ctx = HoistContext::new(&mut table, "Pets");
            synthesize(&node, Some(&mut ctx))
        };

        assert_eq!(expr, TypeExpression::Reference("PetsItem[]".into()));
        assert_eq!(table.len(), 1);
        let hoisted = table.get("PetsItem").unwrap();
        assert_eq!(hoisted.kind, DeclarationKind::Interface);
        assert_eq!(hoisted.body, "{\nid: number;\nname?: string;\n}");
    }

    #[test]
    fn test_array_of_object_inline_without_context() {
        let node = SchemaNode::array_of(pet());
        assert_eq!(
            synthesize(&node, None).as_str(),
            "Array<{\nid: number;\nname?: string;\n}>"
        );
    }

    #[test]
    fn test_array_of_scalars_and_unions() {
        let node = SchemaNode::array_of(prim(PrimitiveKind::String));
        assert_eq!(synthesize(&node, None).as_str(), "string[]");

        let enum_items = SchemaNode::array_of(SchemaNode::new(SchemaKind::Enum(EnumSchema {
            kind: PrimitiveKind::String,
            values: vec![json!("a"), json!("b")],
        })));
        assert_eq!(synthesize(&enum_items, None).as_str(), r#"("a" | "b")[]"#);

        let bare = SchemaNode::new(SchemaKind::Array {
            items: ArrayItems::Unspecified,
        });
        assert_eq!(synthesize(&bare, None).as_str(), "any[]");
    }

    #[test]
    fn test_nested_arrays_hoist_innermost_object() {
        let node = SchemaNode::array_of(SchemaNode::array_of(pet()));
        let mut table = DeclarationTable::new();
        let expr = {
            let mut ctx = HoistContext::new(&mut table, "Grid");
            synthesize(&node, Some(&mut ctx))
        };
        assert_eq!(expr.as_str(), "GridItemItem[][]");
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["GridItemItem"]);
    }

    #[test]
    fn test_tuple_items() {
        let node = SchemaNode::new(SchemaKind::Array {
            items: ArrayItems::Tuple(vec![prim(PrimitiveKind::String), prim(PrimitiveKind::Number)]),
        });
        assert_eq!(synthesize(&node, None).as_str(), "(string | number)[]");

        let mut table = DeclarationTable::new();
        let expr = {
            let mut ctx = HoistContext::new(&mut table, "Pair");
            synthesize(&node, Some(&mut ctx))
        };
        assert_eq!(expr.as_str(), "PairItem[]");
        let hoisted = table.get("PairItem").unwrap();
        assert_eq!(hoisted.kind, DeclarationKind::TypeAlias);
        assert_eq!(hoisted.body, "string | number");
    }

    #[test]
    fn test_sibling_hoists_collide_last_writer_wins() {
        let node = object(
            vec![
                ("first", SchemaNode::array_of(object(vec![("a", prim(PrimitiveKind::String))], RequiredSet::All(true)))),
                ("second", SchemaNode::array_of(object(vec![("b", prim(PrimitiveKind::Number))], RequiredSet::All(true)))),
            ],
            RequiredSet::All(true),
        );
        let mut table = DeclarationTable::new();
        let expr = {
            let mut ctx = HoistContext::new(&mut table, "Owner");
            synthesize(&node, Some(&mut ctx))
        };

        assert_eq!(expr.as_str(), "{\nfirst: OwnerItem[];\nsecond: OwnerItem[];\n}");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("OwnerItem").unwrap().body, "{\nb: number;\n}");
    }

    #[test]
    fn test_synthesize_declaration_root_kinds() {
        assert_eq!(
            synthesize_declaration(&pet(), "Pet", DeclarationRole::Definition),
            "export interface Pet {\nid: number;\nname?: string;\n}\n"
        );

        let list = SchemaNode::array_of(pet()).with_description("All pets");
        assert_eq!(
            synthesize_declaration(&list, "Pets", DeclarationRole::Definition),
            "export interface PetsItem {\nid: number;\nname?: string;\n}\n\n\
             /**\n * All pets\n */\nexport type Pets = PetsItem[];\n"
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let node = SchemaNode::array_of(pet());
        let first = synthesize_declaration(&node, "Pets", DeclarationRole::Entity);
        let second = synthesize_declaration(&node, "Pets", DeclarationRole::Entity);
        assert_eq!(first, second);
    }
}
