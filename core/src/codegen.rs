#![deny(missing_docs)]

//! # Code Generation
//!
//! Textual building blocks for TypeScript declarations.
//!
//! This module owns:
//! - The [`GeneratedDeclaration`] unit and the per-call [`DeclarationTable`] of hoisted shapes.
//! - Block comment emission from descriptions/titles.
//! - Property key quoting for names that are not identifiers.
//! - Final assembly: hoisted declarations first, then the requesting declaration.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Shape of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `export interface Name { ... }`
    Interface,
    /// `export type Name = ...`
    TypeAlias,
}

/// Why a declaration exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationRole {
    /// Top-level named definition.
    Definition,
    /// Operation response type.
    Entity,
    /// Operation parameter holder.
    Params,
    /// Shape hoisted out of another declaration.
    NestedItem,
}

/// One named unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDeclaration {
    /// Declaration name.
    pub name: String,
    /// Interface or type alias.
    pub kind: DeclarationKind,
    /// The type expression (record body for interfaces).
    pub body: String,
    /// Leading comment text, if any.
    pub comment: Option<String>,
    /// Role of the declaration.
    pub role: DeclarationRole,
}

impl GeneratedDeclaration {
    /// Renders the declaration as TypeScript source (unformatted).
    pub fn render(&self) -> String {
        let comment = self.comment.as_deref().map(block_comment).unwrap_or_default();
        match self.kind {
            DeclarationKind::Interface => {
                format!("{}export interface {} {}\n", comment, self.name, self.body)
            }
            DeclarationKind::TypeAlias => {
                format!("{}export type {} = {};\n", comment, self.name, self.body)
            }
        }
    }
}

/// Hoisted declarations collected while synthesizing one top-level type.
///
/// Insertion ordered. Inserting an existing name replaces the earlier declaration
/// in place (last writer wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationTable {
    entries: IndexMap<String, GeneratedDeclaration>,
}

impl DeclarationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a declaration, replacing any earlier one of the same name.
    pub fn insert(&mut self, decl: GeneratedDeclaration) {
        if self.entries.contains_key(&decl.name) {
            tracing::debug!("Hoisted declaration '{}' overwritten", decl.name);
        }
        self.entries.insert(decl.name.clone(), decl);
    }

    /// Looks up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&GeneratedDeclaration> {
        self.entries.get(name)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declaration names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consumes the table, yielding the hoisted declarations followed by `root`, as one text.
    pub fn assemble(self, root: &GeneratedDeclaration) -> String {
        self.entries
            .values()
            .chain(std::iter::once(root))
            .map(GeneratedDeclaration::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders `text` as a block comment, one ` * ` line per source line.
pub fn block_comment(text: &str) -> String {
    let mut code = String::from("/**\n");
    for line in text.replace("*/", "*\\/").lines() {
        code.push_str(&format!(" * {}\n", line).replace(" * \n", " *\n"));
    }
    code.push_str(" */\n");
    code
}

/// Comment prefix for an optional text; empty when there is nothing to say.
pub fn comment_prefix(text: Option<&str>) -> String {
    text.filter(|t| !t.is_empty())
        .map(block_comment)
        .unwrap_or_default()
}

/// Renders a property key, quoting it unless it is a plain identifier.
pub fn property_key(name: &str) -> String {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    let ident_re =
        IDENT_RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex"));

    if ident_re.is_match(name) {
        name.to_string()
    } else {
        serde_json::Value::String(name.to_string()).to_string()
    }
}

/// Renders one record member: `<comment?><key><?>: <type>;`
pub fn record_member(name: &str, ty: &str, required: bool, comment: Option<&str>) -> String {
    format!(
        "{}{}{}: {};\n",
        comment_prefix(comment),
        property_key(name),
        if required { "" } else { "?" },
        ty
    )
}

/// Wraps rendered members into a record body.
pub fn record_body(members: &[String]) -> String {
    if members.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}}}", members.concat())
    }
}
