#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Deterministic declaration names derived from routes, operation ids and a
//! user-supplied template.
//!
//! Names are not guaranteed unique: two operations that resolve to the same
//! name overwrite each other unless strict mode is on (see `generator`).

use crate::oas::models::Verb;
use heck::ToUpperCamelCase;

/// Template used when none is configured.
pub const DEFAULT_NAMING_TEMPLATE: &str = "{path}{operationId}";

/// Role suffix appended to a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    /// Success response type.
    Entity,
    /// Request parameter holder.
    Params,
    /// Hoisted nested shape.
    Item,
}

impl NameRole {
    /// The literal suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            NameRole::Entity => "Entity",
            NameRole::Params => "Params",
            NameRole::Item => "Item",
        }
    }
}

/// Expands `template` and converts it to UpperCamelCase, then appends the role suffix.
///
/// Each token value is camel-cased before substitution so that adjacent tokens
/// keep a word boundary.
///
/// e.g. `("{path}{operationId}", "get-pets", "listPets", Entity)` -> `GetPetsListPetsEntity`
pub fn resolve_name(template: &str, path: &str, operation_id: &str, role: NameRole) -> String {
    let expanded = template
        .replace("{path}", &path.to_upper_camel_case())
        .replace("{operationId}", &operation_id.to_upper_camel_case());
    format!("{}{}", expanded.to_upper_camel_case(), role.suffix())
}

/// Slug used as the `{path}` token for an operation: verb plus the static route segments.
///
/// e.g. `GET /pets/{id}` -> `get-pets`
pub fn route_slug(verb: Verb, route: &str) -> String {
    std::iter::once(verb.as_lower())
        .chain(static_segments(route))
        .collect::<Vec<_>>()
        .join("-")
}

fn static_segments(route: &str) -> impl Iterator<Item = &str> {
    route
        .split('/')
        .filter(|seg| !seg.is_empty() && !is_path_param(seg))
}

fn is_path_param(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Last segment of a route, with template braces stripped.
///
/// e.g. `/pets/{id}` -> `id`
pub fn short_name(route: &str) -> String {
    route
        .split('/')
        .filter(|seg| !seg.is_empty())
        .next_back()
        .map(|seg| seg.trim_start_matches('{').trim_end_matches('}').to_string())
        .unwrap_or_default()
}

/// Declaration name for a top-level definition key.
pub fn definition_name(key: &str) -> String {
    key.to_upper_camel_case()
}

/// Name proposed for a shape hoisted out of `parent`.
pub fn hoisted_name(parent: &str) -> String {
    format!("{}{}", parent, NameRole::Item.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name_default_template() {
        assert_eq!(
            resolve_name(DEFAULT_NAMING_TEMPLATE, "get-pets", "listPets", NameRole::Entity),
            "GetPetsListPetsEntity"
        );
        assert_eq!(
            resolve_name(DEFAULT_NAMING_TEMPLATE, "get-pets", "getPet", NameRole::Params),
            "GetPetsGetPetParams"
        );
    }

    #[test]
    fn test_resolve_name_custom_template() {
        assert_eq!(
            resolve_name("api_{operationId}", "get-pets", "listPets", NameRole::Entity),
            "ApiListPetsEntity"
        );
        assert_eq!(
            resolve_name("{path}", "post-users", "ignored", NameRole::Params),
            "PostUsersParams"
        );
    }

    #[test]
    fn test_resolve_name_without_operation_id() {
        assert_eq!(
            resolve_name(DEFAULT_NAMING_TEMPLATE, "delete-pets", "", NameRole::Entity),
            "DeletePetsEntity"
        );
    }

    #[test]
    fn test_route_slug() {
        assert_eq!(route_slug(Verb::Get, "/pets/{id}"), "get-pets");
        assert_eq!(
            route_slug(Verb::Post, "/users/{id}/activate"),
            "post-users-activate"
        );
        assert_eq!(route_slug(Verb::Head, "/"), "head");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("/pets/{id}"), "id");
        assert_eq!(short_name("/pets/list/"), "list");
        assert_eq!(short_name("/"), "");
    }

    #[test]
    fn test_definition_and_hoisted_names() {
        assert_eq!(definition_name("pet_owner"), "PetOwner");
        assert_eq!(definition_name("Pet"), "Pet");
        assert_eq!(hoisted_name("Pet"), "PetItem");
    }
}
