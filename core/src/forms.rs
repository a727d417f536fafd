#![deny(missing_docs)]

//! # Form Descriptors
//!
//! Companion output for form generation: maps each operation parameter to a
//! widget of a UI component library. This sits beside type synthesis and never
//! feeds back into it.

use crate::oas::models::{Parameter, SchemaKind};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Primitive kind -> widget name mapping for one component library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormElementMap {
    /// Package the widgets are imported from.
    pub library: String,
    /// Widget per primitive kind (`number`, `string`, `boolean`, `datetime`, ...).
    pub elements: IndexMap<String, String>,
    /// Widget used when the kind has no entry.
    pub fallback: String,
}

impl Default for FormElementMap {
    fn default() -> Self {
        let elements = [
            ("number", "InputNumber"),
            ("string", "Input"),
            ("boolean", "Switch"),
            ("datetime", "DatePicker"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            library: "antd".to_string(),
            elements,
            fallback: "Input".to_string(),
        }
    }
}

/// One validation rule of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRule {
    /// Message shown when the rule fails.
    pub message: String,
    /// Whether a value is mandatory.
    pub required: bool,
}

/// Form field descriptor for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Human label (description without tabs/newlines).
    pub label: String,
    /// Validation rules.
    pub rules: Vec<FormRule>,
    /// Parameter name.
    pub name: String,
    /// Widget name.
    pub widget: String,
    /// `rules` as pretty JSON.
    pub rules_raw: String,
}

/// Import statement covering the widgets of a field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormImports {
    /// `import { A, B } from 'lib'`
    pub raw: String,
    /// Distinct widgets, first-seen order.
    pub widgets: Vec<String>,
}

/// Form fields and imports for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDetails {
    /// One field per parameter.
    pub fields: Vec<FormField>,
    /// Widget imports.
    pub imports: FormImports,
}

/// Builds the field descriptor for one parameter.
pub fn form_field(param: &Parameter, map: &FormElementMap) -> FormField {
    let label: String = param
        .description
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let mut rules = Vec::new();
    if param.required {
        rules.push(FormRule {
            message: format!("Please enter {}", label),
            required: true,
        });
    }

    let widget = widget_key(param)
        .and_then(|key| map.elements.get(key))
        .unwrap_or(&map.fallback)
        .clone();

    let rules_raw = serde_json::to_string_pretty(&rules).unwrap_or_else(|_| "[]".to_string());

    FormField {
        label,
        rules,
        name: param.name.clone(),
        widget,
        rules_raw,
    }
}

/// Key into [`FormElementMap::elements`] for a parameter's type.
fn widget_key(param: &Parameter) -> Option<&'static str> {
    match &param.schema.kind {
        SchemaKind::Primitive { primitive } => Some(primitive.as_str()),
        SchemaKind::Enum(e) => Some(e.kind.as_str()),
        SchemaKind::Object(_) => Some("object"),
        SchemaKind::Array { .. } => Some("array"),
        _ => None,
    }
}

/// Builds the import statement for `fields`.
pub fn form_imports(fields: &[FormField], library: &str) -> FormImports {
    let widgets: IndexSet<&str> = fields.iter().map(|f| f.widget.as_str()).collect();
    let widgets: Vec<String> = widgets.into_iter().map(str::to_string).collect();
    FormImports {
        raw: format!("import {{ {} }} from '{}'", widgets.join(", "), library),
        widgets,
    }
}

/// Fields plus imports for a parameter list.
pub fn form_details(parameters: &[Parameter], map: &FormElementMap) -> FormDetails {
    let fields: Vec<FormField> = parameters.iter().map(|p| form_field(p, map)).collect();
    let imports = form_imports(&fields, &map.library);
    FormDetails { fields, imports }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{ParamLocation, PrimitiveKind, SchemaNode};
    use serde_json::Value;

    fn param(name: &str, kind: PrimitiveKind, required: bool, description: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: ParamLocation::Query,
            required,
            description: Some(description.to_string()),
            schema: SchemaNode::primitive(kind),
            raw: Value::Null,
        }
    }

    #[test]
    fn test_required_field_gets_rule() {
        let field = form_field(
            &param("age", PrimitiveKind::Number, true, "Age\tin years\n"),
            &FormElementMap::default(),
        );
        assert_eq!(field.label, "Agein years");
        assert_eq!(field.widget, "InputNumber");
        assert_eq!(
            field.rules,
            vec![FormRule {
                message: "Please enter Agein years".into(),
                required: true
            }]
        );
        assert!(field.rules_raw.contains("\"required\": true"));
    }

    #[test]
    fn test_optional_field_and_fallback() {
        let field = form_field(
            &param("anything", PrimitiveKind::Any, false, ""),
            &FormElementMap::default(),
        );
        assert!(field.rules.is_empty());
        assert_eq!(field.rules_raw, "[]");
        assert_eq!(field.widget, "Input");
    }

    #[test]
    fn test_imports_deduplicate_in_order() {
        let params = vec![
            param("a", PrimitiveKind::String, false, "A"),
            param("b", PrimitiveKind::Boolean, false, "B"),
            param("c", PrimitiveKind::String, false, "C"),
        ];
        let details = form_details(&params, &FormElementMap::default());
        assert_eq!(details.imports.widgets, vec!["Input", "Switch"]);
        assert_eq!(details.imports.raw, "import { Input, Switch } from 'antd'");
    }
}
