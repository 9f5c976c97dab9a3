//! Recursive schema walking.
//!
//! Turns OpenAPI schema nodes into the typed property descriptors carried by
//! generated tool arguments. Recursion depth is threaded explicitly so the
//! walker stays reentrant; schema `$ref` nodes are not resolved and are
//! skipped where they appear.

use omcp_core::{ArgKind, PropertySpec};
use openapiv3::{Schema, SchemaKind, Type};
use serde_json::Value;
use std::collections::BTreeMap;

/// Maximum nesting depth descended into object and array schemas.
pub(crate) const MAX_SCHEMA_DEPTH: usize = 10;

/// Key of the sentinel entry emitted when the depth bound is reached.
pub(crate) const DEPTH_NOTE_KEY: &str = "_note";

const DEPTH_NOTE_TEXT: &str = "maximum property nesting depth reached";

/// Primitive type tag of a schema node, if it declares one.
///
/// Composite schemas (`oneOf`, `allOf`, ...) carry no tag.
pub(crate) fn kind_of(schema: &Schema) -> Option<ArgKind> {
    match &schema.schema_kind {
        SchemaKind::Type(Type::String(_)) => Some(ArgKind::String),
        SchemaKind::Type(Type::Number(_)) => Some(ArgKind::Number),
        SchemaKind::Type(Type::Integer(_)) => Some(ArgKind::Integer),
        SchemaKind::Type(Type::Boolean(_)) => Some(ArgKind::Boolean),
        SchemaKind::Type(Type::Object(_)) => Some(ArgKind::Object),
        SchemaKind::Type(Type::Array(_)) => Some(ArgKind::Array),
        _ => None,
    }
}

/// Enum literals declared on a schema node, as JSON values.
pub(crate) fn enum_values(schema: &Schema) -> Vec<Value> {
    match &schema.schema_kind {
        SchemaKind::Type(Type::String(string)) => string
            .enumeration
            .iter()
            .flatten()
            .map(|value| Value::String(value.clone()))
            .collect(),
        SchemaKind::Type(Type::Integer(integer)) => integer
            .enumeration
            .iter()
            .flatten()
            .map(|value| Value::from(*value))
            .collect(),
        SchemaKind::Type(Type::Number(number)) => number
            .enumeration
            .iter()
            .flatten()
            .filter_map(|value| serde_json::Number::from_f64(*value))
            .map(Value::Number)
            .collect(),
        _ => Vec::new(),
    }
}

/// Element type of an array schema, when the item schema is inline and typed.
pub(crate) fn array_item_kind(schema: &Schema) -> Option<ArgKind> {
    if let SchemaKind::Type(Type::Array(array)) = &schema.schema_kind {
        array
            .items
            .as_ref()
            .and_then(|item| item.as_item())
            .and_then(|item| kind_of(item))
    } else {
        None
    }
}

/// Describe the properties of an object schema.
///
/// Returns `None` when the node is not an object or has no properties.
/// `depth` starts at 1 for top-level properties and grows by one per nested
/// object or array-item descent; past [`MAX_SCHEMA_DEPTH`] a single sentinel
/// entry replaces further detail. Property names come out sorted because the
/// result is a `BTreeMap`.
pub(crate) fn walk_properties(
    schema: &Schema,
    depth: usize,
) -> Option<BTreeMap<String, PropertySpec>> {
    let object = match &schema.schema_kind {
        SchemaKind::Type(Type::Object(object)) if !object.properties.is_empty() => object,
        _ => return None,
    };

    if depth > MAX_SCHEMA_DEPTH {
        let mut truncated = BTreeMap::new();
        truncated.insert(
            DEPTH_NOTE_KEY.to_string(),
            PropertySpec {
                description: Some(DEPTH_NOTE_TEXT.to_string()),
                ..Default::default()
            },
        );
        return Some(truncated);
    }

    let mut properties = BTreeMap::new();
    for (name, schema_ref) in &object.properties {
        let Some(property) = schema_ref.as_item() else {
            continue;
        };
        properties.insert(name.clone(), describe_property(property, depth));
    }

    if properties.is_empty() {
        None
    } else {
        Some(properties)
    }
}

fn describe_property(schema: &Schema, depth: usize) -> PropertySpec {
    let mut spec = PropertySpec {
        kind: kind_of(schema),
        description: schema.schema_data.description.clone(),
        enumeration: enum_values(schema),
        items: None,
        properties: BTreeMap::new(),
    };

    // Array items: record the element type, and for object elements recurse
    // into their properties one level deeper.
    if let SchemaKind::Type(Type::Array(array)) = &schema.schema_kind {
        if let Some(item) = array.items.as_ref().and_then(|item| item.as_item()) {
            let mut item_spec = PropertySpec {
                kind: kind_of(item),
                ..Default::default()
            };
            if let Some(nested) = walk_properties(item, depth + 1) {
                item_spec.properties = nested;
            }
            spec.items = Some(Box::new(item_spec));
        }
    }

    if let Some(nested) = walk_properties(schema, depth + 1) {
        spec.properties = nested;
    }

    spec
}
