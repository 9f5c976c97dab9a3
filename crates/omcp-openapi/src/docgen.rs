//! Response documentation generation.
//!
//! Builds the `prependBody` block of a tool's response template: a preamble,
//! one section per content type of the success response, and a bulleted,
//! recursively generated description of the response fields. The block is
//! placed before the real API response at invocation time.

use crate::schema::{kind_of, MAX_SCHEMA_DEPTH};
use omcp_core::{ConvertOptions, ResponseTemplate};
use openapiv3::{Operation, Response, Schema, SchemaKind, Type};
use tracing::debug;

/// Default preamble file, read from the working directory at most once per
/// conversion. Absence is tolerated.
pub(crate) const DEFAULT_TEMPLATE_PATH: &str = "conf/response_template.md";

const FALLBACK_PREAMBLE: &str = "# API Response Information\n\n## Response Structure\n\n";

/// Build the response template for an operation.
///
/// Never fails: operations without a success response, or whose success
/// response declares no content, get an empty template.
pub(crate) fn build_response_template(
    operation: &Operation,
    options: &ConvertOptions,
) -> ResponseTemplate {
    let Some(response) = success_response(operation) else {
        return ResponseTemplate::default();
    };
    if response.content.is_empty() {
        return ResponseTemplate::default();
    }

    let mut body = preamble(options);

    let mut content_types: Vec<&String> = response.content.keys().collect();
    content_types.sort();

    for content_type in content_types {
        let Some(schema) = response.content[content_type]
            .schema
            .as_ref()
            .and_then(|schema| schema.as_item())
        else {
            continue;
        };

        body.push_str(&format!("> Content-Type: {content_type}\n\n"));
        describe_root(&mut body, schema);
    }

    body.push_str("\n## Original Response\n\n");

    ResponseTemplate {
        prepend_body: body,
        ..Default::default()
    }
}

/// First success response of the operation.
///
/// Candidate status codes are compared as strings and the smallest one
/// starting with `2` wins, so `200` beats `201` and both beat `2XX` ranges.
fn success_response(operation: &Operation) -> Option<&Response> {
    let mut candidates: Vec<(String, &Response)> = operation
        .responses
        .responses
        .iter()
        .filter_map(|(code, response)| response.as_item().map(|r| (code.to_string(), r)))
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    candidates
        .into_iter()
        .find(|(code, _)| code.starts_with('2'))
        .map(|(_, response)| response)
}

fn preamble(options: &ConvertOptions) -> String {
    if let Some(text) = &options.response_template {
        return format!("{text}\n\n");
    }

    match std::fs::read_to_string(DEFAULT_TEMPLATE_PATH) {
        Ok(text) => format!("{text}\n\n"),
        Err(_) => {
            debug!("default response template not found, using built-in header");
            FALLBACK_PREAMBLE.to_string()
        }
    }
}

/// Write the top-level bullets for a response schema.
fn describe_root(out: &mut String, schema: &Schema) {
    match &schema.schema_kind {
        SchemaKind::Type(Type::Array(array)) => {
            if let Some(item) = array.items.as_ref().and_then(|item| item.as_item()) {
                out.push_str("- **items**: Array of items (Type: array)\n");
                write_properties(out, item, "items", 1);
            }
        }
        SchemaKind::Type(Type::Object(object)) if !object.properties.is_empty() => {
            let mut names: Vec<&String> = object.properties.keys().collect();
            names.sort();

            for name in names {
                let Some(property) = object.properties[name].as_item() else {
                    continue;
                };
                write_bullet(out, "", name, property);
                write_properties(out, property, name, 1);
            }
        }
        _ => {}
    }
}

/// Recursively write bullets for nested properties.
///
/// `path` is the dotted/indexed property path (`a.b`, `a[].b`); `depth`
/// starts at 1 and recursion stops silently past the bound.
fn write_properties(out: &mut String, schema: &Schema, path: &str, depth: usize) {
    if depth > MAX_SCHEMA_DEPTH {
        return;
    }

    let indent = "  ".repeat(depth);

    match &schema.schema_kind {
        SchemaKind::Type(Type::Array(array)) => {
            let Some(item) = array.items.as_ref().and_then(|item| item.as_item()) else {
                return;
            };

            if let SchemaKind::Type(Type::Object(object)) = &item.schema_kind {
                if !object.properties.is_empty() {
                    let mut names: Vec<&String> = object.properties.keys().collect();
                    names.sort();

                    for name in names {
                        let Some(property) = object.properties[name].as_item() else {
                            continue;
                        };
                        let property_path = format!("{path}[].{name}");
                        write_bullet(out, &indent, &property_path, property);
                        write_properties(out, property, &property_path, depth + 1);
                    }
                    return;
                }
            }

            if let Some(kind) = kind_of(item) {
                out.push_str(&format!("{indent}- **{path}[]**: Items of type {kind}\n"));
            }
        }
        SchemaKind::Type(Type::Object(object)) if !object.properties.is_empty() => {
            let mut names: Vec<&String> = object.properties.keys().collect();
            names.sort();

            for name in names {
                let Some(property) = object.properties[name].as_item() else {
                    continue;
                };
                let property_path = format!("{path}.{name}");
                write_bullet(out, &indent, &property_path, property);
                write_properties(out, property, &property_path, depth + 1);
            }
        }
        _ => {}
    }
}

fn write_bullet(out: &mut String, indent: &str, path: &str, schema: &Schema) {
    let description = schema.schema_data.description.as_deref().unwrap_or("");
    out.push_str(&format!("{indent}- **{path}**: {description}"));
    if let Some(kind) = kind_of(schema) {
        out.push_str(&format!(" (Type: {kind})"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation_from_yaml(text: &str) -> Operation {
        serde_yaml::from_str(text).unwrap()
    }

    const PET_OPERATION: &str = r#"
operationId: getPet
responses:
  '200':
    description: Success
    content:
      application/json:
        schema:
          type: object
          properties:
            name:
              type: string
              description: Pet name
            id:
              type: integer
              description: Pet id
"#;

    #[test]
    fn test_bullets_are_sorted_by_property_name() {
        let operation = operation_from_yaml(PET_OPERATION);
        let template = build_response_template(&operation, &ConvertOptions::default());

        let body = &template.prepend_body;
        assert!(body.contains("> Content-Type: application/json"));
        assert!(body.contains("- **id**: Pet id (Type: integer)"));
        assert!(body.contains("- **name**: Pet name (Type: string)"));

        let id_at = body.find("- **id**").unwrap();
        let name_at = body.find("- **name**").unwrap();
        assert!(id_at < name_at);
    }

    #[test]
    fn test_block_starts_with_fallback_and_ends_with_marker() {
        let operation = operation_from_yaml(PET_OPERATION);
        let template = build_response_template(&operation, &ConvertOptions::default());

        assert!(template
            .prepend_body
            .starts_with("# API Response Information"));
        assert!(template.prepend_body.ends_with("\n## Original Response\n\n"));
        assert!(template.body.is_empty());
        assert!(template.append_body.is_empty());
    }

    #[test]
    fn test_caller_preamble_takes_precedence() {
        let operation = operation_from_yaml(PET_OPERATION);
        let options = ConvertOptions {
            response_template: Some("# Custom Header".to_string()),
            ..Default::default()
        };

        let template = build_response_template(&operation, &options);
        assert!(template.prepend_body.starts_with("# Custom Header\n\n"));
    }

    #[test]
    fn test_no_success_response_yields_empty_template() {
        let operation = operation_from_yaml(
            r#"
responses:
  '404':
    description: Not found
"#,
        );

        let template = build_response_template(&operation, &ConvertOptions::default());
        assert_eq!(template, ResponseTemplate::default());
    }

    #[test]
    fn test_success_response_without_content_yields_empty_template() {
        let operation = operation_from_yaml(
            r#"
responses:
  '204':
    description: Deleted
"#,
        );

        let template = build_response_template(&operation, &ConvertOptions::default());
        assert_eq!(template, ResponseTemplate::default());
    }

    #[test]
    fn test_smallest_success_code_wins() {
        let operation = operation_from_yaml(
            r#"
responses:
  '201':
    description: Created
    content:
      application/json:
        schema:
          type: object
          properties:
            created:
              type: boolean
  '200':
    description: Success
    content:
      application/json:
        schema:
          type: object
          properties:
            listed:
              type: boolean
"#,
        );

        let template = build_response_template(&operation, &ConvertOptions::default());
        assert!(template.prepend_body.contains("- **listed**"));
        assert!(!template.prepend_body.contains("- **created**"));
    }

    #[test]
    fn test_array_response_documents_items_root() {
        let operation = operation_from_yaml(
            r#"
responses:
  '200':
    description: Success
    content:
      application/json:
        schema:
          type: array
          items:
            type: object
            properties:
              name:
                type: string
                description: Pet name
"#,
        );

        let template = build_response_template(&operation, &ConvertOptions::default());
        let body = &template.prepend_body;
        assert!(body.contains("- **items**: Array of items (Type: array)"));
        assert!(body.contains("  - **items.name**: Pet name (Type: string)"));
    }

    #[test]
    fn test_array_property_uses_indexed_paths() {
        let operation = operation_from_yaml(
            r#"
responses:
  '200':
    description: Success
    content:
      application/json:
        schema:
          type: object
          properties:
            pets:
              type: array
              description: Matching pets
              items:
                type: object
                properties:
                  name:
                    type: string
                    description: Pet name
"#,
        );

        let template = build_response_template(&operation, &ConvertOptions::default());
        let body = &template.prepend_body;
        assert!(body.contains("- **pets**: Matching pets (Type: array)"));
        assert!(body.contains("  - **pets[].name**: Pet name (Type: string)"));
    }

    #[test]
    fn test_nested_properties_are_indented_with_paths() {
        let operation = operation_from_yaml(
            r#"
responses:
  '200':
    description: Success
    content:
      application/json:
        schema:
          type: object
          properties:
            owner:
              type: object
              description: Pet owner
              properties:
                email:
                  type: string
                  description: Contact address
"#,
        );

        let template = build_response_template(&operation, &ConvertOptions::default());
        let body = &template.prepend_body;
        assert!(body.contains("- **owner**: Pet owner (Type: object)"));
        assert!(body.contains("  - **owner.email**: Contact address (Type: string)"));
    }
}
