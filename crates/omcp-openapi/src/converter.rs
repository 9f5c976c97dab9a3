//! OpenAPI to MCP configuration conversion.
//!
//! The [`Converter`] walks every operation of a loaded document, derives one
//! tool per (path, method) pair, optionally applies an overlay template, and
//! sorts the result so output is stable across runs.

use crate::docgen;
use crate::error::{OpenApiError, Result};
use crate::parser::SpecLoader;
use crate::schema;
use omcp_core::{
    Arg, ArgPosition, ConfigTemplate, ConvertOptions, Header, McpConfig, PropertySpec,
    RequestTemplate, ServerConfig, Tool, DEFAULT_SERVER_NAME,
};
use openapiv3::{
    Operation, Parameter, ParameterSchemaOrContent, PathItem, ReferenceOr, RequestBody, Schema,
    SchemaKind, Type,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Converts a loaded OpenAPI document into an MCP server configuration.
pub struct Converter {
    loader: SpecLoader,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter. An empty server name falls back to
    /// [`DEFAULT_SERVER_NAME`].
    pub fn new(loader: SpecLoader, mut options: ConvertOptions) -> Self {
        if options.server_name.is_empty() {
            options.server_name = DEFAULT_SERVER_NAME.to_string();
        }
        Self { loader, options }
    }

    /// Convert the document into a configuration.
    ///
    /// Fails when the document declares no operations, when the overlay
    /// template cannot be parsed, or when any single operation fails to
    /// convert; there is no partial-success mode.
    pub fn convert(&self) -> Result<McpConfig> {
        let spec = self.loader.document();

        let mut config = McpConfig {
            server: ServerConfig {
                name: self.options.server_name.clone(),
                config: self.options.server_config.clone(),
                allow_tools: Vec::new(),
            },
            tools: Vec::new(),
        };

        for (path, item) in &spec.paths.paths {
            let Some(item) = item.as_item() else {
                warn!("path references are not supported, skipping {path}");
                continue;
            };

            for (method, operation) in operations(item) {
                let tool = self
                    .convert_operation(path, method, item, operation)
                    .map_err(|source| OpenApiError::Operation {
                        method: method.to_uppercase(),
                        path: path.clone(),
                        source: Box::new(source),
                    })?;
                config.tools.push(tool);
            }
        }

        if config.tools.is_empty() {
            return Err(OpenApiError::NoOperations);
        }

        if let Some(text) = &self.options.template {
            let template = ConfigTemplate::from_yaml(text).map_err(OpenApiError::Template)?;
            template.apply(&mut config);
        }

        config.tools.sort_by(|a, b| a.name.cmp(&b.name));

        debug!("converted {} operations", config.tools.len());
        Ok(config)
    }

    fn convert_operation(
        &self,
        path: &str,
        method: &str,
        item: &PathItem,
        operation: &Operation,
    ) -> Result<Tool> {
        let mut name = self.loader.operation_id(path, method, operation);
        if !self.options.tool_name_prefix.is_empty() {
            name = format!("{}{}", self.options.tool_name_prefix, name);
        }

        let mut args = Vec::new();

        // Path-item-level parameters apply to every operation under the path
        // and come first; operation-level parameters follow.
        for parameter in item.parameters.iter().chain(&operation.parameters) {
            let Some(parameter) = parameter.as_item() else {
                warn!("parameter references are not supported, skipping one in {method} {path}");
                continue;
            };
            args.push(self.parameter_arg(parameter));
        }

        match &operation.request_body {
            Some(ReferenceOr::Item(body)) => args.extend(self.request_body_args(body)),
            Some(ReferenceOr::Reference { .. }) => {
                warn!("request body references are not supported, skipping in {method} {path}");
            }
            None => {}
        }

        args.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Tool {
            name,
            description: describe_operation(operation),
            args,
            request_template: self.request_template(path, method, operation),
            response_template: docgen::build_response_template(operation, &self.options),
        })
    }

    /// Derive one argument from a declared parameter.
    fn parameter_arg(&self, parameter: &Parameter) -> Arg {
        let (data, position) = match parameter {
            Parameter::Query { parameter_data, .. } => (parameter_data, ArgPosition::Query),
            Parameter::Header { parameter_data, .. } => (parameter_data, ArgPosition::Header),
            Parameter::Path { parameter_data, .. } => (parameter_data, ArgPosition::Path),
            Parameter::Cookie { parameter_data, .. } => (parameter_data, ArgPosition::Cookie),
        };

        let mut arg = Arg::new(data.name.clone(), position);
        arg.description = data.description.clone().unwrap_or_default();
        arg.required = data.required;

        if let ParameterSchemaOrContent::Schema(schema_ref) = &data.format {
            if let Some(schema) = schema_ref.as_item() {
                fill_from_schema(&mut arg, schema);
            }
        }

        arg
    }

    /// Derive body arguments: one per top-level property of an object body
    /// schema, for JSON and form-urlencoded content types.
    ///
    /// Content types are visited in lexicographic order and arguments are
    /// deduplicated by name, first content type wins.
    fn request_body_args(&self, body: &RequestBody) -> Vec<Arg> {
        let mut args = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        let mut content_types: Vec<&String> = body.content.keys().collect();
        content_types.sort();

        for content_type in content_types {
            if !content_type.contains("application/json")
                && !content_type.contains("application/x-www-form-urlencoded")
            {
                debug!("ignoring request body content type {content_type}");
                continue;
            }

            let Some(body_schema) = body.content[content_type]
                .schema
                .as_ref()
                .and_then(|schema| schema.as_item())
            else {
                continue;
            };
            let SchemaKind::Type(Type::Object(object)) = &body_schema.schema_kind else {
                continue;
            };

            let mut names: Vec<&String> = object.properties.keys().collect();
            names.sort();

            for name in names {
                let Some(property) = object.properties[name].as_item() else {
                    continue;
                };
                if !seen.insert(name.clone()) {
                    debug!("argument {name} already defined by an earlier content type, skipping");
                    continue;
                }

                let mut arg = Arg::new(name.clone(), ArgPosition::Body);
                arg.description = property.schema_data.description.clone().unwrap_or_default();
                arg.required = object.required.contains(name);
                fill_from_schema(&mut arg, property);
                args.push(arg);
            }
        }

        args
    }

    /// Build the HTTP call shape for an operation.
    fn request_template(&self, path: &str, method: &str, operation: &Operation) -> RequestTemplate {
        let base = self
            .loader
            .document()
            .servers
            .first()
            .map(|server| server.url.trim_end_matches('/'))
            .unwrap_or_default();

        let mut template = RequestTemplate {
            url: format!("{base}{path}"),
            method: method.to_uppercase(),
            ..Default::default()
        };

        // One Content-Type header when a body is declared; the smallest
        // content type wins so repeated conversions agree.
        if let Some(ReferenceOr::Item(body)) = &operation.request_body {
            if let Some(content_type) = body.content.keys().min() {
                template.headers.push(Header {
                    key: "Content-Type".to_string(),
                    value: content_type.clone(),
                });
            }
        }

        template
    }
}

/// All operations declared on a path item, paired with their method names.
fn operations(item: &PathItem) -> Vec<(&'static str, &Operation)> {
    let methods = [
        ("get", &item.get),
        ("put", &item.put),
        ("post", &item.post),
        ("delete", &item.delete),
        ("options", &item.options),
        ("head", &item.head),
        ("patch", &item.patch),
        ("trace", &item.trace),
    ];

    methods
        .into_iter()
        .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
        .collect()
}

/// Tool description: summary and description joined when both are present.
fn describe_operation(operation: &Operation) -> String {
    match (
        operation.summary.as_deref(),
        operation.description.as_deref(),
    ) {
        (Some(summary), Some(description)) if !summary.is_empty() && !description.is_empty() => {
            format!("{summary} - {description}")
        }
        (Some(summary), _) if !summary.is_empty() => summary.to_string(),
        (_, Some(description)) => description.to_string(),
        _ => String::new(),
    }
}

/// Copy type, enum, item, and nested property detail from a schema node into
/// an argument.
fn fill_from_schema(arg: &mut Arg, schema: &Schema) {
    arg.kind = schema::kind_of(schema);
    arg.enumeration = schema::enum_values(schema);

    if let Some(kind) = schema::array_item_kind(schema) {
        arg.items = Some(PropertySpec {
            kind: Some(kind),
            ..Default::default()
        });
    }

    if let Some(properties) = schema::walk_properties(schema, 1) {
        arg.properties = properties;
    }
}
