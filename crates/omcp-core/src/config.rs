//! Configuration data model.
//!
//! Field names and optionality follow the MCP server configuration shape
//! consumed downstream: keys are camelCase, and empty values are omitted from
//! serialized output so that hand-written and generated configurations look
//! alike.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Top-level MCP server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpConfig {
    pub server: ServerConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl McpConfig {
    /// Render the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The `server` section of a configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub name: String,
    /// Opaque per-server settings, passed through unmodified.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, Value>,
    /// Optional allow-list restricting which tools may be invoked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_tools: Vec<String>,
}

/// One invocable tool, corresponding 1:1 to an API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub args: Vec<Arg>,
    pub request_template: RequestTemplate,
    pub response_template: ResponseTemplate,
}

/// A typed, named input to a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArgKind>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Default value; part of the configuration contract, filled in by
    /// hand-written or overlaid configurations rather than the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<Value>,
    /// Element descriptor for array-typed arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<PropertySpec>,
    /// Nested property descriptors for object-typed arguments.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertySpec>,
    pub position: ArgPosition,
}

impl Arg {
    /// Create an argument with the given name and position; everything else
    /// starts empty.
    pub fn new(name: impl Into<String>, position: ArgPosition) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: None,
            required: false,
            default: None,
            enumeration: Vec::new(),
            items: None,
            properties: BTreeMap::new(),
            position,
        }
    }
}

/// Primitive type tag of an argument or property.
///
/// Serializes to the lowercase schema type names so generated output is
/// indistinguishable from hand-written configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::String => write!(f, "string"),
            ArgKind::Number => write!(f, "number"),
            ArgKind::Integer => write!(f, "integer"),
            ArgKind::Boolean => write!(f, "boolean"),
            ArgKind::Object => write!(f, "object"),
            ArgKind::Array => write!(f, "array"),
        }
    }
}

/// Location where an argument is placed in the eventual HTTP call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgPosition {
    Query,
    Path,
    Header,
    Cookie,
    Body,
}

impl fmt::Display for ArgPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgPosition::Query => write!(f, "query"),
            ArgPosition::Path => write!(f, "path"),
            ArgPosition::Header => write!(f, "header"),
            ArgPosition::Cookie => write!(f, "cookie"),
            ArgPosition::Body => write!(f, "body"),
        }
    }
}

/// Recursive property descriptor attached to object and array arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArgKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySpec>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertySpec>,
}

/// Template describing the HTTP call a tool performs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTemplate {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    // Serialization flags are overlay-only: the generator never sets them.
    #[serde(default, skip_serializing_if = "is_false")]
    pub args_to_json_body: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub args_to_url_param: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub args_to_form_body: bool,
}

/// One HTTP header key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Template shaping the response returned to the tool caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTemplate {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Documentation text placed before the real response body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prepend_body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub append_body: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}
