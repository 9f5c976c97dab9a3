//! Core data model for MCP server configurations.
//!
//! This crate defines the configuration shape emitted by the OpenAPI
//! converter: a server entry plus a list of tools, each with typed arguments,
//! an HTTP request template, and a response post-processing template. It also
//! carries the overlay-template types used to customize generated
//! configurations, and the options accepted by a conversion.
//!
//! Everything here is plain data with serde derives; no I/O happens in this
//! crate.

pub mod config;
pub mod error;
pub mod options;
pub mod template;

// Re-exports
pub use config::{
    Arg, ArgKind, ArgPosition, Header, McpConfig, PropertySpec, RequestTemplate, ResponseTemplate,
    ServerConfig, Tool,
};
pub use error::{ConfigError, Result};
pub use options::{ConvertOptions, DEFAULT_SERVER_NAME};
pub use template::{ConfigTemplate, ServerOverlay, ToolOverlay};
