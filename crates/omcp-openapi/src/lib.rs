//! # OpenAPI to MCP Configuration Converter
//!
//! Converts OpenAPI v3 specifications into declarative MCP server
//! configurations: one tool per operation, each with a typed argument list,
//! an HTTP request template, and generated response documentation.
//!
//! ## Features
//!
//! - Parse OpenAPI v3 specifications (JSON and YAML) from files, strings, or
//!   URLs
//! - Derive a flat, sorted argument list from parameters and request bodies
//! - Generate response-structure documentation from success-response schemas
//! - Apply user-supplied overlay templates to the generated configuration
//! - Deterministic output: repeated conversions of the same document are
//!   byte-identical
//!
//! ## Example
//!
//! ```no_run
//! use omcp_core::ConvertOptions;
//! use omcp_openapi::{Converter, SpecLoader};
//!
//! let loader = SpecLoader::from_file("./api/openapi.yaml")?;
//! let converter = Converter::new(loader, ConvertOptions::default());
//! let config = converter.convert()?;
//! println!("generated {} tools", config.tools.len());
//! # Ok::<(), omcp_openapi::OpenApiError>(())
//! ```

mod converter;
mod docgen;
mod error;
mod parser;
mod schema;

pub use converter::Converter;
pub use error::{OpenApiError, Result};
pub use parser::SpecLoader;
