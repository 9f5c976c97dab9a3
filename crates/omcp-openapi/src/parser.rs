//! OpenAPI document loading.
//!
//! Wraps a parsed [`openapiv3::OpenAPI`] document and exposes the accessors
//! the converter needs. Loading handles both JSON and YAML; validation is
//! optional and kept separate from parsing so the two failure modes stay
//! distinguishable.

use crate::error::{OpenApiError, Result};
use openapiv3::{OpenAPI, Operation};
use tracing::{debug, info};

/// Loader for OpenAPI v3 specifications.
pub struct SpecLoader {
    spec: OpenAPI,
}

impl SpecLoader {
    /// Load a spec from a file.
    ///
    /// The format is chosen by extension: `.json` parses as JSON, anything
    /// else as YAML.
    pub fn from_file(path: &str) -> Result<Self> {
        info!("loading OpenAPI spec from file: {path}");
        let content = std::fs::read_to_string(path)?;

        let spec = if path.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        Ok(Self { spec })
    }

    /// Parse a spec from a string, trying JSON first and YAML second.
    pub fn from_str(content: &str) -> Result<Self> {
        debug!("parsing OpenAPI spec from string");
        let spec = serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e: serde_yaml::Error| OpenApiError::Parse(e.to_string()))?;

        Ok(Self { spec })
    }

    /// Fetch and parse a spec from a URL.
    pub async fn from_url(url: &str) -> Result<Self> {
        info!("loading OpenAPI spec from URL: {url}");
        let response = reqwest::get(url).await?;
        let content = response.text().await?;

        Self::from_str(&content)
    }

    /// Run structural validation over the loaded document.
    ///
    /// Validation failures are reported as [`OpenApiError::InvalidSpec`],
    /// distinct from the parse errors returned by the constructors.
    pub fn validate(&self) -> Result<()> {
        if !self.spec.openapi.starts_with("3.") {
            return Err(OpenApiError::InvalidSpec(format!(
                "unsupported OpenAPI version: {}",
                self.spec.openapi
            )));
        }
        if self.spec.info.title.is_empty() {
            return Err(OpenApiError::InvalidSpec(
                "info.title must not be empty".to_string(),
            ));
        }
        if self.spec.paths.paths.is_empty() {
            return Err(OpenApiError::InvalidSpec(
                "document declares no paths".to_string(),
            ));
        }
        Ok(())
    }

    /// The parsed document.
    pub fn document(&self) -> &OpenAPI {
        &self.spec
    }

    /// Identifier for an operation: its `operationId` when declared,
    /// otherwise one derived from the method and path
    /// (`GET /pets/{id}` becomes `get_pets_id`).
    pub fn operation_id(&self, path: &str, method: &str, operation: &Operation) -> String {
        if let Some(id) = operation.operation_id.as_deref() {
            if !id.is_empty() {
                return id.to_string();
            }
        }

        let mut name = path.replace('/', "_");
        name.retain(|c| c != '{' && c != '}');
        format!("{}{}", method.to_lowercase(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /users:
    get:
      operationId: listUsers
      summary: List all users
      responses:
        '200':
          description: Success
"#;

    const JSON_SPEC: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Test API", "version": "1.0.0"},
  "paths": {}
}"#;

    #[test]
    fn test_from_str_yaml() {
        let loader = SpecLoader::from_str(YAML_SPEC).unwrap();
        assert_eq!(loader.document().info.title, "Test API");
        assert_eq!(loader.document().paths.paths.len(), 1);
    }

    #[test]
    fn test_from_str_json() {
        let loader = SpecLoader::from_str(JSON_SPEC).unwrap();
        assert_eq!(loader.document().info.title, "Test API");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        let result = SpecLoader::from_str("not: [valid");
        assert!(matches!(result, Err(OpenApiError::Parse(_))));
    }

    #[test]
    fn test_from_file_yaml() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(YAML_SPEC.as_bytes()).unwrap();

        let loader = SpecLoader::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(loader.document().info.title, "Test API");
    }

    #[test]
    fn test_validate_accepts_well_formed_spec() {
        let loader = SpecLoader::from_str(YAML_SPEC).unwrap();
        assert!(loader.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let loader = SpecLoader::from_str(JSON_SPEC).unwrap();
        assert!(matches!(
            loader.validate(),
            Err(OpenApiError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_operation_id_prefers_declared_id() {
        let loader = SpecLoader::from_str(YAML_SPEC).unwrap();
        let operation: Operation =
            serde_yaml::from_str("operationId: listUsers\nresponses: {}").unwrap();
        assert_eq!(
            loader.operation_id("/users", "get", &operation),
            "listUsers"
        );
    }

    #[test]
    fn test_operation_id_derived_from_path_and_method() {
        let loader = SpecLoader::from_str(YAML_SPEC).unwrap();
        let operation: Operation = serde_yaml::from_str("responses: {}").unwrap();
        assert_eq!(
            loader.operation_id("/pets/{id}", "GET", &operation),
            "get_pets_id"
        );
    }

    #[tokio::test]
    async fn test_from_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/openapi.yaml")
            .with_status(200)
            .with_body(YAML_SPEC)
            .create_async()
            .await;

        let url = format!("{}/openapi.yaml", server.url());
        let loader = SpecLoader::from_url(&url).await.unwrap();
        assert_eq!(loader.document().info.title, "Test API");

        mock.assert_async().await;
    }
}
