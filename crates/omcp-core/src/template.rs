//! Overlay templates.
//!
//! An overlay is a user-authored partial configuration merged onto generated
//! output. It can extend the server config map and adjust every tool's
//! request/response templates; it is never a full replacement, and it applies
//! uniformly to all tools.

use crate::config::McpConfig;
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Partial configuration applied on top of generated output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigTemplate {
    #[serde(default)]
    pub server: ServerOverlay,
    #[serde(default)]
    pub tools: ToolOverlay,
}

/// Overlay for the `server` section; only the config map participates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerOverlay {
    #[serde(default)]
    pub config: BTreeMap<String, Value>,
}

/// Overlay fragments applied to every tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOverlay {
    #[serde(default)]
    pub request_template: Option<crate::config::RequestTemplate>,
    #[serde(default)]
    pub response_template: Option<crate::config::ResponseTemplate>,
}

impl ConfigTemplate {
    /// Parse an overlay template from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Merge this overlay into a generated configuration, in place.
    ///
    /// Merge rules:
    /// - server config entries are shallow-merged, overlay wins per key;
    /// - request-template headers are appended after generated headers;
    /// - a non-empty overlay body replaces the generated one;
    /// - serialization flags can only be switched on, never off;
    /// - response-template fields replace only when the overlay value is
    ///   non-empty.
    pub fn apply(&self, config: &mut McpConfig) {
        for (key, value) in &self.server.config {
            config.server.config.insert(key.clone(), value.clone());
        }

        if self.tools.request_template.is_none() && self.tools.response_template.is_none() {
            return;
        }

        for tool in &mut config.tools {
            if let Some(overlay) = &self.tools.request_template {
                tool.request_template
                    .headers
                    .extend(overlay.headers.iter().cloned());

                if !overlay.body.is_empty() {
                    tool.request_template.body = overlay.body.clone();
                }
                if overlay.args_to_json_body {
                    tool.request_template.args_to_json_body = true;
                }
                if overlay.args_to_url_param {
                    tool.request_template.args_to_url_param = true;
                }
                if overlay.args_to_form_body {
                    tool.request_template.args_to_form_body = true;
                }
            }

            if let Some(overlay) = &self.tools.response_template {
                if !overlay.body.is_empty() {
                    tool.response_template.body = overlay.body.clone();
                }
                if !overlay.prepend_body.is_empty() {
                    tool.response_template.prepend_body = overlay.prepend_body.clone();
                }
                if !overlay.append_body.is_empty() {
                    tool.response_template.append_body = overlay.append_body.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Header, RequestTemplate, ResponseTemplate, ServerConfig, Tool,
    };
    use serde_json::json;

    fn sample_config() -> McpConfig {
        McpConfig {
            server: ServerConfig {
                name: "example".to_string(),
                ..Default::default()
            },
            tools: vec![Tool {
                name: "create_pet".to_string(),
                description: "Create a pet".to_string(),
                args: vec![],
                request_template: RequestTemplate {
                    url: "https://api.example.com/pets".to_string(),
                    method: "POST".to_string(),
                    headers: vec![Header {
                        key: "Content-Type".to_string(),
                        value: "application/json".to_string(),
                    }],
                    ..Default::default()
                },
                response_template: ResponseTemplate {
                    prepend_body: "generated docs".to_string(),
                    ..Default::default()
                },
            }],
        }
    }

    #[test]
    fn test_headers_are_appended_not_replaced() {
        let template = ConfigTemplate::from_yaml(
            r#"
tools:
  requestTemplate:
    headers:
      - key: X-Api-Key
        value: secret
"#,
        )
        .unwrap();

        let mut config = sample_config();
        template.apply(&mut config);

        let headers = &config.tools[0].request_template.headers;
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].key, "Content-Type");
        assert_eq!(headers[1].key, "X-Api-Key");
        assert_eq!(headers[1].value, "secret");
    }

    #[test]
    fn test_empty_overlay_values_do_not_clear() {
        let template = ConfigTemplate::from_yaml(
            r#"
tools:
  requestTemplate:
    body: ""
  responseTemplate:
    prependBody: ""
"#,
        )
        .unwrap();

        let mut config = sample_config();
        config.tools[0].request_template.body = "kept".to_string();
        template.apply(&mut config);

        assert_eq!(config.tools[0].request_template.body, "kept");
        assert_eq!(
            config.tools[0].response_template.prepend_body,
            "generated docs"
        );
    }

    #[test]
    fn test_non_empty_overlay_values_replace() {
        let template = ConfigTemplate::from_yaml(
            r#"
tools:
  requestTemplate:
    body: '{"wrapped": true}'
  responseTemplate:
    prependBody: custom docs
    appendBody: trailer
"#,
        )
        .unwrap();

        let mut config = sample_config();
        template.apply(&mut config);

        assert_eq!(config.tools[0].request_template.body, "{\"wrapped\": true}");
        assert_eq!(config.tools[0].response_template.prepend_body, "custom docs");
        assert_eq!(config.tools[0].response_template.append_body, "trailer");
    }

    #[test]
    fn test_flags_can_only_be_set() {
        let template = ConfigTemplate::from_yaml(
            r#"
tools:
  requestTemplate:
    argsToJsonBody: false
    argsToUrlParam: true
"#,
        )
        .unwrap();

        let mut config = sample_config();
        config.tools[0].request_template.args_to_json_body = true;
        template.apply(&mut config);

        // false in the overlay is a no-op; true forces the flag on.
        assert!(config.tools[0].request_template.args_to_json_body);
        assert!(config.tools[0].request_template.args_to_url_param);
        assert!(!config.tools[0].request_template.args_to_form_body);
    }

    #[test]
    fn test_server_config_shallow_merge() {
        let template = ConfigTemplate::from_yaml(
            r#"
server:
  config:
    apiKey: from-overlay
    extra: 42
"#,
        )
        .unwrap();

        let mut config = sample_config();
        config
            .server
            .config
            .insert("apiKey".to_string(), json!("original"));
        config
            .server
            .config
            .insert("untouched".to_string(), json!(true));
        template.apply(&mut config);

        assert_eq!(config.server.config["apiKey"], json!("from-overlay"));
        assert_eq!(config.server.config["extra"], json!(42));
        assert_eq!(config.server.config["untouched"], json!(true));
    }

    #[test]
    fn test_malformed_template_is_an_error() {
        assert!(ConfigTemplate::from_yaml("tools: [not, a, mapping]").is_err());
    }
}
