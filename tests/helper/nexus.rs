//! Nexus test utilities

use mockito::Server;
use nexus_tags::config::NexusConfig;

pub const SEARCH_PATH: &str = "/service/rest/v1/search/assets";

/// Configuration pointing at a mock server
pub fn config_for(server: &Server) -> NexusConfig {
    NexusConfig {
        endpoint_scheme: "http".to_string(),
        endpoint_host: Some(server.host_with_port()),
        endpoint_path: SEARCH_PATH.to_string(),
        repository: "docker".to_string(),
        component_name: "*".to_string(),
        component_version: Some("*".to_string()),
        ..NexusConfig::default()
    }
}

/// Search response body listing `tags` for COMP_NAME
pub fn search_body(tags: &[&str], continuation_token: Option<&str>) -> String {
    let items: Vec<serde_json::Value> = tags
        .iter()
        .map(|tag| serde_json::json!({ "path": format!("v2/COMP_NAME/manifests/{}", tag) }))
        .collect();
    let mut body = serde_json::json!({ "items": items });
    if let Some(token) = continuation_token {
        body["continuationToken"] = serde_json::json!(token);
    }
    body.to_string()
}
