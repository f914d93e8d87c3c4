use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::registry::nexus::Credentials;
use crate::registry::source::AssetQuery;

/// Timeout for each search request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

pub const DEFAULT_ENDPOINT_SCHEME: &str = "https";
pub const DEFAULT_ENDPOINT_PATH: &str = "/service/rest/v1/search/assets";
pub const DEFAULT_REPOSITORY: &str = "docker";
pub const DEFAULT_COMPONENT_NAME: &str = "*";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Nexus connection and search configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NexusConfig {
    pub endpoint_scheme: String,
    /// Required; there is no sensible default host
    pub endpoint_host: Option<String>,
    /// Search path with leading slash
    pub endpoint_path: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub repository: String,
    pub component_name: String,
    pub component_version: Option<String>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            endpoint_scheme: DEFAULT_ENDPOINT_SCHEME.to_string(),
            endpoint_host: None,
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            user: None,
            password: None,
            repository: DEFAULT_REPOSITORY.to_string(),
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            component_version: None,
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl NexusConfig {
    /// Load configuration from a JSON file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the default config file, or defaults if it does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Full search URL, or `None` if no host is configured.
    pub fn endpoint(&self) -> Option<String> {
        let host = non_empty(&self.endpoint_host)?;
        Some(format!(
            "{}://{}{}",
            self.endpoint_scheme, host, self.endpoint_path
        ))
    }

    /// Credentials, only when both user and password are set.
    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            user: non_empty(&self.user)?.to_string(),
            password: non_empty(&self.password)?.to_string(),
        })
    }

    pub fn query(&self) -> AssetQuery {
        AssetQuery {
            repository: self.repository.clone(),
            component_name: self.component_name.clone(),
            component_version: non_empty(&self.component_version).map(str::to_string),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/nexus-tags/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/nexus-tags/config.json.
pub fn config_path() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

/// Returns the path to the data directory for nexus-tags.
/// Uses $XDG_DATA_HOME/nexus-tags if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/nexus-tags,
/// or ./nexus-tags if neither is available.
pub fn data_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("nexus-tags.log")
}

fn app_dir_with_env(
    xdg_dir: Option<String>,
    home_dir: Option<PathBuf>,
    home_relative: &str,
) -> PathBuf {
    let base = xdg_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_relative)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("nexus-tags")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn nexus_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<NexusConfig>(json!({
            "endpointHost": "nexus.example.com"
        }))
        .unwrap();

        assert_eq!(
            result,
            NexusConfig {
                endpoint_host: Some("nexus.example.com".to_string()),
                ..NexusConfig::default()
            }
        );
    }

    #[test]
    fn nexus_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<NexusConfig>(json!({
            "endpointScheme": "http",
            "endpointHost": "nexus.local:8081",
            "endpointPath": "/search",
            "user": "user",
            "password": "secret",
            "repository": "images",
            "componentName": "my-service",
            "componentVersion": "1.*",
            "timeoutMs": 500
        }))
        .unwrap();

        assert_eq!(
            result,
            NexusConfig {
                endpoint_scheme: "http".to_string(),
                endpoint_host: Some("nexus.local:8081".to_string()),
                endpoint_path: "/search".to_string(),
                user: Some("user".to_string()),
                password: Some("secret".to_string()),
                repository: "images".to_string(),
                component_name: "my-service".to_string(),
                component_version: Some("1.*".to_string()),
                timeout_ms: 500,
            }
        );
    }

    #[test]
    fn endpoint_joins_scheme_host_and_path() {
        let config = NexusConfig {
            endpoint_host: Some("nexus.example.com".to_string()),
            ..NexusConfig::default()
        };

        assert_eq!(
            config.endpoint().as_deref(),
            Some("https://nexus.example.com/service/rest/v1/search/assets")
        );
    }

    #[test]
    fn endpoint_is_none_without_host() {
        assert_eq!(NexusConfig::default().endpoint(), None);

        let config = NexusConfig {
            endpoint_host: Some(String::new()),
            ..NexusConfig::default()
        };
        assert_eq!(config.endpoint(), None);
    }

    #[test]
    fn credentials_require_user_and_password() {
        let user_only = NexusConfig {
            user: Some("user".to_string()),
            ..NexusConfig::default()
        };
        assert_eq!(user_only.credentials(), None);

        let both = NexusConfig {
            user: Some("user".to_string()),
            password: Some("password".to_string()),
            ..NexusConfig::default()
        };
        assert_eq!(
            both.credentials(),
            Some(Credentials {
                user: "user".to_string(),
                password: "password".to_string()
            })
        );
    }

    #[test]
    fn query_drops_empty_component_version() {
        let config = NexusConfig {
            component_version: Some(String::new()),
            ..NexusConfig::default()
        };

        assert_eq!(
            config.query(),
            AssetQuery {
                repository: "docker".to_string(),
                component_name: "*".to_string(),
                component_version: None,
            }
        );
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"endpointHost": "nexus.example.com", "repository": "images"}}"#
        )
        .unwrap();

        let config = NexusConfig::load(file.path()).unwrap();

        assert_eq!(config.endpoint_host.as_deref(), Some("nexus.example.com"));
        assert_eq!(config.repository, "images");
        assert_eq!(config.component_name, "*");
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = NexusConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();

        let result = NexusConfig::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn app_dir_with_env_uses_xdg_dir_when_set() {
        let path = app_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
            ".local/share",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/nexus-tags"));
    }

    #[test]
    fn app_dir_with_env_falls_back_to_home() {
        let path = app_dir_with_env(None, Some(PathBuf::from("/home/user")), ".config");

        assert_eq!(path, PathBuf::from("/home/user/.config/nexus-tags"));
    }

    #[test]
    fn app_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = app_dir_with_env(None, None, ".local/share");
        assert_eq!(path, PathBuf::from("./nexus-tags"));
    }
}
