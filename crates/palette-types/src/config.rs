//! Application configuration types for Palette.
//!
//! `AppConfig` represents the `config.toml` in the data directory that
//! controls the listen address, database location, notes defaults, and an
//! optional persona catalog override.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    /// TOML persona catalog to use instead of the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

/// HTTP listen address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database location. When `url` is unset, `{data_dir}/palette.db` is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Defaults applied by the notes endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Therapist recorded on new sessions until an auth context supplies one.
    #[serde(default = "default_placeholder_therapist_id")]
    pub placeholder_therapist_id: i64,

    /// Number of notes returned by `GET /api/notes/{child_id}`.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
}

fn default_placeholder_therapist_id() -> i64 {
    1
}

fn default_recent_limit() -> u32 {
    10
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            placeholder_therapist_id: default_placeholder_therapist_id(),
            recent_limit: default_recent_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5001);
        assert!(config.database.url.is_none());
        assert_eq!(config.notes.placeholder_therapist_id, 1);
        assert_eq!(config.notes.recent_limit, 10);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_app_config_deserialize_with_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.notes.recent_limit, 10);
    }

    #[test]
    fn test_app_config_deserialize_partial_sections() {
        let toml_str = r#"
catalog_path = "/etc/palette/catalog.toml"

[server]
port = 8080

[notes]
placeholder_therapist_id = 3
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.notes.placeholder_therapist_id, 3);
        assert_eq!(config.notes.recent_limit, 10);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/palette/catalog.toml"))
        );
    }
}
