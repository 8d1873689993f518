//! Configuration loaders for Palette.
//!
//! Resolves the data directory, reads `config.toml` from it into
//! [`AppConfig`] (falling back to defaults when the file is missing or
//! malformed), and loads the persona catalog.

use std::path::{Path, PathBuf};

use thiserror::Error;

use palette_core::persona::catalog::PersonaCatalog;
use palette_types::config::AppConfig;
use palette_types::error::CatalogError;

use crate::sqlite::pool::default_database_url;

/// Errors loading a persona catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Resolve the data directory.
///
/// Uses `PALETTE_DATA_DIR` when set, otherwise `~/.palette`, otherwise
/// `./.palette`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PALETTE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".palette");
    }

    PathBuf::from(".palette")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Database URL from config, or the default file in the data directory.
pub fn database_url(config: &AppConfig, data_dir: &Path) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}

/// Load the persona catalog named by `catalog_path`, or the built-in one.
///
/// Unlike `config.toml`, a catalog that fails to read or validate is an error.
pub async fn load_catalog(config: &AppConfig) -> Result<PersonaCatalog, CatalogLoadError> {
    let Some(path) = &config.catalog_path else {
        return Ok(PersonaCatalog::builtin()?);
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Io {
            path: path.clone(),
            source,
        })?;

    let catalog = PersonaCatalog::from_toml_str(&content)?;
    tracing::info!(path = %path.display(), "loaded persona catalog");
    Ok(catalog)
}
