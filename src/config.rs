// Dashboard configuration: optional `dashboard.toml` plus environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::model::GameType;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.toml";

/// Overrides `data_path` when set.
pub const DATA_PATH_ENV: &str = "SEASON_DASHBOARD_DATA";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Game-type pill selected for a fresh dataset.
    pub default_game_type: GameType,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("nba_all_elo.csv"),
            default_game_type: GameType::Both,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load `dashboard.toml` from the working directory (defaults if absent),
/// then apply the `SEASON_DASHBOARD_DATA` override.
pub fn load_config() -> Result<DashboardConfig, ConfigError> {
    let override_path = std::env::var_os(DATA_PATH_ENV).map(PathBuf::from);
    load_config_from(Path::new("."), override_path)
}

pub(crate) fn load_config_from(
    base_dir: &Path,
    data_path_override: Option<PathBuf>,
) -> Result<DashboardConfig, ConfigError> {
    let path = base_dir.join(CONFIG_FILE);
    let mut config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?
    } else {
        log::debug!("{} not found, using defaults", path.display());
        DashboardConfig::default()
    };

    if let Some(data_path) = data_path_override {
        log::info!("{DATA_PATH_ENV} overrides data path: {}", data_path.display());
        config.data_path = data_path;
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &DashboardConfig) -> Result<(), ConfigError> {
    if config.data_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_path".into(),
            message: "must not be empty".into(),
        });
    }
    for (field, value) in [
        ("window_width", config.window_width),
        ("window_height", config.window_height),
    ] {
        if value <= 0.0 || value.is_nan() {
            return Err(ConfigError::ValidationError {
                field: field.into(),
                message: format!("must be positive, got {value}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tmp_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        tmp
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tmp_dir("dashboard_config_test_missing");
        let config = load_config_from(&tmp, None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("nba_all_elo.csv"));
        assert_eq!(config.default_game_type, GameType::Both);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn reads_partial_file() {
        let tmp = tmp_dir("dashboard_config_test_partial");
        fs::write(
            tmp.join(CONFIG_FILE),
            "data_path = \"data/games.parquet\"\ndefault_game_type = \"playoffs\"\n",
        )
        .unwrap();
        let config = load_config_from(&tmp, None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/games.parquet"));
        assert_eq!(config.default_game_type, GameType::Playoffs);
        assert_eq!(config.window_width, 1200.0);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn override_wins_over_file() {
        let tmp = tmp_dir("dashboard_config_test_override");
        fs::write(tmp.join(CONFIG_FILE), "data_path = \"a.csv\"\n").unwrap();
        let config = load_config_from(&tmp, Some(PathBuf::from("b.csv"))).unwrap();
        assert_eq!(config.data_path, PathBuf::from("b.csv"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_bad_values() {
        let tmp = tmp_dir("dashboard_config_test_invalid");
        fs::write(tmp.join(CONFIG_FILE), "window_width = 0.0\n").unwrap();
        let err = load_config_from(&tmp, None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "window_width"));

        fs::write(tmp.join(CONFIG_FILE), "window_height = nan\n").unwrap();
        let err = load_config_from(&tmp, None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "window_height"));

        fs::write(tmp.join(CONFIG_FILE), "default_game_type = \"preseason\"\n").unwrap();
        let err = load_config_from(&tmp, None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }
}
