// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration loading from files.
//!
//! Handles loading configuration from JSON and YAML files in various locations.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::{OutputFormat, WorkspaceConfig};

/// Config file names to search for (in order).
pub const CONFIG_FILES: &[&str] = &[
    ".verbosity.json",
    ".verbosity.yaml",
    ".verbosity/config.json",
    "verbosity.config.json",
];

/// Local config file name (for per-directory overrides).
pub const LOCAL_CONFIG_FILE: &str = ".verbosity.local.json";

/// Global config directory name.
pub const GLOBAL_CONFIG_DIR: &str = ".verbosity";

/// Global config file name.
pub const GLOBAL_CONFIG_FILE: &str = "config.json";

/// Get the global config directory path.
pub fn get_global_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLOBAL_CONFIG_DIR))
}

/// Get the global config file path.
pub fn get_global_config_path() -> Option<PathBuf> {
    get_global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Load global configuration from ~/.verbosity/config.json.
pub fn load_global_config() -> Result<Option<WorkspaceConfig>, ConfigError> {
    let path = match get_global_config_path() {
        Some(p) => p,
        None => return Ok(None),
    };

    if !path.exists() {
        return Ok(None);
    }

    load_config_file(&path).map(Some)
}

/// Load workspace configuration from the workspace root.
///
/// The first file of [`CONFIG_FILES`] that exists wins.
pub fn load_workspace_config(workspace_root: &Path) -> Result<Option<WorkspaceConfig>, ConfigError> {
    for filename in CONFIG_FILES {
        let path = workspace_root.join(filename);
        if path.exists() {
            return load_config_file(&path).map(Some);
        }
    }
    Ok(None)
}

/// Load local configuration from .verbosity.local.json.
pub fn load_local_config(workspace_root: &Path) -> Result<Option<WorkspaceConfig>, ConfigError> {
    let path = workspace_root.join(LOCAL_CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Load a configuration file (JSON or YAML).
pub fn load_config_file(path: &Path) -> Result<WorkspaceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(ConfigError::from),
        _ => serde_json::from_str(&content).map_err(ConfigError::from),
    }
}

/// Save workspace configuration to a file.
pub fn save_workspace_config(
    workspace_root: &Path,
    config: &WorkspaceConfig,
    filename: Option<&str>,
) -> Result<PathBuf, ConfigError> {
    let filename = filename.unwrap_or(".verbosity.json");
    let path = workspace_root.join(filename);

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, content)?;

    Ok(path)
}

/// Initialize a new config file with the example configuration.
pub fn init_config(
    workspace_root: &Path,
    config: Option<WorkspaceConfig>,
) -> Result<PathBuf, ConfigError> {
    let config = config.unwrap_or_else(get_example_config);
    save_workspace_config(workspace_root, &config, None)
}

/// Find the workspace root by searching for config files.
///
/// Walks up the directory tree from `start` until it finds a directory
/// containing a config file or reaches the filesystem root.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        for filename in CONFIG_FILES {
            if current.join(filename).exists() {
                return Some(current);
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Get an example configuration.
pub fn get_example_config() -> WorkspaceConfig {
    WorkspaceConfig {
        log_level: Some("info".to_string()),
        output_format: Some(OutputFormat::Json),
        pretty_json: Some(true),
        show_metrics: Some(false),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_files_order() {
        assert_eq!(CONFIG_FILES.len(), 4);
        assert_eq!(CONFIG_FILES[0], ".verbosity.json");
    }

    #[test]
    fn test_global_config_dir() {
        let dir = get_global_config_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with(".verbosity"));
    }

    #[test]
    fn test_load_workspace_config_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_workspace_config(temp.path());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_load_workspace_config_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".verbosity.json"),
            r#"{"logLevel": "debug", "outputFormat": "text"}"#,
        )
        .unwrap();

        let config = load_workspace_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.output_format, Some(OutputFormat::Text));
    }

    #[test]
    fn test_load_workspace_config_yaml() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".verbosity.yaml"),
            "logLevel: trace\nprettyJson: false\n",
        )
        .unwrap();

        let config = load_workspace_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.log_level, Some("trace".to_string()));
        assert_eq!(config.pretty_json, Some(false));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".verbosity.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_load_local_config() {
        let temp = TempDir::new().unwrap();
        assert!(load_local_config(temp.path()).unwrap().is_none());

        std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), r#"{"showMetrics": true}"#).unwrap();
        let config = load_local_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.show_metrics, Some(true));
    }

    #[test]
    fn test_save_workspace_config() {
        let temp = TempDir::new().unwrap();
        let config = WorkspaceConfig {
            log_level: Some("error".to_string()),
            ..Default::default()
        };

        let saved_path = save_workspace_config(temp.path(), &config, None).unwrap();
        assert!(saved_path.exists());

        let content = std::fs::read_to_string(&saved_path).unwrap();
        assert!(content.contains("\"logLevel\": \"error\""));
    }

    #[test]
    fn test_find_workspace_root() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&subdir).unwrap();
        std::fs::write(temp.path().join(".verbosity.json"), "{}").unwrap();

        let found = find_workspace_root(&subdir);
        assert_eq!(found.unwrap(), temp.path());
    }

    #[test]
    fn test_find_workspace_root_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(find_workspace_root(temp.path()).is_none());
    }

    #[test]
    fn test_init_config() {
        let temp = TempDir::new().unwrap();
        let path = init_config(temp.path(), None).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), ".verbosity.json");

        let loaded = load_config_file(&path).unwrap();
        assert_eq!(loaded, get_example_config());
    }
}
