use std::{
    fs,
    path::{Path, PathBuf}
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::error::WorkflowError;

/// Simulation settings used by the `theatre` binary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Whether allocated workflows record their tasks in the actor's log
    pub logging:          bool,
    /// Upper bound on the ticks the turn driver will advance in one run
    pub ticks:            u64,
    /// Wall-clock pause between ticks, in milliseconds
    pub tick_interval_ms: u64
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { logging: true, ticks: 100, tick_interval_ms: 0 }
    }
}

impl SimulationConfig {
    /// Reject settings no simulation can run with
    pub fn validate(&self) -> Result<(), WorkflowError> {
        if self.ticks == 0 {
            return Err(WorkflowError::Configuration("ticks must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Get the project directories for cross-platform config path resolution
pub fn get_project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "theatre-workflow").context("Failed to determine project directories")
}

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
    let project_dirs = get_project_dirs()?;
    Ok(project_dirs.config_dir().to_path_buf())
}

/// Get the config file path
pub fn get_config_file_path() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.yaml"))
}

/// Load configuration from the default location, creating it if missing
pub fn load_config() -> Result<SimulationConfig> {
    load_config_from(&get_config_file_path()?)
}

/// Load configuration from `path`, writing the default there if it doesn't exist
pub fn load_config_from(path: &Path) -> Result<SimulationConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SimulationConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    } else {
        let config = SimulationConfig::default();
        save_config_to(&config, path)?;
        Ok(config)
    }
}

/// Save configuration to `path`
pub fn save_config_to(config: &SimulationConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = serde_yaml::to_string(config).context("Failed to serialize config")?;

    fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_writes_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, SimulationConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_saved_config_is_reloaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let config = SimulationConfig { logging: false, ticks: 12, tick_interval_ms: 5 };

        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "ticks: 7\n").unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.ticks, 7);
        assert!(config.logging);
        assert_eq!(config.tick_interval_ms, 0);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "ticks: [not a number\n").unwrap();

        let error = load_config_from(&path).unwrap_err();

        assert!(error.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_tick_budget_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "ticks: 0\n").unwrap();

        let error = load_config_from(&path).unwrap_err();

        assert_eq!(
            error.downcast_ref::<WorkflowError>(),
            Some(&WorkflowError::Configuration("ticks must be at least 1".to_string()))
        );
    }
}
