use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Launch sequence settings
    #[serde(default)]
    pub launch: LaunchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            launch: LaunchConfig::default(),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the attendance backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Launch sequence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Minimum splash display time in milliseconds
    pub splash_duration_ms: u64,
    /// Declared permission state for this host
    #[serde(default)]
    pub permissions: PermissionConfig,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            splash_duration_ms: 1500,
            permissions: PermissionConfig::default(),
        }
    }
}

/// Declared permission state, standing in for a platform permission broker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Foreground location access granted
    pub basic_location: bool,
    /// Background location access granted
    pub background_location: bool,
    /// Whether a shown prompt resolves with a grant
    pub prompt_grants: bool,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            basic_location: true,
            background_location: true,
            prompt_grants: true,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    // Get config directories
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");
    let local_config = PathBuf::from(".attendify/config.toml");

    // Build figment configuration
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    // Add local config if it exists
    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // Add environment variables (ATTENDIFY_ prefix)
    figment = figment.merge(Env::prefixed("ATTENDIFY_"));

    // Extract and return config
    figment
        .extract()
        .context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "attendify") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("attendify");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        let default_config = Config::default();
        save_config(&default_config, Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.launch.splash_duration_ms, 1500);
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.launch.permissions.basic_location);
    }

    #[test]
    fn test_save_config_writes_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        save_config(&Config::default(), Some(path.clone())).unwrap();

        let parsed: Config =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.launch.splash_duration_ms, 1500);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.backend.base_url, config.backend.base_url);
        assert_eq!(
            parsed.launch.splash_duration_ms,
            config.launch.splash_duration_ms
        );
    }
}
