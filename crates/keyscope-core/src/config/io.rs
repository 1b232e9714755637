//! YAML configuration loading and saving
//!
//! Loading never fails: a missing file yields defaults, an unreadable or
//! unparsable file yields defaults plus a warning. Every loaded value passes
//! through [`Sanitize`] so out-of-range settings are clamped before use.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Post-load clamping of user-editable values
pub trait Sanitize {
    fn sanitize(&mut self);
}

/// Load configuration from a YAML file
///
/// # Example
///
/// ```ignore
/// let config: ClientConfig = load_config(&Path::new("config.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default + Sanitize,
{
    log::info!("load_config: Loading from {:?}", path);

    let mut config = if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        T::default()
    } else {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<T>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                    T::default()
                }
            },
            Err(e) => {
                log::warn!("load_config: Failed to read config file: {}, using defaults", e);
                T::default()
            }
        }
    };

    config.sanitize();
    config
}

/// Save configuration to a YAML file, creating parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Limits {
        retries: i32,
        name: String,
    }

    impl Sanitize for Limits {
        fn sanitize(&mut self) {
            self.retries = self.retries.clamp(0, 5);
        }
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: Limits = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert_eq!(config, Limits::default());
    }

    #[test]
    fn test_load_sanitizes_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.yaml");
        std::fs::write(&path, "retries: 40\nname: edge\n").unwrap();

        let config: Limits = load_config(&path);
        assert_eq!(config.retries, 5);
        assert_eq!(config.name, "edge");
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "retries: [not, a, number").unwrap();

        let config: Limits = load_config(&path);
        assert_eq!(config, Limits::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("limits.yaml");

        let config = Limits {
            retries: 3,
            name: "saved".to_string(),
        };
        save_config(&config, &path).unwrap();

        let loaded: Limits = load_config(&path);
        assert_eq!(loaded, config);
    }
}
