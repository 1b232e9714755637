//! Standard locations for keyscope configuration

use std::path::PathBuf;

/// File name of the client configuration
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Directory holding keyscope configuration
///
/// Returns: `{platform config dir}/keyscope`, or `./keyscope` when the
/// platform does not define one.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyscope")
}

/// Default path of the client configuration file
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
