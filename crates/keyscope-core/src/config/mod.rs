//! Client configuration
//!
//! Configuration lives in a single YAML file under the platform config
//! directory. Missing or malformed files fall back to defaults so the client
//! always starts.
//!
//! # Usage
//!
//! ```ignore
//! use keyscope_core::config::{default_config_path, load_config, ClientConfig};
//!
//! let config: ClientConfig = load_config(&default_config_path());
//! ```

mod client;
mod io;
mod paths;

pub use client::{
    ClientConfig, DisplayConfig, ServerConfig, UploadLimits, VariationDefaults,
    SERVER_ENV_VAR,
};
pub use io::{load_config, save_config, Sanitize};
pub use paths::{config_dir, default_config_path, CONFIG_FILE_NAME};
