//! Client configuration sections

use serde::{Deserialize, Serialize};

use super::io::Sanitize;

/// Environment variable overriding [`ServerConfig::base_url`]
pub const SERVER_ENV_VAR: &str = "KEYSCOPE_SERVER";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Analysis service connection
    pub server: ServerConfig,
    /// Client-side upload checks
    pub upload: UploadLimits,
    /// Visualization and notification behavior
    pub display: DisplayConfig,
    /// Defaults for the variation form
    pub variation: VariationDefaults,
}

impl ClientConfig {
    /// Apply the [`SERVER_ENV_VAR`] override when set and non-empty
    pub fn apply_env_override(&mut self) {
        self.apply_server_override(std::env::var(SERVER_ENV_VAR).ok());
    }

    fn apply_server_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            log::info!("Using server from {}: {}", SERVER_ENV_VAR, url);
            self.server.base_url = url;
            self.server.sanitize();
        }
    }
}

impl Sanitize for ClientConfig {
    fn sanitize(&mut self) {
        self.server.sanitize();
        self.upload.sanitize();
        self.display.sanitize();
        self.variation.sanitize();
    }
}

/// Analysis service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the `/api/audio/...` paths are appended to
    pub base_url: String,
    /// Per-request timeout in seconds (analysis can take minutes)
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080"),
            timeout_secs: 300,
        }
    }
}

impl Sanitize for ServerConfig {
    fn sanitize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            ServerConfig::default().base_url
        } else {
            trimmed.to_string()
        };
        self.timeout_secs = self.timeout_secs.clamp(5, 3600);
    }
}

/// Upload limits enforced before any network call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Maximum accepted file size in megabytes (1 MB = 1024 * 1024 bytes)
    pub max_file_size_mb: u64,
    /// Extensions the service analyzes without converting first
    pub native_formats: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            native_formats: ["wav", "aiff", "aif", "au"].map(String::from).to_vec(),
        }
    }
}

impl UploadLimits {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Sanitize for UploadLimits {
    fn sanitize(&mut self) {
        self.max_file_size_mb = self.max_file_size_mb.clamp(1, 2048);
        self.native_formats = self
            .native_formats
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if self.native_formats.is_empty() {
            self.native_formats = UploadLimits::default().native_formats;
        }
    }
}

/// Visualization and notification behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Redraw the last analysis after a resize instead of the placeholder
    pub retain_on_resize: bool,
    /// Seconds a toast stays visible
    pub toast_seconds: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            retain_on_resize: true,
            toast_seconds: 5,
        }
    }
}

impl Sanitize for DisplayConfig {
    fn sanitize(&mut self) {
        self.toast_seconds = self.toast_seconds.clamp(1, 60);
    }
}

/// Defaults for the variation request form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationDefaults {
    /// Number of variations requested (1-10)
    pub default_amount: u32,
    /// Style passed to the service
    pub default_style: String,
}

impl Default for VariationDefaults {
    fn default() -> Self {
        Self {
            default_amount: 1,
            default_style: String::from("similar"),
        }
    }
}

impl Sanitize for VariationDefaults {
    fn sanitize(&mut self) {
        self.default_amount = self.default_amount.clamp(1, 10);
        if self.default_style.trim().is_empty() {
            self.default_style = VariationDefaults::default().default_style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.upload.max_file_size_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.upload.native_formats, vec!["wav", "aiff", "aif", "au"]);
        assert!(config.display.retain_on_resize);
        assert_eq!(config.display.toast_seconds, 5);
    }

    #[test]
    fn test_sanitize_clamps_and_normalizes() {
        let mut config = ClientConfig {
            server: ServerConfig {
                base_url: " http://analysis.local:9000/ ".into(),
                timeout_secs: 0,
            },
            upload: UploadLimits {
                max_file_size_mb: 0,
                native_formats: vec![".WAV".into(), " ".into()],
            },
            display: DisplayConfig {
                retain_on_resize: false,
                toast_seconds: 999,
            },
            variation: VariationDefaults {
                default_amount: 50,
                default_style: "".into(),
            },
        };
        config.sanitize();

        assert_eq!(config.server.base_url, "http://analysis.local:9000");
        assert_eq!(config.server.timeout_secs, 5);
        assert_eq!(config.upload.max_file_size_mb, 1);
        assert_eq!(config.upload.native_formats, vec!["wav"]);
        assert_eq!(config.display.toast_seconds, 60);
        assert_eq!(config.variation.default_amount, 10);
        assert_eq!(config.variation.default_style, "similar");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config: ClientConfig = serde_yaml::from_str("display:\n  retain_on_resize: false\n").unwrap();
        assert!(!config.display.retain_on_resize);
        assert_eq!(config.display.toast_seconds, 5);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_server_override() {
        let mut config = ClientConfig::default();
        config.apply_server_override(Some("https://example.org/".into()));
        assert_eq!(config.server.base_url, "https://example.org");

        config.apply_server_override(Some("   ".into()));
        assert_eq!(config.server.base_url, "https://example.org");
    }
}
