use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Port the SwagTrackr Flask server listens on by default
const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";

const DEFAULT_TOAST_SECONDS: u64 = 4;

/// Optional hex colour overrides (`#RRGGBB` or `#RGB`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the SwagTrackr API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Mirror toasts as desktop notifications
    #[serde(default)]
    pub notifications: bool,

    /// How long a toast stays on screen
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,

    #[serde(default)]
    pub theme: ThemeOverrides,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_toast_seconds() -> u64 {
    DEFAULT_TOAST_SECONDS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            notifications: false,
            toast_seconds: DEFAULT_TOAST_SECONDS,
            theme: ThemeOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("swagtrackr");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path` (or the default location), creating it if missing
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Ok(p) => p,
                Err(_) => return Ok(AppConfig::default()),
            },
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
            // Never overwrite a file the user wrote but we couldn't read
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save(&path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut clean_config = self.clone();
        clean_config.api_url = clean_config.api_url.trim().to_string();
        if clean_config.api_url.is_empty() {
            clean_config.api_url = default_api_url();
        }

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn toast_lifetime(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.toast_seconds.max(1))
    }
}
