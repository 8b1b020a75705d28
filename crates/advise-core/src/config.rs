//! Configuration management for advise.
//!
//! Loads configuration from ${ADVISE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

pub mod paths {
    //! Path resolution for advise configuration.
    //!
    //! ADVISE_HOME resolution order:
    //! 1. ADVISE_HOME environment variable (if set)
    //! 2. ~/.config/advise (default)

    use std::path::PathBuf;

    /// Returns the advise home directory.
    pub fn advise_home() -> PathBuf {
        if let Ok(home) = std::env::var("ADVISE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("advise"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        advise_home().join("config.toml")
    }
}

/// One chat-completions endpoint an advice request can target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointProfile {
    pub name: String,
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for EndpointProfile {
    fn default() -> Self {
        Self {
            name: "deepseek".to_string(),
            base_url: Url::parse(Config::DEFAULT_BASE_URL).expect("valid default base URL"),
            api_key: String::new(),
            model: Config::DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 0.95,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

impl EndpointProfile {
    /// Fails when the profile cannot be used for a real request yet.
    pub fn ensure_configured(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("API key is not configured for profile '{}'", self.name);
        }
        Ok(())
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the profile to use; first profile when unset.
    pub default_profile: Option<String>,

    /// Configured completion endpoints.
    pub profiles: Vec<EndpointProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: None,
            profiles: vec![EndpointProfile::default()],
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
    const DEFAULT_MODEL: &str = "deepseek-chat";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the active endpoint profile.
    ///
    /// Picks the profile named by `default_profile`; falls back to the first
    /// profile when the name is unset or unknown.
    pub fn active_profile(&self) -> Result<&EndpointProfile> {
        let Some(first) = self.profiles.first() else {
            bail!("No endpoint profiles configured");
        };

        match self.default_profile.as_deref() {
            None => Ok(first),
            Some(name) => match self.profiles.iter().find(|p| p.name == name) {
                Some(profile) => Ok(profile),
                None => {
                    tracing::debug!(name, "default_profile not found; using first profile");
                    Ok(first)
                }
            },
        }
    }

    /// Saves only the default_profile field to a specific config file path.
    ///
    /// Creates the file with the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_default_profile_to(path: &Path, name: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["default_profile"] = value(name);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Commented config template shipped with the binary.
fn default_config_template() -> &'static str {
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/default_config.toml"))
}
