use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A validation error in the configuration
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

/// Where the article files live
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_articles_dir")]
    pub articles_dir: PathBuf,
}

fn default_articles_dir() -> PathBuf {
    PathBuf::from("articles")
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            articles_dir: default_articles_dir(),
        }
    }
}

/// Contact form settings. Disabling the section removes the contact flow
/// entirely (a silent no-op, not an error).
#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_recipient")]
    pub recipient: String,
}

fn default_true() -> bool {
    true
}

fn default_recipient() -> String {
    "editor@example.com".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            recipient: default_recipient(),
        }
    }
}

/// Listing display settings
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    10
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from default paths.
    /// Priority: local (.kiosk/config.local.toml) > project (.kiosk/config.toml)
    /// > user (~/.kiosk/config.toml) > built-in defaults.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".kiosk").join("config.toml");
            if user_config.exists() {
                let user = Self::load_from(&user_config)?;
                config.merge(user);
            }
        }

        let project_config = Path::new(".kiosk").join("config.toml");
        if project_config.exists() {
            let project = Self::load_from(&project_config)?;
            config.merge(project);
        }

        let local_config = Path::new(".kiosk").join("config.local.toml");
        if local_config.exists() {
            let local = Self::load_from(&local_config)?;
            config.merge(local);
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes priority).
    /// Sections are replaced wholesale; serde defaults fill any field the
    /// other file omitted.
    pub fn merge(&mut self, other: Config) {
        self.library = other.library;
        self.contact = other.contact;
        self.ui = other.ui;
    }

    /// Validate configuration and return any errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.ui.page_size == 0 {
            errors.push(ValidationError {
                field: "ui.page_size".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.contact.enabled && self.contact.recipient.trim().is_empty() {
            errors.push(ValidationError {
                field: "contact.recipient".to_string(),
                message: "Required when the contact form is enabled".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
