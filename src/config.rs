use crate::export::{bare_filename, DEFAULT_EXPORT_FILENAME};
use crate::language::SourceLanguage;
use crate::training::TrainingBackend;
use crate::translation::TranslationBackend;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config directory")]
    NoConfigDir,

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    /// Download/export settings
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Source language selected at startup
    #[serde(default)]
    pub language: SourceLanguage,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    #[serde(default)]
    pub engine: TranslationBackend,

    /// How long the simulated engine takes per request
    #[serde(default = "default_translation_delay")]
    pub simulated_delay_ms: u64,

    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// Request timeout for network backends. Timeouts are enforced by the
    /// backend, never by the workbench itself.
    #[serde(default = "default_translation_timeout")]
    pub timeout_secs: u32,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            engine: TranslationBackend::default(),
            simulated_delay_ms: default_translation_delay(),
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            timeout_secs: default_translation_timeout(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrainingConfig {
    #[serde(default)]
    pub engine: TrainingBackend,

    #[serde(default = "default_training_duration")]
    pub simulated_duration_ms: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            engine: TrainingBackend::default(),
            simulated_duration_ms: default_training_duration(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    /// Suggested filename for downloads
    #[serde(default = "default_export_filename")]
    pub filename: String,

    /// Directory downloads are written to (current directory when unset)
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_export_filename(),
            directory: None,
        }
    }
}

impl ExportConfig {
    pub fn directory_path(&self) -> PathBuf {
        self.directory
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NotificationConfig {
    /// Also raise desktop notifications
    #[serde(default)]
    pub desktop: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_translation_delay() -> u64 {
    1000
}

fn default_training_duration() -> u64 {
    3000
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_translation_timeout() -> u32 {
    30
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("com", "nmt-workbench", "nmt-workbench")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the data directory path (crash reports)
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("com", "nmt-workbench", "nmt-workbench")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, creating a default file there if
    /// it does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let filename = &self.export.filename;
        if filename.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "export filename must not be empty".into(),
            ));
        }

        if filename.trim() != filename.as_str() {
            return Err(ConfigError::ValidationError(
                "export filename must not start or end with whitespace".into(),
            ));
        }

        // The filename is joined onto the export directory
        if bare_filename(filename).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "export filename must be a plain file name: {}",
                filename
            )));
        }

        if self.translation.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "translation timeout_secs must be positive".into(),
            ));
        }

        if self.translation.engine == TranslationBackend::Ollama {
            if self.translation.ollama_model.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "ollama_model must be set when using the ollama engine".into(),
                ));
            }
            if !self.translation.ollama_url.starts_with("http://")
                && !self.translation.ollama_url.starts_with("https://")
            {
                return Err(ConfigError::ValidationError(
                    "ollama_url must be an http(s) URL".into(),
                ));
            }
        }

        Ok(())
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create config directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Config saved to: {}", path.display());
        Ok(())
    }
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Load from `path`, or the default location when `None`.
pub fn load_at(path: Option<&Path>) -> Result<Config, ConfigError> {
    Config::load_from(&resolve_path(path)?)
}

/// Show current configuration
pub fn show(path: Option<&Path>) -> anyhow::Result<()> {
    let path = resolve_path(path)?;
    let config = Config::load_from(&path)?;

    println!("Config file: {}\n", path.display());
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

/// Update configuration
pub fn update(
    path: Option<&Path>,
    language: Option<String>,
    engine: Option<String>,
    delay_ms: Option<u64>,
    export_dir: Option<String>,
    desktop_notifications: Option<bool>,
) -> anyhow::Result<()> {
    let path = resolve_path(path)?;
    let mut config = Config::load_from(&path)?;
    let mut changed = false;

    if let Some(lang) = language {
        config.session.language = lang
            .parse::<SourceLanguage>()
            .map_err(|e| anyhow::anyhow!(e))?;
        changed = true;
    }

    if let Some(engine) = engine {
        config.translation.engine = engine
            .parse::<TranslationBackend>()
            .map_err(|e| anyhow::anyhow!("{}. Use 'simulated' or 'ollama'.", e))?;
        changed = true;
    }

    if let Some(delay) = delay_ms {
        config.translation.simulated_delay_ms = delay;
        changed = true;
    }

    if let Some(dir) = export_dir {
        config.export.directory = Some(dir);
        changed = true;
    }

    if let Some(desktop) = desktop_notifications {
        config.notifications.desktop = desktop;
        changed = true;
    }

    if changed {
        config.validate()?;
        config.save_to(&path)?;
        println!("Configuration updated.");
    } else {
        println!("No changes specified. Use --show to view current config.");
    }

    Ok(())
}
