//! Configuration management for the IKMS client.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults (local development backend)
//! - Config files (`.ikms/config.yaml` or an explicit path)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources override earlier ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the RAG backend (serves `/qa`, `/index-pdf`, `/health`)
    pub api_base_url: String,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Request body field that carries the critic flag. Unset means the flag
    /// stays client-side.
    pub critic_param: Option<String>,

    /// Initial state of the context critic toggle
    pub use_critic: bool,

    /// Synthetic upload progress settings
    pub progress: ProgressConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Timing of the cosmetic upload progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(rename = "stepPercent")]
    pub step_percent: u8,

    #[serde(rename = "intervalMs")]
    pub interval_ms: u64,

    #[serde(rename = "capPercent")]
    pub cap_percent: u8,

    #[serde(rename = "resetDelayMs")]
    pub reset_delay_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step_percent: 10,
            interval_ms: 300,
            cap_percent: 90,
            reset_delay_ms: 2000,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    api: Option<ApiSection>,
    ui: Option<UiSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiSection {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    #[serde(rename = "criticParam")]
    critic_param: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UiSection {
    #[serde(rename = "useCritic")]
    use_critic: Option<bool>,
    progress: Option<ProgressSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProgressSection {
    #[serde(rename = "stepPercent")]
    step_percent: Option<u8>,
    #[serde(rename = "intervalMs")]
    interval_ms: Option<u64>,
    #[serde(rename = "capPercent")]
    cap_percent: Option<u8>,
    #[serde(rename = "resetDelayMs")]
    reset_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            config_file: None,
            critic_param: None,
            use_critic: true,
            progress: ProgressConfig::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `IKMS_API_BASE_URL`: Backend base URL
    /// - `IKMS_CONFIG`: Path to config file
    /// - `IKMS_CRITIC_PARAM`: Wire name of the critic flag
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ikms_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Backend: {}", config.api_base_url);
    /// ```
    pub fn load() -> AppResult<Self> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_with(&cwd, |key| std::env::var(key).ok())
    }

    /// Load configuration using `cwd` for the default config file location and
    /// `env` for variable lookups.
    pub fn load_with<F>(cwd: &Path, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(config_file) = env("IKMS_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => cwd.join(".ikms/config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Some(base_url) = env("IKMS_API_BASE_URL") {
            config.api_base_url = base_url;
        }

        if let Some(param) = env("IKMS_CRITIC_PARAM") {
            config.critic_param = Some(param).filter(|p| !p.trim().is_empty());
        }

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(api) = config_file.api {
            if let Some(base_url) = api.base_url {
                result.api_base_url = base_url;
            }
            if api.critic_param.is_some() {
                result.critic_param = api.critic_param;
            }
        }

        if let Some(ui) = config_file.ui {
            if let Some(use_critic) = ui.use_critic {
                result.use_critic = use_critic;
            }
            if let Some(progress) = ui.progress {
                let p = &mut result.progress;
                p.step_percent = progress.step_percent.unwrap_or(p.step_percent);
                p.interval_ms = progress.interval_ms.unwrap_or(p.interval_ms);
                p.cap_percent = progress.cap_percent.unwrap_or(p.cap_percent);
                p.reset_delay_ms = progress.reset_delay_ms.unwrap_or(p.reset_delay_ms);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the environment and the config file.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(api_base_url) = api_base_url {
            self.api_base_url = api_base_url;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API base URL must start with http:// or https://: {}",
                self.api_base_url
            )));
        }

        if self.progress.step_percent == 0 {
            return Err(AppError::Config(
                "Progress step must be greater than zero".to_string(),
            ));
        }

        if self.progress.interval_ms == 0 {
            return Err(AppError::Config(
                "Progress interval must be greater than zero".to_string(),
            ));
        }

        if self.progress.cap_percent >= 100 {
            return Err(AppError::Config(format!(
                "Progress cap must stay below 100, got {}",
                self.progress.cap_percent
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.use_critic);
        assert!(config.critic_param.is_none());
        assert_eq!(config.progress, ProgressConfig::default());
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_load_without_file_uses_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with(
            dir.path(),
            env_from(&[
                ("IKMS_API_BASE_URL", "https://rag.example.com"),
                ("IKMS_CRITIC_PARAM", "use_critic"),
                ("NO_COLOR", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://rag.example.com");
        assert_eq!(config.critic_param.as_deref(), Some("use_critic"));
        assert!(config.no_color);
    }

    #[test]
    fn test_yaml_then_env_precedence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".ikms")).unwrap();
        std::fs::write(
            dir.path().join(".ikms/config.yaml"),
            r#"
api:
  baseUrl: http://10.0.0.5:8000
  criticParam: critic
ui:
  useCritic: false
  progress:
    stepPercent: 5
    capPercent: 80
logging:
  level: warn
  color: false
"#,
        )
        .unwrap();

        let config = AppConfig::load_with(dir.path(), env_from(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:8000");
        assert_eq!(config.critic_param.as_deref(), Some("critic"));
        assert!(!config.use_critic);
        assert_eq!(config.progress.step_percent, 5);
        assert_eq!(config.progress.cap_percent, 80);
        assert_eq!(config.progress.interval_ms, 300);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(config.no_color);

        let config = AppConfig::load_with(
            dir.path(),
            env_from(&[("IKMS_API_BASE_URL", "http://override:9000")]),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://override:9000");
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let result = AppConfig::load_with(
            dir.path(),
            env_from(&[("IKMS_CONFIG", missing.to_str().unwrap())]),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden =
            config.with_overrides(Some("http://remote:8000".to_string()), None, true, false);

        assert_eq!(overridden.api_base_url, "http://remote:8000");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.api_base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.progress.cap_percent = 100;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.progress.step_percent = 0;
        assert!(config.validate().is_err());
    }
}
