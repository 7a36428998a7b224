//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::domain::entities::DEFAULT_PREFIX;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    #[serde(default = "default_prefix")]
    pub default_prefix: char,
    /// Upper bound on a single command run; absent means unbounded
    #[serde(default)]
    pub handler_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

/// Identities used by the development console gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub bot_user_id: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WikipediaConfig {
    pub endpoint: String,
}

fn default_prefix() -> char {
    DEFAULT_PREFIX
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("simpbot.db"),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            guild_id: 1,
            channel_id: 10,
            author_id: 100,
            bot_user_id: 999,
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "simpbot".to_string(),
                default_prefix: DEFAULT_PREFIX,
                handler_timeout_secs: None,
            },
            database: DatabaseConfig::default(),
            console: ConsoleConfig::default(),
            wikipedia: WikipediaConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// File at `path` (or the defaults when it is absent) with environment overrides
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load_or_default`], reading overrides from `env`
    pub fn load_with(
        path: impl AsRef<Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(env);
        config.validate()?;
        Ok(config)
    }

    /// Override values win over file values
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(prefix) = env("BOT_PREFIX") {
            let mut chars = prefix.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => self.bot.default_prefix = symbol,
                _ => tracing::warn!("Ignoring BOT_PREFIX '{}': must be one character", prefix),
            }
        }

        if let Some(path) = env("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(endpoint) = env("WIKIPEDIA_ENDPOINT") {
            self.wikipedia.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.name.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.name".to_string()));
        }
        if self.bot.default_prefix.is_whitespace() {
            return Err(ConfigError::InvalidValue(
                "bot.default-prefix must not be whitespace".to_string(),
            ));
        }
        if self.bot.handler_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "bot.handler-timeout-secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn handler_timeout(&self) -> Option<Duration> {
        self.bot.handler_timeout_secs.map(Duration::from_secs)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
