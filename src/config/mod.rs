//! # Configuration
//!
//! Pathrover reads an optional TOML file. Every section has defaults, so an
//! empty or missing file yields a playable setup against the public server.
//!
//! ```toml
//! [pathbot]
//! base_url = "https://api.noopschallenge.com"
//! timeout_seconds = 10
//!
//! [console]
//! typing_effect = true
//! typing_min_ms = 300
//! typing_max_ms = 1800
//! indent = 12
//!
//! [solver]
//! max_moves = 2000
//! # seed = 7
//!
//! [logging]
//! level = "warn"
//! # file = "pathrover.log"
//! ```
//!
//! Precedence: CLI args > config file > defaults.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pathbot: PathbotConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathbotConfig {
    /// Server root; location paths from replies are appended to it.
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for PathbotConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.noopschallenge.com".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Show the animated "Typing..." status before narrative lines.
    #[serde(default = "default_typing_effect")]
    pub typing_effect: bool,
    #[serde(default = "default_typing_min_ms")]
    pub typing_min_ms: u64,
    #[serde(default = "default_typing_max_ms")]
    pub typing_max_ms: u64,
    /// Left margin for the map and continuation lines.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_typing_effect() -> bool {
    true
}

fn default_typing_min_ms() -> u64 {
    300
}

fn default_typing_max_ms() -> u64 {
    1800
}

fn default_indent() -> usize {
    12
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            typing_effect: default_typing_effect(),
            typing_min_ms: default_typing_min_ms(),
            typing_max_ms: default_typing_max_ms(),
            indent: default_indent(),
        }
    }
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.typing_min_ms > self.typing_max_ms {
            return Err(anyhow!(
                "console.typing_min_ms ({}) must not exceed console.typing_max_ms ({})",
                self.typing_min_ms,
                self.typing_max_ms
            ));
        }
        Ok(())
    }
}

/// Settings for the random-walk player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Give up (quit) after this many moves. 0 walks until the exit.
    pub max_moves: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_moves: 2000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unrecognised names fall back to `warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
        config.console.validate()?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
