use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::{AgentConfig, Lot, TradeMode};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub pollers: PollerConfig,
    #[serde(default)]
    pub brokerage: BrokerageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSection {
    /// Lot shown in the input when the console opens
    #[serde(default)]
    pub default_lot: Lot,
    /// Trading direction handed to the agent
    #[serde(default)]
    pub mode: TradeMode,
    /// Bar interval of the simulated agent in milliseconds
    #[serde(default = "default_bar_interval")]
    pub bar_interval_ms: u64,
}

fn default_bar_interval() -> u64 {
    2000
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            default_lot: Lot::default(),
            mode: TradeMode::default(),
            bar_interval_ms: default_bar_interval(),
        }
    }
}

impl AgentSection {
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig::new(self.default_lot, self.mode)
    }

    pub fn bar_interval(&self) -> Duration {
        Duration::from_millis(self.bar_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Status refresh interval in milliseconds
    #[serde(default = "default_status_interval")]
    pub status_interval_ms: u64,
    /// Account refresh interval in milliseconds
    #[serde(default = "default_account_interval")]
    pub account_interval_ms: u64,
    /// Upper bound for one account fetch in milliseconds
    #[serde(default = "default_account_fetch_timeout")]
    pub account_fetch_timeout_ms: u64,
}

fn default_status_interval() -> u64 {
    1000
}

fn default_account_interval() -> u64 {
    5000
}

fn default_account_fetch_timeout() -> u64 {
    4000
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval(),
            account_interval_ms: default_account_interval(),
            account_fetch_timeout_ms: default_account_fetch_timeout(),
        }
    }
}

impl PollerConfig {
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn account_interval(&self) -> Duration {
        Duration::from_millis(self.account_interval_ms)
    }

    pub fn account_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.account_fetch_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageConfig {
    /// Starting balance of the paper terminal
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Decimal,
    /// Whether the paper terminal reports account info
    #[serde(default = "default_connected")]
    pub connected: bool,
}

fn default_initial_balance() -> Decimal {
    dec!(1000)
}

fn default_connected() -> bool {
    true
}

impl Default for BrokerageConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            connected: default_connected(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw fallback interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Log lines kept in the log panel
    #[serde(default = "default_max_log_lines")]
    pub max_log_lines: usize,
}

fn default_tick_rate() -> u64 {
    250
}

fn default_max_log_lines() -> usize {
    5000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            max_log_lines: default_max_log_lines(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// How long to wait for the agent to halt on close (0 = do not wait)
    #[serde(default)]
    pub stop_ack_timeout_ms: u64,
}

impl ShutdownConfig {
    pub fn stop_ack_timeout(&self) -> Option<Duration> {
        (self.stop_ack_timeout_ms > 0).then(|| Duration::from_millis(self.stop_ack_timeout_ms))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for the daily log file; no file logging when unset
    #[serde(default)]
    pub file_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("pollers.status_interval_ms", 1000)?
            .set_default("pollers.account_interval_ms", 5000)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("LOUP_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (LOUP__AGENT__MODE, etc.)
            .add_source(
                Environment::with_prefix("LOUP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.pollers.status_interval_ms == 0 {
            errors.push("status_interval_ms must be positive".to_string());
        }

        if self.pollers.account_interval_ms == 0 {
            errors.push("account_interval_ms must be positive".to_string());
        }

        if self.pollers.account_fetch_timeout_ms == 0 {
            errors.push("account_fetch_timeout_ms must be positive".to_string());
        } else if self.pollers.account_fetch_timeout_ms > self.pollers.account_interval_ms {
            errors.push(
                "account_fetch_timeout_ms should not exceed account_interval_ms".to_string(),
            );
        }

        if self.agent.bar_interval_ms == 0 {
            errors.push("bar_interval_ms must be positive".to_string());
        }

        if self.brokerage.initial_balance < Decimal::ZERO {
            errors.push("initial_balance must not be negative".to_string());
        }

        if self.ui.max_log_lines == 0 {
            errors.push("max_log_lines must be positive".to_string());
        }

        if self.ui.tick_rate_ms == 0 {
            errors.push("tick_rate_ms must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
