use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::{Lot, TradeMode};

#[derive(Parser, Debug)]
#[command(name = "loup")]
#[command(version = "0.1.0")]
#[command(about = "Terminal console for supervising a live trading agent", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding default.toml and the per-environment overrides
    #[arg(short, long, default_value = "config", env = "LOUP_CONFIG_DIR", global = true)]
    pub config_dir: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the console (default)
    Run(RunArgs),
    /// Print the effective configuration
    Config {
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Poll the brokerage once and print the account line
    Account {
        /// Treat the paper terminal as disconnected
        #[arg(long)]
        offline: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Lot pre-filled in the console (0.01 - 1.00)
    #[arg(short, long, value_parser = parse_lot)]
    pub lot: Option<Lot>,

    /// Trading direction handed to the agent
    #[arg(short, long, value_enum)]
    pub mode: Option<TradeMode>,

    /// Treat the paper terminal as disconnected
    #[arg(long)]
    pub offline: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded file/env config
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(lot) = self.lot {
            config.agent.default_lot = lot;
        }
        if let Some(mode) = self.mode {
            config.agent.mode = mode;
        }
        if self.offline {
            config.brokerage.connected = false;
        }
    }
}

fn parse_lot(s: &str) -> std::result::Result<Lot, String> {
    s.parse::<Lot>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_override_config() {
        let cli = Cli::parse_from(["loup", "run", "--lot", "0.05", "--mode", "long", "--offline"]);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.agent.default_lot.to_string(), "0.05");
        assert_eq!(config.agent.mode, TradeMode::Long);
        assert!(!config.brokerage.connected);
    }

    #[test]
    fn test_out_of_range_lot_is_a_parse_error() {
        assert!(Cli::try_parse_from(["loup", "run", "--lot", "2"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["loup", "--config-dir", "/tmp/loup"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config_dir, "/tmp/loup");
    }
}
