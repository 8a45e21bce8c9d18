use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use loup::agent::{AgentController, SimulatedAgent};
use loup::bridge::LogRouter;
use loup::brokerage::PaperBrokerage;
use loup::cli::{Cli, Commands, RunArgs};
use loup::config::AppConfig;
use loup::logging::{init_logging, init_logging_simple};
use loup::poller::AccountPoller;
use loup::tui::ConsoleRunner;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Run(RunArgs::default()));

    match command {
        Commands::Run(args) => {
            let mut config = load_config(&cli.config_dir)?;
            args.apply(&mut config);
            validate(&config)?;
            run_console(config).await?;
        }
        Commands::Config { json } => {
            let config = load_config(&cli.config_dir)?;
            let rendered = if json {
                serde_json::to_string_pretty(&config).context("failed to render configuration")?
            } else {
                toml::to_string_pretty(&config).context("failed to render configuration")?
            };
            println!("{rendered}");
        }
        Commands::Account { offline } => {
            init_logging_simple();
            let mut config = load_config(&cli.config_dir)?;
            if offline {
                config.brokerage.connected = false;
            }
            validate(&config)?;
            let poller = account_poller(&config);
            println!("{}", poller.poll_once().await);
        }
    }

    Ok(())
}

fn load_config(dir: &str) -> Result<AppConfig> {
    AppConfig::load_from(dir).with_context(|| format!("failed to load configuration from {dir}"))
}

fn validate(config: &AppConfig) -> Result<()> {
    if let Err(errors) = config.validate() {
        bail!("invalid configuration: {}", errors.join("; "));
    }
    Ok(())
}

fn account_poller(config: &AppConfig) -> AccountPoller {
    let brokerage = Arc::new(PaperBrokerage::new(&config.brokerage));
    AccountPoller::new(
        brokerage,
        config.pollers.account_interval(),
        config.pollers.account_fetch_timeout(),
    )
}

async fn run_console(config: AppConfig) -> Result<()> {
    let router = LogRouter::new();
    let _logging = init_logging(&config.logging, router.clone()).context("failed to init logging")?;

    let agent = Arc::new(SimulatedAgent::new(config.agent.bar_interval()));
    let controller = AgentController::new(agent, config.agent.agent_config());
    let runner = ConsoleRunner::new(&config, controller, account_poller(&config), &router);

    let report = runner.run().await.context("console failed")?;
    if let Some(err) = &report.stop_error {
        warn!(error = %err, "agent may still be running");
    }
    info!("bye");
    Ok(())
}
