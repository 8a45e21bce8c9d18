//! Console runner
//!
//! Owns the control loop: keyboard, log stream and both pollers are served
//! from one `select!`, so every piece of UI state is touched by this task only.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::agent::{AgentController, StartOutcome, StopOutcome};
use crate::bridge::{log_bridge, LogEvent, LogRouter, LogStream, OutputRedirect};
use crate::config::AppConfig;
use crate::coordination::{ShutdownCoordinator, ShutdownReport};
use crate::domain::AccountSnapshot;
use crate::error::{LoupError, Result};
use crate::poller::{AccountPoller, StatusPoller};
use crate::tui::app::ConsoleApp;
use crate::tui::event::{EntryKey, KeyAction};
use crate::tui::{init_terminal, restore_terminal, ui};

/// Log lines moved into the panel per wakeup
const LOG_BATCH: usize = 256;

/// Console runner that ties the agent, the pollers and the dashboard together
pub struct ConsoleRunner {
    app: ConsoleApp,
    controller: AgentController,
    status_poller: StatusPoller,
    account_poller: AccountPoller,
    logs: LogStream,
    redirect: OutputRedirect,
    shutdown: ShutdownCoordinator,
    tick_rate: Duration,
}

impl ConsoleRunner {
    /// Build the console and take over the process output.
    ///
    /// From here on every line written through `router` lands in the log
    /// panel, until the console closes.
    pub fn new(
        config: &AppConfig,
        controller: AgentController,
        account_poller: AccountPoller,
        router: &LogRouter,
    ) -> Self {
        let (bridge, logs) = log_bridge();
        let redirect = router.redirect(bridge);

        let app = ConsoleApp::new(
            controller.lot(),
            controller.status(),
            config.ui.max_log_lines,
        );

        Self {
            app,
            controller,
            status_poller: StatusPoller::new(config.pollers.status_interval()),
            account_poller,
            logs,
            redirect,
            shutdown: ShutdownCoordinator::new(config.shutdown.stop_ack_timeout()),
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
        }
    }

    /// Run until the operator quits.
    ///
    /// The terminal is restored and the shutdown sequence runs on every exit
    /// path, including a failed terminal setup or a draw error.
    pub async fn run(mut self) -> Result<ShutdownReport> {
        info!("console opening");

        let outcome = match init_terminal() {
            Ok(mut terminal) => {
                let outcome = self.event_loop(&mut terminal).await;
                if let Err(e) = restore_terminal() {
                    warn!(error = %e, "failed to restore terminal");
                }
                outcome
            }
            Err(e) => {
                let _ = restore_terminal();
                Err(LoupError::Terminal(format!("failed to init terminal: {e}")))
            }
        };

        let report = self
            .shutdown
            .close(&mut self.redirect, &mut self.controller)
            .await;

        // Lines still queued when the redirect was released
        for event in self.logs.drain(usize::MAX) {
            if event.is_error() {
                eprintln!("{}", event.text());
            } else {
                println!("{}", event.text());
            }
        }

        info!(%report, "console closed");
        outcome.map(|()| report)
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut keys = EventStream::new();
        let (account_tx, mut account_rx) = mpsc::unbounded_channel::<AccountSnapshot>();

        let mut status_tick = ticker(self.status_poller.interval());
        let mut account_tick = ticker(self.account_poller.interval());
        let mut redraw_tick = ticker(self.tick_rate);

        while self.app.is_running() {
            terminal
                .draw(|f| ui::render(f, &self.app))
                .map_err(|e| LoupError::Terminal(format!("failed to render: {e}")))?;

            tokio::select! {
                maybe_event = keys.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return Err(LoupError::Terminal(format!("keyboard input failed: {e}")));
                    }
                    None => {
                        warn!("keyboard stream ended, closing console");
                        self.app.quit();
                    }
                },

                Some(event) = self.logs.recv() => {
                    self.push_logs(event);
                }

                _ = status_tick.tick() => {
                    self.refresh_status();
                }

                _ = account_tick.tick() => {
                    self.account_poller.spawn_tick(account_tx.clone());
                }

                Some(snapshot) = account_rx.recv() => {
                    self.app.set_account(snapshot);
                }

                _ = redraw_tick.tick() => {}
            }
        }

        Ok(())
    }

    fn push_logs(&mut self, first: LogEvent) {
        self.app.push_log(first);
        for event in self.logs.drain(LOG_BATCH) {
            self.app.push_log(event);
        }
    }

    fn refresh_status(&mut self) {
        let status = self.status_poller.render(&self.controller);
        self.app.set_status(status);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.app.is_editing_lot() {
            self.handle_entry_key(key);
            return;
        }

        match KeyAction::from(key) {
            KeyAction::Quit => self.app.quit(),
            KeyAction::StartAgent => self.start_agent(),
            KeyAction::StopAgent => self.stop_agent(),
            KeyAction::LotUp => self.app.lot_up(),
            KeyAction::LotDown => self.app.lot_down(),
            KeyAction::EditLot => self.app.begin_lot_entry(),
            KeyAction::ScrollUp => self.app.scroll_up(),
            KeyAction::ScrollDown => self.app.scroll_down(),
            KeyAction::ScrollToTail => self.app.scroll_to_tail(),
            KeyAction::Help => self.app.toggle_help(),
            KeyAction::None => {}
        }
    }

    fn handle_entry_key(&mut self, key: KeyEvent) {
        match EntryKey::from(key) {
            EntryKey::Commit => match self.app.commit_lot_entry() {
                Ok(lot) => info!(lot = %lot, "position size set"),
                Err(e) => warn!(
                    error = %e,
                    lot = %self.app.lot_input,
                    "lot entry rejected, input unchanged"
                ),
            },
            EntryKey::Cancel => self.app.cancel_lot_entry(),
            EntryKey::Backspace => self.app.lot_entry_pop(),
            EntryKey::Input(c) => self.app.lot_entry_push(c),
            EntryKey::Ignore => {}
        }
    }

    fn start_agent(&mut self) {
        match self.controller.start(self.app.lot_input) {
            Ok(StartOutcome::Started) => info!("agent running"),
            Ok(StartOutcome::AlreadyRunning) => {}
            // Controller already logged and recorded the failure
            Err(_) => {}
        }
        self.refresh_status();
    }

    fn stop_agent(&mut self) {
        match self.controller.stop() {
            Ok(StopOutcome::Stopped) => info!("agent stop requested"),
            Ok(StopOutcome::AlreadyStopped) => debug!("stop ignored, agent not running"),
            Err(_) => {}
        }
        self.refresh_status();
    }
}

fn ticker(period: Duration) -> Interval {
    let mut tick = interval(period);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tick
}
