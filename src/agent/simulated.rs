//! Simulated agent used by the console binary
//!
//! Stands in for the real strategy: it runs on its own OS thread, snapshots
//! its config at start and reports what it does through `tracing`, so its
//! output reaches the console through the same path as a real agent's.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::TradingAgent;
use crate::domain::{AgentConfig, TradeMode};
use crate::error::{LoupError, Result};

/// Granularity of the worker's stop check
const STOP_POLL: Duration = Duration::from_millis(50);

/// A running worker and its stop flag
struct Worker {
    session: Uuid,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Open simulated position
#[derive(Debug, Clone, Copy)]
struct OpenTrade {
    long: bool,
    entry: Decimal,
    bars: u32,
}

/// Agent that simulates bar-by-bar trading on a background thread
pub struct SimulatedAgent {
    bar_interval: Duration,
    worker: Mutex<Option<Worker>>,
}

impl SimulatedAgent {
    pub fn new(bar_interval: Duration) -> Self {
        Self {
            bar_interval,
            worker: Mutex::new(None),
        }
    }

    fn worker_slot(&self) -> std::sync::MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SimulatedAgent {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl TradingAgent for SimulatedAgent {
    fn start(&self, config: &AgentConfig) -> Result<()> {
        let mut slot = self.worker_slot();
        if let Some(worker) = slot.take() {
            if !worker.handle.is_finished() && !worker.stop.load(Ordering::SeqCst) {
                let session = worker.session;
                *slot = Some(worker);
                return Err(LoupError::Agent(format!(
                    "session {session} is still running"
                )));
            }
            // A stopped worker halts within one stop check; wait for it
            if worker.handle.join().is_err() {
                warn!(session = %worker.session, "previous agent session panicked");
            }
        }

        let session = Uuid::new_v4();
        let stop = Arc::new(AtomicBool::new(false));
        let config = *config;
        let bar_interval = self.bar_interval;
        let worker_stop = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("loup-agent".to_string())
            .spawn(move || run_session(session, config, bar_interval, worker_stop))
            .map_err(|e| LoupError::Agent(format!("failed to spawn agent thread: {e}")))?;

        *slot = Some(Worker {
            session,
            stop,
            handle,
        });
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        if let Some(worker) = self.worker_slot().as_ref() {
            worker.stop.store(true, Ordering::SeqCst);
            debug!(session = %worker.session, "stop requested");
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.worker_slot()
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }
}

/// Worker thread body
fn run_session(session: Uuid, config: AgentConfig, bar_interval: Duration, stop: Arc<AtomicBool>) {
    info!(
        session = %session,
        lot = %config.position_size,
        mode = %config.mode,
        "agent session started"
    );

    let mut rng = rand::thread_rng();
    let mut price = dec!(97000);
    let mut trade: Option<OpenTrade> = None;

    'bars: loop {
        let mut waited = Duration::ZERO;
        while waited < bar_interval {
            if stop.load(Ordering::SeqCst) {
                break 'bars;
            }
            std::thread::sleep(STOP_POLL);
            waited += STOP_POLL;
        }

        let move_bps: i64 = rng.gen_range(-25..=25);
        price += price * Decimal::new(move_bps, 4);
        price = price.round_dp(2);
        info!("bar closed close={}", price);

        match trade.as_mut() {
            None => {
                if rng.gen_bool(0.25) {
                    let long = match config.mode {
                        TradeMode::Long => true,
                        TradeMode::Short => false,
                        TradeMode::Duel => rng.gen_bool(0.5),
                    };
                    trade = Some(OpenTrade {
                        long,
                        entry: price,
                        bars: 0,
                    });
                    info!(
                        "Trade opened side={} lot={} entry={}",
                        if long { "long" } else { "short" },
                        config.position_size,
                        price
                    );
                }
            }
            Some(open) => {
                open.bars += 1;
                if open.bars >= 3 && rng.gen_bool(0.4) {
                    let diff = if open.long {
                        price - open.entry
                    } else {
                        open.entry - price
                    };
                    let pnl = (diff * config.position_size.value()).round_dp(2);
                    info!("Trade closed pnl={} bars={}", pnl, open.bars);
                    trade = None;
                }
            }
        }

        if rng.gen_bool(0.05) {
            warn!("spread widened above threshold, skipping signal");
        }
    }

    if let Some(open) = trade {
        warn!(entry = %open.entry, "agent halted with an open trade");
    }
    info!(session = %session, "agent session halted");
}
