//! Paper brokerage terminal
//!
//! Simulates the account side of a terminal so the console can run without
//! a real connection. Equity drifts around the balance; margin follows a
//! simulated open position.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::brokerage::BrokerageClient;
use crate::config::BrokerageConfig;
use crate::domain::AccountMetrics;
use crate::error::Result;

/// Mutable simulated account
#[derive(Debug)]
struct PaperAccount {
    balance: Decimal,
    floating_pnl: Decimal,
    margin: Decimal,
}

pub struct PaperBrokerage {
    connected: bool,
    initialized: AtomicBool,
    account: Mutex<PaperAccount>,
}

impl PaperBrokerage {
    pub fn new(config: &BrokerageConfig) -> Self {
        Self {
            connected: config.connected,
            initialized: AtomicBool::new(false),
            account: Mutex::new(PaperAccount {
                balance: config.initial_balance,
                floating_pnl: Decimal::ZERO,
                margin: Decimal::ZERO,
            }),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Advance the simulated account by one step
    fn step(&self) -> AccountMetrics {
        let mut guard = self.account.lock().unwrap_or_else(|e| e.into_inner());
        let account = &mut *guard;
        let mut rng = rand::thread_rng();

        if account.margin.is_zero() {
            if rng.gen_bool(0.3) {
                account.margin = (account.balance * dec!(0.02)).round_dp(2);
            }
        } else {
            account.floating_pnl += Decimal::new(rng.gen_range(-500..=500), 2);
            if rng.gen_bool(0.2) {
                // Position closed: realize the floating PnL
                account.balance += account.floating_pnl;
                account.floating_pnl = Decimal::ZERO;
                account.margin = Decimal::ZERO;
            }
        }

        AccountMetrics {
            equity: account.balance + account.floating_pnl,
            balance: account.balance,
            margin: account.margin,
        }
    }
}

#[async_trait]
impl BrokerageClient for PaperBrokerage {
    async fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            info!(connected = self.connected, "paper terminal initialized");
        }
        Ok(())
    }

    async fn fetch_account_info(&self) -> Result<Option<AccountMetrics>> {
        if !self.connected || !self.is_initialized() {
            debug!("paper terminal has no account info");
            return Ok(None);
        }
        Ok(Some(self.step()))
    }
}
