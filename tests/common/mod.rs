//! Hand-written collaborators shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use loup::brokerage::BrokerageClient;
use loup::domain::{AccountMetrics, AgentConfig};
use loup::error::{LoupError, Result};
use loup::agent::TradingAgent;

/// Agent that records every call
#[derive(Default)]
pub struct FakeAgent {
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub started_with: Mutex<Vec<AgentConfig>>,
    pub fail_start: AtomicBool,
    pub fail_stop: AtomicBool,
    running: AtomicBool,
}

impl FakeAgent {
    pub fn starts(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<AgentConfig> {
        self.started_with.lock().unwrap().last().copied()
    }
}

impl TradingAgent for FakeAgent {
    fn start(&self, config: &AgentConfig) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.started_with.lock().unwrap().push(*config);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(LoupError::Agent("terminal refused login".into()));
        }
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(LoupError::Agent("stop rejected".into()));
        }
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// What the fake brokerage answers with
#[derive(Clone)]
pub enum Reply {
    Metrics(AccountMetrics),
    NotConnected,
    Fail(String),
    Slow(Duration),
}

/// Brokerage that replays a fixed answer
pub struct FakeBrokerage {
    reply: Mutex<Reply>,
    pub init_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl FakeBrokerage {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            init_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerageClient for FakeBrokerage {
    async fn ensure_initialized(&self) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_account_info(&self) -> Result<Option<AccountMetrics>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Metrics(metrics) => Ok(Some(metrics)),
            Reply::NotConnected => Ok(None),
            Reply::Fail(msg) => Err(LoupError::Brokerage(msg)),
            Reply::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(None)
            }
        }
    }
}
