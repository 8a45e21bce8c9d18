//! Account poller
//!
//! Every failure of the brokerage call ends as a snapshot: "no info" is
//! `NotConnected`, errors, timeouts and panics are `Error`. Nothing escapes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::brokerage::BrokerageClient;
use crate::domain::AccountSnapshot;

/// Polls account metrics from the brokerage terminal
pub struct AccountPoller {
    client: Arc<dyn BrokerageClient>,
    interval: Duration,
    fetch_timeout: Duration,
    in_flight: Arc<AtomicBool>,
}

impl AccountPoller {
    pub fn new(client: Arc<dyn BrokerageClient>, interval: Duration, fetch_timeout: Duration) -> Self {
        Self {
            client,
            interval,
            fetch_timeout,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a spawned tick has not finished yet
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run one poll and wait for its snapshot
    pub async fn poll_once(&self) -> AccountSnapshot {
        contained_poll(Arc::clone(&self.client), self.fetch_timeout).await
    }

    /// Run one poll in the background and send the snapshot to `sink`.
    ///
    /// Returns `false` without polling when the previous tick is still in
    /// flight, so slow fetches never stack up.
    pub fn spawn_tick(&self, sink: mpsc::UnboundedSender<AccountSnapshot>) -> bool {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("previous account poll still in flight, skipping tick");
            return false;
        };

        let client = Arc::clone(&self.client);
        let fetch_timeout = self.fetch_timeout;
        tokio::spawn(async move {
            let snapshot = contained_poll(client, fetch_timeout).await;
            drop(guard);
            let _ = sink.send(snapshot);
        });
        true
    }
}

/// Clears the in-flight flag when the tick ends, however it ends
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Poll in a separate task so a panicking client is contained too
async fn contained_poll(client: Arc<dyn BrokerageClient>, fetch_timeout: Duration) -> AccountSnapshot {
    let task = tokio::spawn(async move {
        tokio::time::timeout(fetch_timeout, fetch_snapshot(client.as_ref())).await
    });

    let snapshot = match task.await {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(_)) => AccountSnapshot::Error(format!(
            "account fetch timed out after {}ms",
            fetch_timeout.as_millis()
        )),
        Err(e) if e.is_panic() => {
            AccountSnapshot::Error(format!("brokerage call panicked: {}", panic_message(e.into_panic())))
        }
        Err(_) => AccountSnapshot::Error("account fetch cancelled".to_string()),
    };

    match &snapshot {
        AccountSnapshot::Metrics(m) => debug!(equity = %m.equity, balance = %m.balance, "account polled"),
        AccountSnapshot::NotConnected => debug!("brokerage not connected"),
        AccountSnapshot::Error(msg) => warn!(error = %msg, "account poll failed"),
    }
    snapshot
}

async fn fetch_snapshot(client: &dyn BrokerageClient) -> AccountSnapshot {
    if let Err(e) = client.ensure_initialized().await {
        return AccountSnapshot::error(e);
    }
    match client.fetch_account_info().await {
        Ok(info) => AccountSnapshot::from(info),
        Err(e) => AccountSnapshot::error(e),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
