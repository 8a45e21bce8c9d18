//! Account polling against a scripted brokerage

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeBrokerage, Reply};
use loup::domain::{AccountMetrics, AccountSnapshot};
use loup::poller::AccountPoller;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;

fn poller(client: &Arc<FakeBrokerage>) -> AccountPoller {
    AccountPoller::new(
        client.clone(),
        Duration::from_millis(50),
        Duration::from_millis(200),
    )
}

#[tokio::test]
async fn connected_account_renders_two_decimals() {
    let client = Arc::new(FakeBrokerage::new(Reply::Metrics(AccountMetrics {
        equity: dec!(1000.0),
        balance: dec!(1000.0),
        margin: dec!(0.0),
    })));

    let snapshot = poller(&client).poll_once().await;
    assert_eq!(
        snapshot.to_string(),
        "Equity: 1000.00 | Balance: 1000.00 | Margin: 0.00"
    );
}

#[tokio::test]
async fn missing_account_renders_not_connected() {
    let client = Arc::new(FakeBrokerage::new(Reply::NotConnected));

    let snapshot = poller(&client).poll_once().await;
    assert_eq!(snapshot, AccountSnapshot::NotConnected);
    let text = snapshot.to_string();
    assert_eq!(text.matches("N/A").count(), 3);
    assert!(text.contains("not connected"));
}

#[tokio::test]
async fn failure_renders_message_and_next_tick_retries() {
    let client = Arc::new(FakeBrokerage::new(Reply::Fail("timeout".into())));
    let poller = poller(&client);

    let snapshot = poller.poll_once().await;
    assert!(matches!(snapshot, AccountSnapshot::Error(_)));
    assert!(snapshot.to_string().contains("timeout"));

    client.set_reply(Reply::Metrics(AccountMetrics {
        equity: dec!(990.5),
        balance: dec!(1000),
        margin: dec!(20),
    }));
    let snapshot = poller.poll_once().await;
    assert_eq!(
        snapshot.to_string(),
        "Equity: 990.50 | Balance: 1000.00 | Margin: 20.00"
    );
    assert_eq!(client.fetches(), 2);
}

#[tokio::test]
async fn every_tick_initializes_first() {
    let client = Arc::new(FakeBrokerage::new(Reply::NotConnected));
    let poller = poller(&client);
    poller.poll_once().await;
    poller.poll_once().await;
    assert_eq!(
        client.init_calls.load(std::sync::atomic::Ordering::SeqCst),
        2
    );
}

#[tokio::test]
async fn slow_fetch_is_bounded_by_the_timeout() {
    let client = Arc::new(FakeBrokerage::new(Reply::Slow(Duration::from_secs(5))));
    let snapshot = poller(&client).poll_once().await;
    assert!(snapshot.to_string().contains("timed out"));
}

#[tokio::test]
async fn overlapping_ticks_are_skipped() {
    let client = Arc::new(FakeBrokerage::new(Reply::Slow(Duration::from_millis(100))));
    let poller = poller(&client);
    let (tx, mut rx) = mpsc::unbounded_channel();

    assert!(poller.spawn_tick(tx.clone()));
    assert!(!poller.spawn_tick(tx.clone()));

    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot, AccountSnapshot::NotConnected);
    assert!(!poller.is_in_flight());

    assert!(poller.spawn_tick(tx));
    rx.recv().await.unwrap();
    assert_eq!(client.fetches(), 2);
}
