//! Start/stop behaviour of the controller against a recording agent

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::FakeAgent;
use loup::agent::{AgentController, SimulatedAgent, StartOutcome, StopOutcome, TradingAgent};
use loup::domain::{AgentConfig, Lot, TradeMode};
use loup::poller::StatusPoller;
use rust_decimal::Decimal;

fn controller(agent: &Arc<FakeAgent>) -> AgentController {
    AgentController::new(agent.clone(), AgentConfig::default())
}

#[test]
fn start_with_lot_renders_running() {
    let agent = Arc::new(FakeAgent::default());
    let mut controller = controller(&agent);
    let poller = StatusPoller::default();

    let lot: Lot = "0.05".parse().unwrap();
    assert_eq!(controller.start(lot).unwrap(), StartOutcome::Started);

    assert_eq!(agent.starts(), 1);
    assert_eq!(agent.last_config().unwrap().position_size, lot);
    assert_eq!(
        poller.render(&controller).to_string(),
        "Agent: RUNNING, lot=0.05 | mode=duel"
    );
}

/// Every lot in range reaches the agent unchanged
#[test]
fn every_lot_in_range_is_handed_to_the_agent() {
    for cents in 1..=100 {
        let agent = Arc::new(FakeAgent::default());
        let mut controller = controller(&agent);
        let lot = Lot::new(Decimal::new(cents, 2)).unwrap();

        controller.start(lot).unwrap();
        assert_eq!(agent.last_config().unwrap().position_size, lot);
        assert_eq!(controller.lot(), lot);
        controller.stop().unwrap();
    }
}

#[test]
fn stop_while_running_renders_stopped_with_last_lot() {
    let agent = Arc::new(FakeAgent::default());
    let mut controller = controller(&agent);
    controller.start("0.30".parse().unwrap()).unwrap();

    assert_eq!(controller.stop().unwrap(), StopOutcome::Stopped);
    assert_eq!(agent.stops(), 1);
    assert_eq!(
        controller.status().to_string(),
        "Agent: STOPPED, lot=0.30 | mode=duel"
    );
}

#[test]
fn stop_while_stopped_is_a_no_op() {
    let agent = Arc::new(FakeAgent::default());
    let mut controller = controller(&agent);
    let before = controller.status();

    assert_eq!(controller.stop().unwrap(), StopOutcome::AlreadyStopped);
    assert_eq!(agent.stops(), 0);
    assert_eq!(controller.status(), before);
}

#[test]
fn second_start_does_not_reinitialize_the_agent() {
    let agent = Arc::new(FakeAgent::default());
    let mut controller = controller(&agent);

    controller.start("0.05".parse().unwrap()).unwrap();
    let outcome = controller.start("0.80".parse().unwrap()).unwrap();

    assert_eq!(outcome, StartOutcome::AlreadyRunning);
    assert_eq!(agent.starts(), 1);
    assert_eq!(controller.lot().to_string(), "0.05");
}

#[test]
fn failed_start_stays_stopped_and_reports() {
    let agent = Arc::new(FakeAgent::default());
    agent.fail_start.store(true, Ordering::SeqCst);
    let mut controller = controller(&agent);

    assert!(controller.start(Lot::default()).is_err());
    assert!(!controller.is_running());

    let status = controller.status().to_string();
    assert!(status.starts_with("Agent: STOPPED"));
    assert!(status.contains("terminal refused login"));
}

#[test]
fn mode_is_carried_to_the_agent() {
    let agent = Arc::new(FakeAgent::default());
    let mut controller =
        AgentController::new(agent.clone(), AgentConfig::new(Lot::default(), TradeMode::Short));
    controller.start(Lot::default()).unwrap();
    assert_eq!(agent.last_config().unwrap().mode, TradeMode::Short);
}

#[test]
fn simulated_agent_halts_after_stop() {
    let agent = Arc::new(SimulatedAgent::new(Duration::from_millis(20)));
    let mut controller = AgentController::new(agent.clone(), AgentConfig::default());

    controller.start("0.10".parse().unwrap()).unwrap();
    assert!(agent.is_running());

    controller.stop().unwrap();
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while !controller.agent_halted() && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(controller.agent_halted());
}

/// Start right after Stop must not trip over the session that is still winding down
#[test]
fn simulated_agent_restarts_right_after_stop() {
    let agent = Arc::new(SimulatedAgent::new(Duration::from_secs(2)));
    let mut controller = AgentController::new(agent.clone(), AgentConfig::default());

    controller.start("0.05".parse().unwrap()).unwrap();
    controller.stop().unwrap();
    let outcome = controller.start("0.10".parse().unwrap());

    assert_eq!(outcome.unwrap(), StartOutcome::Started);
    assert!(agent.is_running());
    assert_eq!(
        controller.status().to_string(),
        "Agent: RUNNING, lot=0.10 | mode=duel"
    );
    controller.stop().unwrap();
}

