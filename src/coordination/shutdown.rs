//! Console shutdown
//!
//! Closing the console hands the process output back first, then asks a
//! running agent to stop. Neither step can prevent the close.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::agent::{AgentController, StopOutcome};
use crate::bridge::OutputRedirect;

/// Poll interval while waiting for the agent to halt
const ACK_POLL: Duration = Duration::from_millis(50);

/// What happened during shutdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// This close released the output redirect
    pub redirect_released: bool,
    /// A stop was requested from the agent
    pub stop_requested: bool,
    /// Failure returned by the stop request
    pub stop_error: Option<String>,
    /// Result of the bounded halt wait; `None` when no wait was done
    pub acknowledged: Option<bool>,
}

impl std::fmt::Display for ShutdownReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "redirect_released={} stop_requested={}",
            self.redirect_released, self.stop_requested
        )?;
        if let Some(err) = &self.stop_error {
            write!(f, " stop_error={err}")?;
        }
        if let Some(ack) = self.acknowledged {
            write!(f, " acknowledged={ack}")?;
        }
        Ok(())
    }
}

/// Runs the close sequence for the console
#[derive(Debug, Clone, Copy, Default)]
pub struct ShutdownCoordinator {
    stop_ack_timeout: Option<Duration>,
}

impl ShutdownCoordinator {
    /// `stop_ack_timeout`: how long to wait for the agent to halt, `None`
    /// to request the stop and return immediately
    pub fn new(stop_ack_timeout: Option<Duration>) -> Self {
        Self { stop_ack_timeout }
    }

    /// Close the console.
    ///
    /// 1. release the output redirect (always, and first)
    /// 2. stop the agent once if it is running
    /// 3. optionally wait, bounded, for the agent to halt
    pub async fn close(
        &self,
        redirect: &mut OutputRedirect,
        controller: &mut AgentController,
    ) -> ShutdownReport {
        let redirect_released = redirect.release();

        let mut report = ShutdownReport {
            redirect_released,
            stop_requested: false,
            stop_error: None,
            acknowledged: None,
        };

        if !controller.is_running() {
            info!("console closed, agent was not running");
            return report;
        }

        report.stop_requested = true;
        match controller.stop() {
            Ok(StopOutcome::Stopped) | Ok(StopOutcome::AlreadyStopped) => {
                info!("agent stop requested on close");
            }
            Err(e) => {
                warn!(error = %e, "agent stop failed during shutdown");
                report.stop_error = Some(e.to_string());
                return report;
            }
        }

        if let Some(timeout) = self.stop_ack_timeout {
            let halted = wait_for_halt(controller, timeout).await;
            if halted {
                info!("agent halted");
            } else {
                warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "agent did not halt in time, closing anyway"
                );
            }
            report.acknowledged = Some(halted);
        }

        report
    }
}

async fn wait_for_halt(controller: &AgentController, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if controller.agent_halted() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(ACK_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::MockTradingAgent;
    use crate::bridge::{log_bridge, LogRouter};
    use crate::domain::{AgentConfig, Lot};
    use crate::error::LoupError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn running_controller(agent: MockTradingAgent) -> AgentController {
        let mut controller = AgentController::new(Arc::new(agent), AgentConfig::default());
        controller.start(Lot::default()).unwrap();
        controller
    }

    #[tokio::test]
    async fn test_close_while_running_stops_once() {
        let mut agent = MockTradingAgent::new();
        agent.expect_start().returning(|_| Ok(()));
        agent.expect_stop().times(1).returning(|| Ok(()));
        let mut controller = running_controller(agent);

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);

        let report = ShutdownCoordinator::default()
            .close(&mut redirect, &mut controller)
            .await;

        assert!(report.redirect_released);
        assert!(report.stop_requested);
        assert_eq!(report.stop_error, None);
        assert_eq!(report.acknowledged, None);
        assert!(!router.is_redirected());
        assert!(!controller.is_running());
    }

    #[tokio::test]
    async fn test_stop_is_logged_after_the_call() {
        let mut agent = MockTradingAgent::new();
        agent.expect_start().returning(|_| Ok(()));
        agent.expect_stop().times(1).returning(|| {
            tracing::info!("agent received stop");
            Ok(())
        });
        let mut controller = running_controller(agent);

        // Capture on a router the close does not release
        let capture = LogRouter::new();
        let (capture_bridge, mut captured) = log_bridge();
        let _capture_redirect = capture.redirect(capture_bridge);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);
        ShutdownCoordinator::default()
            .close(&mut redirect, &mut controller)
            .await;

        let lines: Vec<String> = captured
            .drain(usize::MAX)
            .iter()
            .map(|e| e.text().to_string())
            .collect();
        let called = lines.iter().position(|l| l.contains("agent received stop"));
        let logged = lines
            .iter()
            .position(|l| l.contains("agent stop requested on close"));
        assert!(called.is_some() && logged.is_some());
        assert!(called < logged);
    }

    #[tokio::test]
    async fn test_close_while_stopped_skips_stop() {
        let mut agent = MockTradingAgent::new();
        agent.expect_stop().never();
        let mut controller = AgentController::new(Arc::new(agent), AgentConfig::default());

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);

        let report = ShutdownCoordinator::default()
            .close(&mut redirect, &mut controller)
            .await;
        assert!(report.redirect_released);
        assert!(!report.stop_requested);
    }

    #[tokio::test]
    async fn test_stop_failure_still_releases_redirect() {
        let mut agent = MockTradingAgent::new();
        agent.expect_start().returning(|_| Ok(()));
        agent
            .expect_stop()
            .times(1)
            .returning(|| Err(LoupError::Agent("stuck".into())));
        let mut controller = running_controller(agent);

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);

        let report = ShutdownCoordinator::default()
            .close(&mut redirect, &mut controller)
            .await;
        assert!(report.redirect_released);
        assert!(report.stop_requested);
        assert!(report.stop_error.unwrap().contains("stuck"));
        assert!(!router.is_redirected());
    }

    #[tokio::test]
    async fn test_bounded_wait_reports_ack() {
        let halted = Arc::new(AtomicBool::new(false));
        let mut agent = MockTradingAgent::new();
        agent.expect_start().returning(|_| Ok(()));
        let on_stop = Arc::clone(&halted);
        agent.expect_stop().times(1).returning(move || {
            on_stop.store(true, Ordering::SeqCst);
            Ok(())
        });
        let probe = Arc::clone(&halted);
        agent
            .expect_is_running()
            .returning(move || !probe.load(Ordering::SeqCst));
        let mut controller = running_controller(agent);

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);

        let report = ShutdownCoordinator::new(Some(Duration::from_millis(500)))
            .close(&mut redirect, &mut controller)
            .await;
        assert_eq!(report.acknowledged, Some(true));
    }

    #[tokio::test]
    async fn test_bounded_wait_gives_up() {
        let mut agent = MockTradingAgent::new();
        agent.expect_start().returning(|_| Ok(()));
        agent.expect_stop().times(1).returning(|| Ok(()));
        agent.expect_is_running().returning(|| true);
        let mut controller = running_controller(agent);

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);

        let report = ShutdownCoordinator::new(Some(Duration::from_millis(120)))
            .close(&mut redirect, &mut controller)
            .await;
        assert_eq!(report.acknowledged, Some(false));
        assert!(report.to_string().contains("acknowledged=false"));
    }

    #[tokio::test]
    async fn test_already_released_redirect() {
        let mut agent = MockTradingAgent::new();
        agent.expect_stop().never();
        let mut controller = AgentController::new(Arc::new(agent), AgentConfig::default());

        let router = LogRouter::new();
        let (bridge, _stream) = log_bridge();
        let mut redirect = router.redirect(bridge);
        redirect.release();

        let report = ShutdownCoordinator::default()
            .close(&mut redirect, &mut controller)
            .await;
        assert!(!report.redirect_released);
    }
}
