use async_trait::async_trait;

use crate::domain::AccountMetrics;
use crate::error::Result;

/// Brokerage terminal as seen by the account poller
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokerageClient: Send + Sync {
    /// Make sure the terminal connection is set up. Idempotent.
    async fn ensure_initialized(&self) -> Result<()>;

    /// Current account metrics, `None` when the terminal has no account info
    async fn fetch_account_info(&self) -> Result<Option<AccountMetrics>>;
}
