use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Account metrics reported by the brokerage terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountMetrics {
    pub equity: Decimal,
    pub balance: Decimal,
    pub margin: Decimal,
}

/// Result of one account poll, replaced wholesale on every tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSnapshot {
    /// Terminal answered with metrics
    Metrics(AccountMetrics),
    /// Terminal reported no account info
    NotConnected,
    /// Terminal call failed; carries the failure text
    Error(String),
}

impl AccountSnapshot {
    /// Build the error variant from any failure
    pub fn error(err: impl std::fmt::Display) -> Self {
        AccountSnapshot::Error(err.to_string())
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, AccountSnapshot::Metrics(_))
    }

    /// Single status line for the account panel
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<Option<AccountMetrics>> for AccountSnapshot {
    fn from(info: Option<AccountMetrics>) -> Self {
        match info {
            Some(metrics) => AccountSnapshot::Metrics(metrics),
            None => AccountSnapshot::NotConnected,
        }
    }
}

impl std::fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountSnapshot::Metrics(m) => write!(
                f,
                "Equity: {} | Balance: {} | Margin: {}",
                two_dp(m.equity),
                two_dp(m.balance),
                two_dp(m.margin)
            ),
            AccountSnapshot::NotConnected => write!(
                f,
                "Equity: N/A | Balance: N/A | Margin: N/A (brokerage not connected)"
            ),
            AccountSnapshot::Error(msg) => write!(f, "Equity: error ({msg})"),
        }
    }
}

fn two_dp(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
