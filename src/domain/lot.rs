//! Position size (lot) with its operator bounds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{LoupError, Result};

/// Position size in lots, always within `[Lot::MIN, Lot::MAX]` with two decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Lot(Decimal);

impl Lot {
    /// Smallest accepted lot
    pub const MIN: Decimal = dec!(0.01);
    /// Largest accepted lot
    pub const MAX: Decimal = dec!(1.00);
    /// Stepper increment
    pub const STEP: Decimal = dec!(0.01);

    /// Validate an operator-supplied value, rejecting anything outside the bounds
    pub fn new(value: Decimal) -> Result<Self> {
        let rounded = value.round_dp(2);
        if rounded < Self::MIN || rounded > Self::MAX {
            return Err(LoupError::InputOutOfRange {
                value: value.to_string(),
                min: format!("{:.2}", Self::MIN),
                max: format!("{:.2}", Self::MAX),
            });
        }
        Ok(Self(rounded))
    }

    /// Build a lot, clamping the value into the bounds
    pub fn clamped(value: Decimal) -> Self {
        Self(value.round_dp(2).clamp(Self::MIN, Self::MAX))
    }

    /// One step up, saturating at `MAX`
    pub fn step_up(self) -> Self {
        Self::clamped(self.0 + Self::STEP)
    }

    /// One step down, saturating at `MIN`
    pub fn step_down(self) -> Self {
        Self::clamped(self.0 - Self::STEP)
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Default for Lot {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl std::fmt::Display for Lot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Lot {
    type Error = LoupError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Lot> for Decimal {
    fn from(lot: Lot) -> Self {
        lot.0
    }
}

impl FromStr for Lot {
    type Err = LoupError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches("lot").trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| LoupError::InvalidInput(format!("not a lot value: {s:?}")))?;
        Self::new(value)
    }
}
