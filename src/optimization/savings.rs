use crate::optimization::fees::{round_cents, FeeEstimate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Savings cannot be expressed against a zero or negative baseline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SavingsError {
    #[error("baseline cost must be positive, got {baseline}")]
    DegenerateBaseline { baseline: Decimal },
}

/// Percentage saved by `candidate` relative to `baseline`.
///
/// `max(0, (baseline - candidate) / baseline * 100)`, rounded to two
/// decimals and capped at 100.
///
/// # Examples
///
/// ```
/// use route_optimizer::optimization::savings::savings_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(savings_percent(dec!(130), dec!(11)).unwrap(), dec!(91.54));
/// assert_eq!(savings_percent(dec!(10), dec!(20)).unwrap(), dec!(0));
/// assert!(savings_percent(dec!(0), dec!(5)).is_err());
/// ```
pub fn savings_percent(baseline: Decimal, candidate: Decimal) -> Result<Decimal, SavingsError> {
    if baseline <= Decimal::ZERO {
        return Err(SavingsError::DegenerateBaseline { baseline });
    }
    let pct = (baseline - candidate) / baseline * dec!(100);
    Ok(round_cents(pct.clamp(Decimal::ZERO, dec!(100))))
}

/// Savings of each alternative route against SWIFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSavings {
    pub stablecoin: Decimal,
    pub local_rail: Decimal,
}

impl RouteSavings {
    pub fn from_estimate(estimate: &FeeEstimate) -> Result<Self, SavingsError> {
        Ok(Self {
            stablecoin: savings_percent(estimate.swift, estimate.stablecoin)?,
            local_rail: savings_percent(estimate.swift, estimate.local_rail)?,
        })
    }
}
