use crate::core::route::{FeeModel, Route};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round a USD figure to cents, midpoint away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Estimated cost of each route for one amount, already rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub swift: Decimal,
    pub stablecoin: Decimal,
    pub local_rail: Decimal,
}

impl FeeEstimate {
    pub fn cost(&self, route: Route) -> Decimal {
        match route {
            Route::Swift => self.swift,
            Route::Stablecoin => self.stablecoin,
            Route::LocalRail => self.local_rail,
        }
    }
}

/// Fixed linear fee models for every route.
///
/// The estimator has no error conditions: callers reject non-positive
/// amounts before calling it.
///
/// # Examples
///
/// ```
/// use route_optimizer::optimization::fees::FeeEstimator;
/// use rust_decimal_macros::dec;
///
/// let estimate = FeeEstimator::estimate(dec!(10_000));
/// assert_eq!(estimate.swift, dec!(130.00));
/// assert_eq!(estimate.stablecoin, dec!(11.00));
/// assert_eq!(estimate.local_rail, dec!(60.00));
/// ```
pub struct FeeEstimator;

impl FeeEstimator {
    pub fn estimate(amount_usd: Decimal) -> FeeEstimate {
        FeeEstimate {
            swift: Self::route_cost(&FeeModel::SWIFT, amount_usd),
            stablecoin: Self::route_cost(&FeeModel::STABLECOIN, amount_usd),
            local_rail: Self::route_cost(&FeeModel::LOCAL_RAIL, amount_usd),
        }
    }

    fn route_cost(model: &FeeModel, amount_usd: Decimal) -> Decimal {
        round_cents(model.cost(amount_usd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_estimate_ten_thousand() {
        let e = FeeEstimator::estimate(dec!(10000));
        assert_eq!(e.swift, dec!(130.00));
        assert_eq!(e.stablecoin, dec!(11.00));
        assert_eq!(e.local_rail, dec!(60.00));
    }

    #[test]
    fn test_estimate_fifty_thousand() {
        let e = FeeEstimator::estimate(dec!(50000));
        assert_eq!(e.swift, dec!(530.00));
        assert_eq!(e.stablecoin, dec!(51.00));
        assert_eq!(e.local_rail, dec!(260.00));
    }

    #[test]
    fn test_costs_are_rounded_to_cents() {
        // 1 + 1234.567 * 0.001 = 2.234567
        let e = FeeEstimator::estimate(dec!(1234.567));
        assert_eq!(e.stablecoin, dec!(2.23));
        // 30 + 12.34567 = 42.34567
        assert_eq!(e.swift, dec!(42.35));
        // 10 + 6.172835 = 16.172835
        assert_eq!(e.local_rail, dec!(16.17));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_strict_ordering_for_representative_amounts() {
        for amount in [dec!(1), dec!(100), dec!(10_000), dec!(1_000_000)] {
            let e = FeeEstimator::estimate(amount);
            assert!(e.stablecoin < e.local_rail, "amount {}", amount);
            assert!(e.local_rail < e.swift, "amount {}", amount);
        }
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let a = FeeEstimator::estimate(dec!(777.77));
        let b = FeeEstimator::estimate(dec!(777.77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cost_lookup_by_route() {
        let e = FeeEstimator::estimate(dec!(100));
        assert_eq!(e.cost(Route::Swift), dec!(31.00));
        assert_eq!(e.cost(Route::Stablecoin), dec!(1.10));
        assert_eq!(e.cost(Route::LocalRail), dec!(10.50));
    }
}
