use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A payment-transfer method offered to clients.
///
/// Each route has a fixed linear cost model and a fixed settlement-time
/// label. SWIFT is the baseline every other route is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Route {
    Swift,
    Stablecoin,
    LocalRail,
}

impl Route {
    /// All routes, baseline first.
    pub const ALL: [Route; 3] = [Route::Swift, Route::Stablecoin, Route::LocalRail];

    /// Human-readable route name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Route::Swift => "SWIFT",
            Route::Stablecoin => "Stablecoin",
            Route::LocalRail => "Local Rail",
        }
    }

    /// Key of this route in the structured model output.
    pub fn key(&self) -> &'static str {
        match self {
            Route::Swift => "swift",
            Route::Stablecoin => "stablecoin",
            Route::LocalRail => "localRail",
        }
    }

    /// Fixed settlement-time label. Not computed.
    pub fn eta_label(&self) -> &'static str {
        match self {
            Route::Swift => "2-5 business days",
            Route::Stablecoin => "3-10 seconds",
            Route::LocalRail => "1-2 hours",
        }
    }

    pub fn fee_model(&self) -> FeeModel {
        match self {
            Route::Swift => FeeModel::SWIFT,
            Route::Stablecoin => FeeModel::STABLECOIN,
            Route::LocalRail => FeeModel::LOCAL_RAIL,
        }
    }

    /// Whether savings against SWIFT are reported for this route.
    pub fn reports_savings(&self) -> bool {
        !matches!(self, Route::Swift)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Linear cost model: `fixed + amount * rate`, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeModel {
    pub fixed: Decimal,
    pub rate: Decimal,
}

impl FeeModel {
    /// $30 fixed + 1% of amount.
    pub const SWIFT: FeeModel = FeeModel {
        fixed: dec!(30),
        rate: dec!(0.01),
    };
    /// $1 fixed + 0.1% of amount.
    pub const STABLECOIN: FeeModel = FeeModel {
        fixed: dec!(1),
        rate: dec!(0.001),
    };
    /// $10 fixed + 0.5% of amount.
    pub const LOCAL_RAIL: FeeModel = FeeModel {
        fixed: dec!(10),
        rate: dec!(0.005),
    };

    /// Unrounded cost for `amount`.
    pub fn cost(&self, amount: Decimal) -> Decimal {
        self.fixed + amount * self.rate
    }
}
