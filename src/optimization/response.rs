use crate::core::quote::{OptimizationResult, RouteQuote};
use crate::core::request::OptimizationRequest;
use crate::core::route::Route;
use crate::optimization::fees::{round_cents, FeeEstimate};
use crate::optimization::savings::RouteSavings;
use crate::prompt::route::{RouteOptionPayload, RouteOptionsPayload};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Largest difference between a model figure and the computed one that is
/// still treated as the same figure.
pub const FIGURE_TOLERANCE: Decimal = dec!(0.01);

/// Relative slack for figures a model wrote as binary floats. Large amounts
/// carry more digits than an `f64` keeps.
const FLOAT_RELATIVE_TOLERANCE: Decimal = dec!(0.000000000000001);

fn tolerance_for(expected: Decimal) -> Decimal {
    FIGURE_TOLERANCE.max(expected.abs() * FLOAT_RELATIVE_TOLERANCE)
}

/// Why a model answer was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("answer does not match the route options shape: {message}")]
    Decode { message: String },

    #[error("{route}: '{field}' must not be empty")]
    EmptyField { route: Route, field: &'static str },

    #[error("{route}: cost must be non-negative, got {cost}")]
    NegativeCost { route: Route, cost: Decimal },

    #[error("{route}: savings percentage is missing")]
    MissingSavings { route: Route },

    #[error("{route}: savings percentage must be within 0-100, got {savings}")]
    SavingsOutOfRange { route: Route, savings: Decimal },

    #[error("{route}: {field} is {actual}, expected {expected}")]
    FigureMismatch {
        route: Route,
        field: &'static str,
        expected: String,
        actual: String,
    },
}

/// Parse a model answer into a typed result.
///
/// Checks the shape and the per-route invariants: non-empty text fields,
/// non-negative cost, savings present (and within 0–100) for every route
/// except SWIFT. A savings figure the model attaches to SWIFT is dropped.
pub fn parse_route_options(
    value: serde_json::Value,
    request: &OptimizationRequest,
) -> Result<OptimizationResult, ShapeError> {
    let payload: RouteOptionsPayload =
        serde_json::from_value(value).map_err(|e| ShapeError::Decode {
            message: e.to_string(),
        })?;

    Ok(OptimizationResult {
        request_id: request.id(),
        corridor: request.corridor().clone(),
        amount_usd: request.amount_usd(),
        swift: to_quote(Route::Swift, payload.option(Route::Swift))?,
        stablecoin: to_quote(Route::Stablecoin, payload.option(Route::Stablecoin))?,
        local_rail: to_quote(Route::LocalRail, payload.option(Route::LocalRail))?,
    })
}

fn to_quote(route: Route, option: &RouteOptionPayload) -> Result<RouteQuote, ShapeError> {
    for (field, text) in [
        ("name", &option.name),
        ("time", &option.time),
        ("description", &option.description),
    ] {
        if text.trim().is_empty() {
            return Err(ShapeError::EmptyField { route, field });
        }
    }
    if option.cost < Decimal::ZERO {
        return Err(ShapeError::NegativeCost {
            route,
            cost: option.cost,
        });
    }

    let savings = if route.reports_savings() {
        let pct = option
            .savings_percentage
            .ok_or(ShapeError::MissingSavings { route })?;
        if pct < Decimal::ZERO || pct > dec!(100) {
            return Err(ShapeError::SavingsOutOfRange {
                route,
                savings: pct,
            });
        }
        Some(round_cents(pct))
    } else {
        if option.savings_percentage.is_some() {
            log::debug!("dropping savings figure the model attached to {}", route);
        }
        None
    };

    Ok(RouteQuote {
        route,
        name: option.name.trim().to_string(),
        cost_usd: round_cents(option.cost),
        eta_label: option.time.trim().to_string(),
        description: option.description.trim().to_string(),
        savings_percent_vs_swift: savings,
    })
}

/// Reject an answer whose figures disagree with the computed ones.
pub fn verify_figures(
    result: &OptimizationResult,
    estimate: &FeeEstimate,
    savings: &RouteSavings,
) -> Result<(), ShapeError> {
    for route in Route::ALL {
        let quote = result.quote(route);

        let expected_cost = estimate.cost(route);
        if (quote.cost_usd - expected_cost).abs() > tolerance_for(expected_cost) {
            return Err(ShapeError::FigureMismatch {
                route,
                field: "cost",
                expected: expected_cost.to_string(),
                actual: quote.cost_usd.to_string(),
            });
        }

        if quote.eta_label != route.eta_label() {
            return Err(ShapeError::FigureMismatch {
                route,
                field: "time",
                expected: route.eta_label().to_string(),
                actual: quote.eta_label.clone(),
            });
        }

        let expected_savings = match route {
            Route::Swift => None,
            Route::Stablecoin => Some(savings.stablecoin),
            Route::LocalRail => Some(savings.local_rail),
        };
        if let (Some(expected), Some(actual)) = (expected_savings, quote.savings_percent_vs_swift) {
            if (actual - expected).abs() > tolerance_for(expected) {
                return Err(ShapeError::FigureMismatch {
                    route,
                    field: "savingsPercentage",
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Replace the model's figures with the computed ones.
///
/// Only meaningful after [`verify_figures`] accepted the answer; the model's
/// text fields are kept.
pub fn adopt_figures(
    mut result: OptimizationResult,
    estimate: &FeeEstimate,
    savings: &RouteSavings,
) -> OptimizationResult {
    result.swift.cost_usd = estimate.swift;
    result.stablecoin.cost_usd = estimate.stablecoin;
    result.stablecoin.savings_percent_vs_swift = Some(savings.stablecoin);
    result.local_rail.cost_usd = estimate.local_rail;
    result.local_rail.savings_percent_vs_swift = Some(savings.local_rail);
    result
}
