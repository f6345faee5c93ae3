use crate::config::OptimizerConfig;
use crate::core::country::Corridor;
use crate::core::quote::OptimizationResult;
use crate::core::request::{InvalidInputError, OptimizationRequest};
use crate::core::route::Route;
use crate::generation::{GenerationError, StructuredGenerator};
use crate::optimization::fees::{FeeEstimate, FeeEstimator};
use crate::optimization::response::{
    adopt_figures, parse_route_options, verify_figures, ShapeError,
};
use crate::optimization::savings::{RouteSavings, SavingsError};
use crate::prompt::route::{PromptFormatter, RoutePromptInput};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Generic text shown to end users when the model side fails.
pub const UPSTREAM_USER_MESSAGE: &str = "Could not fetch payment routes. Please try again.";

/// The model call failed, timed out, or returned something unusable.
#[derive(Debug, Error)]
pub enum UpstreamGenerationError {
    #[error("generator '{generator}' failed: {source}")]
    Generation {
        generator: &'static str,
        #[source]
        source: GenerationError,
    },

    #[error("generator '{generator}' did not answer within {timeout:?}")]
    TimedOut {
        generator: &'static str,
        timeout: Duration,
    },

    #[error("generator '{generator}' returned an unusable answer: {source}")]
    Malformed {
        generator: &'static str,
        #[source]
        source: ShapeError,
    },
}

/// Every way [`RouteOptimizer::optimize_route`] can fail.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    UpstreamGeneration(#[from] UpstreamGenerationError),

    #[error("request {request_id} was cancelled")]
    RequestCancelled { request_id: Uuid },

    #[error("cannot compute savings: {0}")]
    DegenerateCost(#[from] SavingsError),
}

impl OptimizeError {
    /// Message safe to show an end user. Never includes upstream detail.
    pub fn user_message(&self) -> String {
        match self {
            OptimizeError::InvalidInput(e) => e.to_string(),
            OptimizeError::RequestCancelled { .. } => "The request was cancelled.".to_string(),
            OptimizeError::UpstreamGeneration(_) | OptimizeError::DegenerateCost(_) => {
                UPSTREAM_USER_MESSAGE.to_string()
            }
        }
    }
}

/// Lifecycle of one optimization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Estimated,
    Formatted,
    Submitted,
    Completed,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Estimated => "estimated",
            Stage::Formatted => "formatted",
            Stage::Submitted => "submitted",
            Stage::Completed => "completed",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

fn enter(request_id: Option<Uuid>, stage: Stage) {
    match request_id {
        Some(id) => log::debug!("route optimization {}: {}", id, stage),
        None => log::debug!("route optimization: {}", stage),
    }
}

/// Locally computed figures for a request, before any model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub estimate: FeeEstimate,
    pub savings: RouteSavings,
}

impl RouteEstimate {
    pub fn for_amount(amount_usd: Decimal) -> Result<Self, SavingsError> {
        let estimate = FeeEstimator::estimate(amount_usd);
        let savings = RouteSavings::from_estimate(&estimate)?;
        Ok(Self { estimate, savings })
    }

    pub fn savings(&self, route: Route) -> Option<Decimal> {
        match route {
            Route::Swift => None,
            Route::Stablecoin => Some(self.savings.stablecoin),
            Route::LocalRail => Some(self.savings.local_rail),
        }
    }

    /// Render as a table for the given corridor.
    pub fn report(&self, corridor: &Corridor, amount_usd: Decimal) -> String {
        let mut out = String::new();
        out.push_str("=== Route Estimate ===\n");
        out.push_str(&format!("Corridor:   {}\n", corridor));
        out.push_str(&format!("Amount:     {:.2} USD\n\n", amount_usd));
        for route in Route::ALL {
            let savings = self
                .savings(route)
                .map(|s| format!("{:.2}% vs SWIFT", s))
                .unwrap_or_else(|| "baseline".to_string());
            out.push_str(&format!(
                "  {:<11} {:>12.2} USD  {:<18} {}\n",
                route.display_name(),
                self.estimate.cost(route),
                route.eta_label(),
                savings
            ));
        }
        out
    }
}

/// Public entry point for route optimization.
///
/// Holds only immutable configuration and a shared generator handle, so one
/// optimizer can serve any number of concurrent requests. Every call
/// recomputes from scratch; nothing is cached.
///
/// # Examples
///
/// ```
/// use route_optimizer::prelude::*;
/// use rust_decimal_macros::dec;
/// use std::sync::Arc;
///
/// # tokio_test_block(async {
/// let optimizer = RouteOptimizer::with_defaults(Arc::new(OfflineGenerator::new()));
/// let result = optimizer.optimize_route("USA", "Germany", dec!(50_000)).await.unwrap();
/// assert_eq!(result.stablecoin.cost_usd, dec!(51.00));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
pub struct RouteOptimizer {
    generator: Arc<dyn StructuredGenerator>,
    config: OptimizerConfig,
}

impl RouteOptimizer {
    pub fn new(generator: Arc<dyn StructuredGenerator>, config: OptimizerConfig) -> Self {
        Self { generator, config }
    }

    pub fn with_defaults(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self::new(generator, OptimizerConfig::default())
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Validate raw input under this optimizer's corridor policy.
    pub fn validate(
        &self,
        origin: &str,
        destination: &str,
        amount_usd: Decimal,
    ) -> Result<OptimizationRequest, InvalidInputError> {
        OptimizationRequest::new(origin, destination, amount_usd, &self.config.corridor_policy)
    }

    /// Price all three routes for the given corridor and amount.
    pub async fn optimize_route(
        &self,
        origin: &str,
        destination: &str,
        amount_usd: Decimal,
    ) -> Result<OptimizationResult, OptimizeError> {
        self.optimize_route_with_cancel(origin, destination, amount_usd, &CancellationToken::new())
            .await
    }

    /// Like [`optimize_route`](Self::optimize_route), abandoning the model
    /// call as soon as `cancel` fires.
    pub async fn optimize_route_with_cancel(
        &self,
        origin: &str,
        destination: &str,
        amount_usd: Decimal,
        cancel: &CancellationToken,
    ) -> Result<OptimizationResult, OptimizeError> {
        enter(None, Stage::Received);
        let request = self.validate(origin, destination, amount_usd).map_err(|e| {
            log::debug!("route optimization rejected: {}", e);
            OptimizeError::InvalidInput(e)
        })?;
        self.optimize(&request, cancel).await
    }

    /// Optimize an already-constructed request.
    pub async fn optimize(
        &self,
        request: &OptimizationRequest,
        cancel: &CancellationToken,
    ) -> Result<OptimizationResult, OptimizeError> {
        let id = request.id();
        request.check_policy(&self.config.corridor_policy)?;
        enter(Some(id), Stage::Validated);

        let figures = RouteEstimate::for_amount(request.amount_usd())?;
        enter(Some(id), Stage::Estimated);

        let input = RoutePromptInput::new(request, figures.estimate, figures.savings);
        let generation = PromptFormatter::route_request(&input);
        enter(Some(id), Stage::Formatted);

        let generator = self.generator.name();
        let timeout = self.config.generation_timeout;
        enter(Some(id), Stage::Submitted);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("route optimization {} cancelled", id);
                enter(Some(id), Stage::Failed);
                return Err(OptimizeError::RequestCancelled { request_id: id });
            }
            outcome = tokio::time::timeout(timeout, self.generator.generate(&generation)) => outcome,
        };

        let result = match outcome {
            Err(_) => Err(UpstreamGenerationError::TimedOut { generator, timeout }),
            Ok(Err(source)) => Err(UpstreamGenerationError::Generation { generator, source }),
            Ok(Ok(value)) => self
                .accept(value, request, &figures)
                .map_err(|source| UpstreamGenerationError::Malformed { generator, source }),
        };

        match result {
            Ok(result) => {
                enter(Some(id), Stage::Completed);
                log::info!(
                    "optimized {} for {} USD: cheapest route {}",
                    request.corridor(),
                    request.amount_usd(),
                    result.cheapest().route
                );
                Ok(result)
            }
            Err(e) => {
                enter(Some(id), Stage::Failed);
                log::warn!("route optimization {} failed: {}", id, e);
                Err(e.into())
            }
        }
    }

    fn accept(
        &self,
        value: serde_json::Value,
        request: &OptimizationRequest,
        figures: &RouteEstimate,
    ) -> Result<OptimizationResult, ShapeError> {
        let result = parse_route_options(value, request)?;
        if !self.config.verify_figures {
            return Ok(result);
        }
        verify_figures(&result, &figures.estimate, &figures.savings)?;
        Ok(adopt_figures(result, &figures.estimate, &figures.savings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::{CorridorPolicy, CountryCode};
    use crate::generation::{CannedGenerator, OfflineGenerator};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_offline_round_trip() {
        let optimizer = RouteOptimizer::with_defaults(Arc::new(OfflineGenerator::new()));
        let result = optimizer
            .optimize_route("USA", "Germany", dec!(10000))
            .await
            .unwrap();
        assert_eq!(result.swift.cost_usd, dec!(130));
        assert_eq!(result.stablecoin.savings_percent_vs_swift, Some(dec!(91.54)));
        assert_eq!(result.local_rail.savings_percent_vs_swift, Some(dec!(53.85)));
    }

    #[tokio::test]
    async fn test_invalid_amount_never_reaches_generator() {
        let generator = Arc::new(CannedGenerator::new());
        let optimizer = RouteOptimizer::with_defaults(generator.clone());
        let err = optimizer
            .optimize_route("USA", "Germany", Decimal::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OptimizeError::InvalidInput(InvalidInputError::NonPositiveAmount { .. })
        ));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stricter_policy_applies_to_prebuilt_request() {
        let request =
            OptimizationRequest::new("Brazil", "USA", dec!(100), &CorridorPolicy::Open).unwrap();
        let optimizer = RouteOptimizer::new(
            Arc::new(OfflineGenerator::new()),
            OptimizerConfig::default().with_corridor_policy(CorridorPolicy::dashboard()),
        );
        let err = optimizer
            .optimize(&request, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidInput(_)));
    }

    #[test]
    fn test_user_message_hides_upstream_detail() {
        let err = OptimizeError::from(UpstreamGenerationError::Generation {
            generator: "openai-compat",
            source: GenerationError::RequestFailed {
                message: "HTTP 401: invalid api key sk-123".to_string(),
            },
        });
        assert_eq!(err.user_message(), UPSTREAM_USER_MESSAGE);
        assert!(!err.user_message().contains("sk-123"));
    }

    #[test]
    fn test_route_estimate_report() {
        let figures = RouteEstimate::for_amount(dec!(10000)).unwrap();
        let corridor = Corridor::new(CountryCode::new("UK"), CountryCode::new("India"));
        let report = figures.report(&corridor, dec!(10000));
        assert!(report.contains("UK → India"));
        assert!(report.contains("130.00"));
        assert!(report.contains("91.54% vs SWIFT"));
        assert!(report.contains("baseline"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Submitted.to_string(), "submitted");
    }
}
