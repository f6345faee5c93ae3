//! # route-optimizer
//!
//! Cross-border payment route cost estimation with model-assisted
//! presentation.
//!
//! Given a corridor and an amount, the engine prices three routes (SWIFT,
//! stablecoin, local rail) with fixed linear fee models, computes savings
//! against SWIFT, and asks a structured-generation backend to describe the
//! options in a declared JSON shape. The answer is parsed into typed quotes
//! or rejected; there are no partial results.
//!
//! ## Architecture
//!
//! - **core**: Countries and corridor policy, routes and fee models, requests, quotes
//! - **optimization**: Fee estimator, savings calculator, answer parsing, orchestrator
//! - **prompt**: Prompt rendering and declared output schemas
//! - **generation**: The structured-generation trait and its adapters
//! - **assistant**: Client and team chat assistants

pub mod assistant;
pub mod config;
pub mod core;
pub mod generation;
pub mod optimization;
pub mod prompt;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::assistant::{AssistantError, ClientAssistant, TeamAssistant, Toolbox};
    pub use crate::config::OptimizerConfig;
    pub use crate::core::country::{CorridorPolicy, CountryCode};
    pub use crate::core::quote::{OptimizationResult, RouteQuote};
    pub use crate::core::request::{InvalidInputError, OptimizationRequest};
    pub use crate::core::route::Route;
    pub use crate::generation::{
        CannedGenerator, GenerationError, GenerationRequest, OfflineGenerator,
        OpenAiCompatGenerator, StructuredGenerator,
    };
    pub use crate::optimization::fees::{FeeEstimate, FeeEstimator};
    pub use crate::optimization::orchestrator::{
        OptimizeError, RouteEstimate, RouteOptimizer, UpstreamGenerationError,
    };
    pub use crate::optimization::savings::{savings_percent, RouteSavings};
}
