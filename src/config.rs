use crate::core::country::CorridorPolicy;
use std::time::Duration;

/// Upper bound on one structured-generation call unless configured otherwise.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`RouteOptimizer`](crate::optimization::orchestrator::RouteOptimizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Which countries requests may name.
    pub corridor_policy: CorridorPolicy,
    /// How long to wait for the model before failing the request.
    pub generation_timeout: Duration,
    /// Reject answers whose costs, times or savings disagree with the
    /// computed figures.
    pub verify_figures: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            corridor_policy: CorridorPolicy::Open,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            verify_figures: true,
        }
    }
}

impl OptimizerConfig {
    pub fn with_corridor_policy(mut self, policy: CorridorPolicy) -> Self {
        self.corridor_policy = policy;
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn with_verify_figures(mut self, verify: bool) -> Self {
        self.verify_figures = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.corridor_policy, CorridorPolicy::Open);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert!(config.verify_figures);
    }

    #[test]
    fn test_builders() {
        let config = OptimizerConfig::default()
            .with_corridor_policy(CorridorPolicy::dashboard())
            .with_generation_timeout(Duration::from_millis(250))
            .with_verify_figures(false);
        assert!(matches!(config.corridor_policy, CorridorPolicy::Supported(ref c) if c.len() == 5));
        assert_eq!(config.generation_timeout, Duration::from_millis(250));
        assert!(!config.verify_figures);
    }
}
