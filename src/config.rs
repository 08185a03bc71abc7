//! Evaluator configuration.

/// Limits applied while reducing a term.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Deepest term nesting the evaluator will descend into before failing
    /// with `DepthLimitExceeded`.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig { max_depth: 256 }
    }
}
