//! Common interface for circuit analysis providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::Feedback;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    RequestFailed(String),
    #[error("failed to parse analysis response: {0}")]
    ParseError(String),
    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("no analysis provider is configured or available")]
    NoProvider,
}

/// What a provider gets to see: the serialized circuit plus the findings
/// the rule engine already produced, so the provider can go deeper instead
/// of repeating them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Structured JSON form of the circuit (see [`crate::serializer::to_json`]).
    pub circuit_json: String,
    pub component_count: usize,
    pub connection_count: usize,
    /// Findings already detected by rule-based validation.
    pub detected: Vec<Feedback>,
}

/// Common trait for all analysis providers.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Provider name, used for routing and logging.
    fn name(&self) -> &str;

    /// Whether the provider is configured and reachable right now.
    async fn is_available(&self) -> bool;

    /// Analyze a circuit, returning findings compatible with the rule
    /// engine's output.
    async fn analyze(&self, context: &AnalysisContext) -> Result<Vec<Feedback>, AnalysisError>;
}
