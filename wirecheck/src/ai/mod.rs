//! Analysis provider boundary.
//!
//! Deeper circuit review runs outside this library: a host wires up a
//! provider (a generative-model HTTP client, a local model, a fixture) that
//! consumes the structured JSON projection of the circuit and returns
//! findings in the same [`Feedback`](crate::rules::Feedback) shape the rule
//! engine produces, so the host can splice both lists together.

pub mod provider;
pub mod router;

pub use provider::{AnalysisContext, AnalysisError, AnalysisProvider};
pub use router::AnalysisRouter;
