//! Core evaluation pipeline shared by hosts and the CLI.
//!
//! A host recomputes everything whenever the graph changes: serialized
//! projections first, then the feedback list, and replaces its previous
//! outputs wholesale. [`WirecheckCore`] packages that recomputation; no
//! state survives between calls.

use std::path::Path;

use serde::Serialize;

use crate::ai::{AnalysisContext, AnalysisError, AnalysisRouter};
use crate::graph::Circuit;
use crate::rules::{Feedback, RuleEngine, Severity};
use crate::serializer::{self, CircuitDescription};

#[derive(Debug, thiserror::Error)]
pub enum WirecheckError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("{0}")]
    Other(String),
}

/// Options for evaluation runs.
#[derive(Clone, Debug)]
pub struct ValidationOptions {
    /// Consult a registered analysis provider after rule validation.
    pub enable_ai: bool,
    /// Never leave the process, even when a provider is registered.
    pub offline: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            enable_ai: true,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

/// Rule validation output: the ordered feedback list and its severity
/// counts.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub feedback: Vec<Feedback>,
    pub stats: ValidationStats,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn total(&self) -> usize {
        self.feedback.len()
    }
}

/// One full recomputation over a snapshot: both serialized forms plus the
/// feedback list. Outputs replace, never merge with, earlier ones.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub description: CircuitDescription,
    pub json: String,
    pub compact: String,
    pub feedback: Vec<Feedback>,
    pub stats: ValidationStats,
}

fn feedback_stats(feedback: &[Feedback]) -> ValidationStats {
    let mut stats = ValidationStats::default();
    for item in feedback {
        match item.severity {
            Severity::Error => stats.errors += 1,
            Severity::Warning => stats.warnings += 1,
            Severity::Info => stats.infos += 1,
        }
    }
    stats
}

/// Core evaluation API used by hosts and the CLI.
pub struct WirecheckCore;

impl WirecheckCore {
    /// Validate a snapshot with the default rule table.
    pub fn validate(circuit: &Circuit) -> ValidationResult {
        Self::validate_with(&RuleEngine::with_default_rules(), circuit)
    }

    /// Validate a snapshot with a caller-built engine.
    pub fn validate_with(engine: &RuleEngine, circuit: &Circuit) -> ValidationResult {
        let feedback = engine.validate(circuit);
        tracing::debug!(
            connections = circuit.connection_count(),
            findings = feedback.len(),
            "validated circuit"
        );
        let stats = feedback_stats(&feedback);
        ValidationResult { feedback, stats }
    }

    /// Recompute every output for a snapshot: projections, then feedback.
    pub fn evaluate(circuit: &Circuit) -> Evaluation {
        let description = serializer::describe(circuit);
        let json = serializer::to_json(&description);
        let compact = serializer::to_compact(&description);
        let result = Self::validate(circuit);
        Evaluation {
            description,
            json,
            compact,
            feedback: result.feedback,
            stats: result.stats,
        }
    }

    /// Like [`evaluate`](Self::evaluate), then append findings from the
    /// router's best provider. Provider findings go after rule findings;
    /// a router with nothing available downgrades to rule-only output.
    pub async fn evaluate_with_provider(
        circuit: &Circuit,
        options: &ValidationOptions,
        router: &AnalysisRouter,
    ) -> Result<Evaluation, WirecheckError> {
        let mut evaluation = Self::evaluate(circuit);
        if !options.enable_ai || options.offline {
            return Ok(evaluation);
        }

        let context = AnalysisContext {
            circuit_json: evaluation.json.clone(),
            component_count: circuit.component_count(),
            connection_count: circuit.connection_count(),
            detected: evaluation.feedback.clone(),
        };
        match router.analyze(&context).await {
            Ok(findings) => {
                evaluation.feedback.extend(findings);
                evaluation.stats = feedback_stats(&evaluation.feedback);
            }
            Err(AnalysisError::NoProvider) => {
                tracing::warn!("analysis requested but no provider is available");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(evaluation)
    }

    /// Read a circuit description (structured JSON form) from disk.
    pub fn load_description(path: &Path) -> Result<CircuitDescription, WirecheckError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| WirecheckError::Parse(e.to_string()))
    }

    /// Read a circuit description from disk and hydrate it into a circuit.
    pub fn load_circuit(path: &Path) -> Result<Circuit, WirecheckError> {
        Ok(Self::load_description(path)?.to_circuit())
    }
}
