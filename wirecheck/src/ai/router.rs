//! Routing between registered analysis providers with fallback support.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ai::provider::{AnalysisContext, AnalysisError, AnalysisProvider};
use crate::rules::Feedback;

/// Holds the providers a host has registered and picks the one to use:
/// the preferred provider when it is available, otherwise the first
/// available provider in registration order.
pub struct AnalysisRouter {
    providers: Vec<Arc<dyn AnalysisProvider>>,
    preferred: RwLock<Option<String>>,
}

impl AnalysisRouter {
    /// Create a router with no providers registered.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            preferred: RwLock::new(None),
        }
    }

    pub fn register(&mut self, provider: Arc<dyn AnalysisProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn set_preferred(&self, name: &str) {
        let mut preferred = self.preferred.write().await;
        *preferred = Some(name.to_string());
    }

    pub async fn preferred(&self) -> Option<String> {
        self.preferred.read().await.clone()
    }

    /// Pick the best provider given preference and availability.
    pub async fn get_provider(&self) -> Option<Arc<dyn AnalysisProvider>> {
        let preferred = self.preferred.read().await.clone();

        if let Some(ref name) = preferred {
            for provider in &self.providers {
                if provider.name() == name && provider.is_available().await {
                    return Some(provider.clone());
                }
            }
            tracing::warn!(
                provider = %name,
                "preferred analysis provider unavailable, falling back"
            );
        }

        for provider in &self.providers {
            if provider.is_available().await {
                return Some(provider.clone());
            }
        }

        None
    }

    pub async fn has_provider(&self) -> bool {
        self.get_provider().await.is_some()
    }

    /// Analyze using the best available provider.
    pub async fn analyze(
        &self,
        context: &AnalysisContext,
    ) -> Result<Vec<Feedback>, AnalysisError> {
        let provider = self.get_provider().await.ok_or(AnalysisError::NoProvider)?;
        tracing::info!(provider = provider.name(), "running circuit analysis");
        provider.analyze(context).await
    }
}

impl Default for AnalysisRouter {
    fn default() -> Self {
        Self::new()
    }
}
