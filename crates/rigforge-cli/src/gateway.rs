//! Picks the AI gateway for this run.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use rigforge_core::config::GeminiSettings;
use rigforge_core::gateway::{
    AiGateway, BenchmarkResult, CompatibilityPart, EncodedImage, GatewayError, Identification,
    PerformancePart, ValidationResult,
};
use rigforge_infrastructure::{RigForgePaths, SecretServiceImpl};
use rigforge_interaction::{GeminiApiAgent, GeminiGateway};

/// Connects to Gemini when a key is available.
///
/// Without a key the session still runs; every gateway action takes its
/// fallback path.
pub async fn connect(paths: &RigForgePaths, settings: &GeminiSettings) -> Arc<dyn AiGateway> {
    let secrets = match SecretServiceImpl::new(paths) {
        Ok(secrets) => secrets,
        Err(e) => return Arc::new(UnconfiguredGateway::new(e.to_string())),
    };

    match GeminiApiAgent::try_from_secrets(&secrets, settings).await {
        Ok(agent) => {
            info!(model = agent.model(), "Gemini gateway ready");
            Arc::new(GeminiGateway::new(agent))
        }
        Err(GatewayError::NotConfigured(reason)) => Arc::new(UnconfiguredGateway::new(reason)),
        Err(e) => Arc::new(UnconfiguredGateway::new(e.to_string())),
    }
}

/// Gateway used when no API key is configured.
#[derive(Debug, Clone)]
pub struct UnconfiguredGateway {
    reason: String,
}

impl UnconfiguredGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "AI gateway disabled");
        Self { reason }
    }

    fn error(&self) -> GatewayError {
        GatewayError::NotConfigured(self.reason.clone())
    }
}

#[async_trait]
impl AiGateway for UnconfiguredGateway {
    async fn check_compatibility(
        &self,
        _parts: &[CompatibilityPart],
    ) -> Result<ValidationResult, GatewayError> {
        Err(self.error())
    }

    async fn estimate_performance(
        &self,
        _parts: &[PerformancePart],
    ) -> Result<BenchmarkResult, GatewayError> {
        Err(self.error())
    }

    async fn identify_component(
        &self,
        _image: &EncodedImage,
    ) -> Result<Option<Identification>, GatewayError> {
        Err(self.error())
    }

    async fn forum_commentary(&self, _component_names: &str) -> Result<String, GatewayError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_gateway_always_fails() {
        let gateway = UnconfiguredGateway::new("no key");

        let err = gateway.check_compatibility(&[]).await.unwrap_err();
        assert_eq!(err, GatewayError::NotConfigured("no key".to_string()));
        assert!(gateway.forum_commentary("x").await.is_err());
        assert!(!err.is_retryable());
    }
}
