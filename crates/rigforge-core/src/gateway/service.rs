//! AI gateway trait.

use async_trait::async_trait;

use super::error::GatewayError;
use super::model::{
    BenchmarkResult, CompatibilityPart, EncodedImage, Identification, PerformancePart,
    ValidationResult,
};

/// External service that judges builds and recognises hardware.
///
/// Implementations validate the remote payload before returning it; any
/// unexpected shape is reported as [`GatewayError::Malformed`].
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Checks whether the listed parts work together.
    async fn check_compatibility(
        &self,
        parts: &[CompatibilityPart],
    ) -> Result<ValidationResult, GatewayError>;

    /// Estimates gaming/workstation scores and per-game FPS.
    async fn estimate_performance(
        &self,
        parts: &[PerformancePart],
    ) -> Result<BenchmarkResult, GatewayError>;

    /// Identifies the component shown in `image`.
    ///
    /// `Ok(None)` means the service answered but recognised nothing.
    async fn identify_component(
        &self,
        image: &EncodedImage,
    ) -> Result<Option<Identification>, GatewayError>;

    /// Writes a short forum-style comment about a build.
    async fn forum_commentary(&self, component_names: &str) -> Result<String, GatewayError>;
}
