//! [`AiGateway`] backed by Gemini.
//!
//! Every response is coerced into the typed result at this boundary. Payloads
//! that are not JSON, miss required fields, or carry out-of-range numbers are
//! reported as [`GatewayError::Malformed`] rather than passed on.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use rigforge_core::gateway::{
    AiGateway, BenchmarkResult, CompatibilityPart, EncodedImage, FpsEstimate, GatewayError,
    Identification, PerformancePart, ValidationResult,
};

use crate::gemini_api_agent::{GeminiApiAgent, GeminiPrompt};
use crate::prompts;

#[derive(Debug, Clone)]
pub struct GeminiGateway {
    agent: GeminiApiAgent,
}

impl GeminiGateway {
    pub fn new(agent: GeminiApiAgent) -> Self {
        Self { agent }
    }
}

fn template_error(e: minijinja::Error) -> GatewayError {
    GatewayError::Transport(format!("Failed to render prompt: {e}"))
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn check_compatibility(
        &self,
        parts: &[CompatibilityPart],
    ) -> Result<ValidationResult, GatewayError> {
        let text = prompts::compatibility_prompt(parts).map_err(template_error)?;
        debug!(parts = parts.len(), "requesting compatibility check");
        let raw = self
            .agent
            .generate(GeminiPrompt::text(text).with_schema(prompts::compatibility_schema()))
            .await?;
        parse_validation(&raw)
    }

    async fn estimate_performance(
        &self,
        parts: &[PerformancePart],
    ) -> Result<BenchmarkResult, GatewayError> {
        let text = prompts::performance_prompt(parts).map_err(template_error)?;
        debug!(parts = parts.len(), "requesting performance estimate");
        let raw = self
            .agent
            .generate(GeminiPrompt::text(text).with_schema(prompts::performance_schema()))
            .await?;
        parse_benchmark(&raw)
    }

    async fn identify_component(
        &self,
        image: &EncodedImage,
    ) -> Result<Option<Identification>, GatewayError> {
        debug!(width = image.width, height = image.height, "requesting identification");
        let prompt = GeminiPrompt::text(prompts::IDENTIFY_PROMPT)
            .with_inline_data(image.mime_type.clone(), image.data.clone())
            .with_schema(prompts::identification_schema());
        match self.agent.generate(prompt).await {
            Ok(raw) => parse_identification(&raw),
            Err(GatewayError::EmptyResponse) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn forum_commentary(&self, component_names: &str) -> Result<String, GatewayError> {
        let text = prompts::forum_prompt(component_names).map_err(template_error)?;
        let raw = self.agent.generate(GeminiPrompt::text(text)).await?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }
}

#[derive(Deserialize)]
struct RawValidation {
    compatible: bool,
    issues: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBenchmark {
    gaming_score: f64,
    workstation_score: f64,
    bottleneck: String,
    #[serde(default, alias = "estimatedFPS")]
    estimated_fps: Vec<RawFps>,
}

#[derive(Deserialize)]
struct RawFps {
    game: String,
    fps: f64,
}

#[derive(Deserialize)]
struct RawIdentification {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    component_type: String,
    #[serde(default)]
    specs: String,
}

/// Models occasionally wrap JSON in a markdown fence despite the MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn parse_json<'a, T: Deserialize<'a>>(text: &'a str, what: &str) -> Result<T, GatewayError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GatewayError::malformed(format!("{what}: {e}")))
}

pub fn parse_validation(text: &str) -> Result<ValidationResult, GatewayError> {
    let raw: RawValidation = parse_json(text, "validation")?;
    Ok(ValidationResult {
        compatible: raw.compatible,
        issues: raw.issues,
        recommendations: raw.recommendations,
    })
}

pub fn parse_benchmark(text: &str) -> Result<BenchmarkResult, GatewayError> {
    let raw: RawBenchmark = parse_json(text, "benchmark")?;

    for (label, score) in [
        ("gamingScore", raw.gaming_score),
        ("workstationScore", raw.workstation_score),
    ] {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(GatewayError::malformed(format!(
                "{label} out of range: {score}"
            )));
        }
    }

    let estimated_fps = raw
        .estimated_fps
        .into_iter()
        .map(|entry| {
            if entry.fps.is_finite() && entry.fps >= 0.0 {
                Ok(FpsEstimate {
                    game: entry.game,
                    fps: entry.fps,
                })
            } else {
                Err(GatewayError::malformed(format!(
                    "invalid FPS for {}: {}",
                    entry.game, entry.fps
                )))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BenchmarkResult {
        gaming_score: raw.gaming_score,
        workstation_score: raw.workstation_score,
        bottleneck: raw.bottleneck,
        estimated_fps,
    })
}

/// `Ok(None)` when the model answered but named nothing.
pub fn parse_identification(text: &str) -> Result<Option<Identification>, GatewayError> {
    let stripped = strip_code_fence(text);
    if stripped.is_empty() || stripped == "null" {
        return Ok(None);
    }
    let raw: RawIdentification = parse_json(stripped, "identification")?;
    let name = raw.name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some(Identification {
        name: name.to_string(),
        component_type: raw.component_type.trim().to_string(),
        specs: raw.specs.trim().to_string(),
    }))
}
