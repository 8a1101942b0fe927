//! Request and result types exchanged with the AI gateway.

use serde::{Deserialize, Serialize};

use crate::build::Build;
use crate::component::ComponentCategory;

/// Issue text substituted when a compatibility check cannot reach the gateway.
pub const CONNECTION_ERROR_ISSUE: &str = "connection error";

/// One line of a compatibility check request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityPart {
    pub category: ComponentCategory,
    pub name: String,
    pub spec_text: String,
}

impl CompatibilityPart {
    pub fn from_build(build: &Build) -> Vec<Self> {
        build
            .components()
            .map(|c| Self {
                category: c.category,
                name: c.name.clone(),
                spec_text: c.spec_text.clone(),
            })
            .collect()
    }
}

/// One line of a performance estimate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePart {
    pub category: ComponentCategory,
    pub name: String,
}

impl PerformancePart {
    pub fn from_build(build: &Build) -> Vec<Self> {
        build
            .components()
            .map(|c| Self {
                category: c.category,
                name: c.name.clone(),
            })
            .collect()
    }
}

/// Outcome of a compatibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub compatible: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Result shown when the gateway could not be reached or answered garbage.
    pub fn connection_error() -> Self {
        Self {
            compatible: false,
            issues: vec![CONNECTION_ERROR_ISSUE.to_string()],
            recommendations: Vec::new(),
        }
    }
}

/// Estimated frame rate for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FpsEstimate {
    pub game: String,
    pub fps: f64,
}

/// Outcome of a performance estimate. Scores range over `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub gaming_score: f64,
    pub workstation_score: f64,
    pub bottleneck: String,
    pub estimated_fps: Vec<FpsEstimate>,
}

/// What the gateway recognised in a scanned image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    pub name: String,
    /// Free-form component type as reported (e.g. "GPU").
    #[serde(rename = "type")]
    pub component_type: String,
    pub specs: String,
}

/// A compressed image ready to be sent to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64 (standard alphabet) payload.
    pub data: String,
    pub width: u32,
    pub height: u32,
}
