//! AI gateway boundary: trait, request/result types and errors.

mod error;
mod model;
mod service;

pub use error::GatewayError;
pub use model::{
    BenchmarkResult, CONNECTION_ERROR_ISSUE, CompatibilityPart, EncodedImage, FpsEstimate,
    Identification, PerformancePart, ValidationResult,
};
pub use service::AiGateway;
