//! Application layer for RigForge.
//!
//! Coordinates the domain model, the saved build store and the AI gateway
//! behind a single use case.

pub mod outcome;
pub mod saved_builds;
pub mod state;
pub mod usecase;

pub use outcome::{ActionOutcome, ResultTicket};
pub use saved_builds::{Confirmation, SavedBuildService};
pub use state::{AppState, PendingFlags, PendingKind};
pub use usecase::RigForgeUseCase;
