//! Domain layer for RigForge.
//!
//! Holds the catalog, the build model and its workbench, screens, the AI
//! gateway boundary, and the traits implemented by the infrastructure and
//! interaction crates.

pub mod build;
pub mod catalog;
pub mod component;
pub mod config;
pub mod error;
pub mod forum;
pub mod gateway;
pub mod notice;
pub mod scanner;
pub mod secret;
pub mod session;
pub mod view;
pub mod workbench;

pub use error::{Result, RigForgeError};
