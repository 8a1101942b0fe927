//! Screens and navigation.

mod router;

pub use router::{NavigationError, ViewRouter, ViewState};
