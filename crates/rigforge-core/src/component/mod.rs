//! Hardware components and prices.

mod model;
mod price;

pub use model::{Component, ComponentCategory};
pub use price::Price;
