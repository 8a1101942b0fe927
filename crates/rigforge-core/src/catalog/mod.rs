//! Component catalog and search.

mod builtin;
mod filter;
mod model;

pub use builtin::placeholder_image;
pub use filter::CategoryFilter;
pub use model::Catalog;
