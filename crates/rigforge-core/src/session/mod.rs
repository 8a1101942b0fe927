//! User session.

mod model;

pub use model::{GUEST_USERNAME, Session};
