//! Community feed where users share builds.

mod model;

pub use model::{FALLBACK_COMMENTARY, ForumDraft, ForumFeed, ForumPost, UNTITLED_POST};
