//! Forum domain models.

use crate::build::Build;
use crate::component::{Component, ComponentCategory, Price};

/// Comment used when the AI commentary request fails.
pub const FALLBACK_COMMENTARY: &str = "Looks interesting! Nice work.";

/// Title used when the shared build has no name.
pub const UNTITLED_POST: &str = "My New Build";

/// A build shared to the community feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ForumPost {
    pub id: String,
    pub author: String,
    pub title: String,
    pub description: String,
    /// Copy of the build at share time.
    pub build: Build,
    pub likes: u32,
    pub comments: u32,
    /// Relative time label ("Just now", "2 hours ago").
    pub created_at: String,
    pub ai_rating: Option<f32>,
}

/// A share in progress: the build copy plus the AI comment on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForumDraft {
    pub build: Build,
    pub feedback: String,
}

/// In-memory community feed, newest first.
#[derive(Debug, Clone)]
pub struct ForumFeed {
    posts: Vec<ForumPost>,
}

impl Default for ForumFeed {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ForumFeed {
    pub fn empty() -> Self {
        Self { posts: Vec::new() }
    }

    /// Feed with the sample community posts.
    pub fn seeded() -> Self {
        Self {
            posts: sample_posts(),
        }
    }

    pub fn posts(&self) -> &[ForumPost] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&ForumPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Adds a post at the top of the feed.
    pub fn publish(&mut self, post: ForumPost) {
        self.posts.insert(0, post);
    }

    /// Adds a like and returns the new count.
    pub fn like(&mut self, id: &str) -> Option<u32> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.likes += 1;
        Some(post.likes)
    }
}

fn sample_part(id: &str, name: &str, category: ComponentCategory, dollars: u64, spec: &str) -> Component {
    Component::new(id, name, category, Price::from_dollars(dollars), spec)
}

fn sample_posts() -> Vec<ForumPost> {
    let beast = Build::from_components(
        "b1",
        "4K Beast",
        vec![
            sample_part("c1", "Intel i9 13900K", ComponentCategory::Cpu, 580, "24 Cores"),
            sample_part("c2", "RTX 4090", ComponentCategory::Gpu, 1600, "24GB VRAM"),
        ],
        None,
    );
    let budget = Build::from_components(
        "b2",
        "Budget Gamer",
        vec![
            sample_part("c3", "Ryzen 5 5600", ComponentCategory::Cpu, 130, "6 Cores"),
            sample_part("c4", "RX 6600", ComponentCategory::Gpu, 200, "8GB VRAM"),
        ],
        None,
    );

    vec![
        ForumPost {
            id: "1".to_string(),
            author: "TechMaster99".to_string(),
            title: "My 4K Gaming Beast".to_string(),
            description: "Managed to get a 4090 at a good price. What do you think about the airflow?"
                .to_string(),
            build: beast,
            likes: 124,
            comments: 45,
            created_at: "2 hours ago".to_string(),
            ai_rating: Some(9.5),
        },
        ForumPost {
            id: "2".to_string(),
            author: "BudgetKing".to_string(),
            title: "Budget eSports PC".to_string(),
            description: "Tuned for Valorant and CS2 for under $600.".to_string(),
            build: budget,
            likes: 89,
            comments: 12,
            created_at: "5 hours ago".to_string(),
            ai_rating: Some(8.8),
        },
    ]
}
