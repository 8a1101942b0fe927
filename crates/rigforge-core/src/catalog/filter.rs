//! Category selector for catalog searches.

use std::fmt;
use std::str::FromStr;

use crate::component::ComponentCategory;

/// Which categories a catalog search should keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ComponentCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: ComponentCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todos") {
            return Ok(Self::All);
        }
        trimmed.parse::<ComponentCategory>().map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}
