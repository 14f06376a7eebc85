use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Content category a post is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fitness,
    Tech,
    Family,
    Food,
    Beauty,
    Finance,
    Travel,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Fitness,
        Category::Tech,
        Category::Family,
        Category::Food,
        Category::Beauty,
        Category::Finance,
        Category::Travel,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Fitness => "fitness",
            Category::Tech => "tech",
            Category::Family => "family",
            Category::Food => "food",
            Category::Beauty => "beauty",
            Category::Finance => "finance",
            Category::Travel => "travel",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}
