use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::user::{non_empty, UserId};
use crate::constants::ERR_INVALID_CATEGORY;
use crate::error::AppError;

/// Identifier issued by the comment store, starting at 1 and never reused
pub type CommentId = u32;

/// Sentiment label picked by the author
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Positif,
    #[default]
    Netral,
    Negatif,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Positif, Category::Netral, Category::Negatif];

    /// Ordering weight used by the category sort
    pub fn rank(self) -> i8 {
        match self {
            Category::Positif => 1,
            Category::Netral => 0,
            Category::Negatif => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Positif => "Positif",
            Category::Netral => "Netral",
            Category::Negatif => "Negatif",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::InvalidInput(ERR_INVALID_CATEGORY.to_string()))
    }
}

/// Comment record held in the comment store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// Author; `ADMIN_OWNER_ID` for admin-written comments
    pub owner_id: UserId,
    pub text: String,
    pub category: Category,
}

impl Comment {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
            ..Default::default()
        }
    }

    /// Length used by the text-length sort
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Partial update for a comment; the owner can never be patched
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub text: Option<String>,
    pub category: Option<Category>,
}

impl CommentPatch {
    pub fn from_input(text: &str, category: Option<Category>) -> Self {
        Self {
            text: non_empty(text),
            category,
        }
    }

    pub(crate) fn apply(self, comment: &mut Comment) {
        if let Some(text) = self.text.filter(|s| !s.is_empty()) {
            comment.text = text;
        }
        if let Some(category) = self.category {
            comment.category = category;
        }
    }
}
