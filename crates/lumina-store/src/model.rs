//! Persisted data model.
//!
//! Field names serialize in camelCase so stored entries keep the layout the
//! browser version of the blog wrote. Missing fields fall back to defaults,
//! keeping old entries readable after fields are added.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Post category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Software development.
    #[default]
    Development,
    /// Life and productivity.
    Life,
    /// Design.
    Design,
    /// Artificial intelligence.
    #[serde(rename = "AI")]
    Ai,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Development, Self::Life, Self::Design, Self::Ai];

    /// Display name, identical to the persisted value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Life => "Life",
            Self::Design => "Design",
            Self::Ai => "AI",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?} (expected one of Development, Life, Design, AI)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A blog post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    /// Stable identity assigned at creation.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Short teaser shown on cards.
    pub excerpt: String,
    /// Markdown-subset body.
    pub content: String,
    /// Cover image URL, empty for none.
    pub cover_image: String,
    /// Display date.
    pub date: String,
    /// Display reading time, e.g. `5 min read`.
    pub read_time: String,
    /// Post category.
    pub category: Category,
    /// Ordered tags.
    pub tags: Vec<String>,
}

/// A comment author, embedded into each comment as a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Handle.
    pub username: String,
    /// Avatar URL.
    pub avatar: String,
}

/// A comment on a post.
///
/// `post_id` is not checked against existing posts; comments on deleted
/// posts stay in the collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// Unique identity.
    pub id: String,
    /// Post the comment belongs to.
    pub post_id: String,
    /// Author snapshot at creation time.
    pub user: User,
    /// Plain-text body.
    pub content: String,
    /// RFC 3339 timestamp.
    pub date: String,
}

impl Comment {
    /// Create a comment stamped with a fresh id and the current UTC time.
    #[must_use]
    pub fn new(post_id: impl Into<String>, user: User, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            post_id: post_id.into(),
            user,
            content: content.into(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
