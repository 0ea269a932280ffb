//! The post being edited.

use chrono::Local;
use lumina_store::{Category, Post};
use uuid::Uuid;

/// Date format for new posts (`2024年3月15日`).
pub const DATE_FORMAT: &str = "%Y年%-m月%-d日";

/// Field values given to new drafts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftDefaults {
    /// Cover image URL.
    pub cover_image: String,
    /// Reading time label.
    pub read_time: String,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            cover_image: "https://picsum.photos/800/600".to_owned(),
            read_time: "5 min read".to_owned(),
        }
    }
}

/// A post under edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    post: Post,
}

impl Draft {
    /// Fresh draft with a new id and today's date.
    #[must_use]
    pub fn new(defaults: &DraftDefaults) -> Self {
        Self {
            post: Post {
                id: Uuid::new_v4().to_string(),
                cover_image: defaults.cover_image.clone(),
                date: Local::now().format(DATE_FORMAT).to_string(),
                read_time: defaults.read_time.clone(),
                category: Category::Development,
                ..Post::default()
            },
        }
    }

    /// Draft editing an existing post.
    #[must_use]
    pub fn from_post(post: Post) -> Self {
        Self { post }
    }

    /// The post as currently edited.
    #[must_use]
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Mutable access to the post.
    pub fn post_mut(&mut self) -> &mut Post {
        &mut self.post
    }

    /// Consume the draft.
    #[must_use]
    pub fn into_post(self) -> Post {
        self.post
    }

    /// True when both title and content are empty. Such drafts are never saved.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.post.title.is_empty() && self.post.content.is_empty()
    }

    /// Fields required for publishing that are still empty.
    pub(crate) fn missing_fields(&self) -> Option<&'static str> {
        match (self.post.title.is_empty(), self.post.content.is_empty()) {
            (true, true) => Some("title and content"),
            (true, false) => Some("title"),
            (false, true) => Some("content"),
            (false, false) => None,
        }
    }
}

/// Split a comma-separated tag list, dropping empty entries.
///
/// # Examples
///
/// ```
/// use lumina_editor::parse_tags;
///
/// assert_eq!(parse_tags(" rust, ai,,  "), vec!["rust", "ai"]);
/// ```
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
