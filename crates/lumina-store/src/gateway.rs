//! Storage gateway for posts and comments.
//!
//! Each collection lives under its own key as one JSON array. Every mutation
//! reads the whole collection, changes it in memory and writes it back.

use std::cmp::Reverse;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use lumina_kv::{KvStore, KvStoreExt};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::model::{Comment, Post};
use crate::query::{PostQuery, filter_posts, related_posts};
use crate::seed::default_posts;

/// Key holding the post collection.
pub const POSTS_KEY: &str = "lumina_blog_posts";
/// Key holding the comment collection.
pub const COMMENTS_KEY: &str = "lumina_blog_comments";

/// Posts and comments persisted in a [`KvStore`].
///
/// Posts are ordered newest-created first. Comments for a post are returned
/// newest first by date.
///
/// # Single writer
///
/// There is no locking between read and write: two gateways writing the same
/// store concurrently can silently drop each other's updates. Callers that
/// save from several triggers must serialize those saves themselves.
pub struct BlogStore<S> {
    store: S,
}

impl<S: KvStore> BlogStore<S> {
    /// Create a gateway over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.store
    }

    /// All posts, newest-created first.
    ///
    /// On first use of an empty store the default posts are written and
    /// returned; later calls read them back without seeding again.
    pub fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        if let Some(posts) = self.store.get_json::<Vec<Post>>(POSTS_KEY)? {
            return Ok(posts);
        }

        let posts = default_posts();
        self.store.set_json(POSTS_KEY, &posts)?;
        info!(count = posts.len(), "seeded default posts");
        Ok(posts)
    }

    /// Look up a post by id.
    pub fn get_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.list_posts()?.into_iter().find(|p| p.id == id))
    }

    /// Insert or replace a post.
    ///
    /// A post whose id is already stored is replaced in place; otherwise it is
    /// prepended. The whole collection is rewritten.
    pub fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        if post.id.is_empty() {
            return Err(StoreError::InvalidPost("id cannot be empty".to_owned()));
        }

        let mut posts = self.list_posts()?;
        if let Some(existing) = posts.iter_mut().find(|p| p.id == post.id) {
            existing.clone_from(post);
            debug!(id = %post.id, "updated post");
        } else {
            posts.insert(0, post.clone());
            debug!(id = %post.id, "created post");
        }

        self.store.set_json(POSTS_KEY, &posts)?;
        Ok(())
    }

    /// Delete a post by id. Deleting an absent id is a no-op.
    ///
    /// Comments on the post are kept.
    pub fn delete_post(&self, id: &str) -> Result<(), StoreError> {
        let mut posts = self.list_posts()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            debug!(id, "delete of absent post ignored");
            return Ok(());
        }

        self.store.set_json(POSTS_KEY, &posts)?;
        debug!(id, "deleted post");
        Ok(())
    }

    /// Posts matching `query`, in collection order.
    pub fn find_posts(&self, query: &PostQuery) -> Result<Vec<Post>, StoreError> {
        Ok(filter_posts(&self.list_posts()?, query))
    }

    /// Up to `limit` other posts sharing `post`'s category.
    pub fn related_posts(&self, post: &Post, limit: usize) -> Result<Vec<Post>, StoreError> {
        Ok(related_posts(&self.list_posts()?, post, limit))
    }

    /// Comments on `post_id`, newest first.
    ///
    /// Dates that are neither RFC 3339 timestamps nor `YYYY-MM-DD` dates sort
    /// last. Equal dates keep collection order.
    pub fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<Comment> = self
            .all_comments()?
            .into_iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        comments.sort_by_key(|c| Reverse(parse_comment_date(&c.date)));
        Ok(comments)
    }

    /// Prepend a comment to the collection.
    pub fn add_comment(&self, comment: &Comment) -> Result<(), StoreError> {
        let mut comments = self.all_comments()?;
        comments.insert(0, comment.clone());
        self.store.set_json(COMMENTS_KEY, &comments)?;
        debug!(id = %comment.id, post_id = %comment.post_id, "added comment");
        Ok(())
    }

    fn all_comments(&self) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .store
            .get_json::<Vec<Comment>>(COMMENTS_KEY)?
            .unwrap_or_default())
    }
}

/// Date-time layouts without an offset, read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_comment_date(date: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed);
    }
    let naive = date.strip_suffix('Z').unwrap_or(date);
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, User};
    use lumina_kv::{KvError, MemoryStore};
    use pretty_assertions::assert_eq;

    fn store() -> BlogStore<MemoryStore> {
        BlogStore::new(MemoryStore::new())
    }

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_owned(),
            title: title.to_owned(),
            content: "# Heading\nBody".to_owned(),
            category: Category::Ai,
            tags: vec!["x".to_owned()],
            ..Post::default()
        }
    }

    fn comment(id: &str, post_id: &str, date: &str) -> Comment {
        Comment {
            id: id.to_owned(),
            post_id: post_id.to_owned(),
            user: User::default(),
            content: format!("comment {id}"),
            date: date.to_owned(),
        }
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id(i).to_owned()).collect()
    }

    #[test]
    fn test_seeding_happens_once() {
        let blog = store();
        let first = blog.list_posts().unwrap();
        assert!(!first.is_empty());
        assert_eq!(ids(&first, |p| p.id.as_str()), vec!["1", "2", "3"]);

        let second = blog.list_posts().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let blog = store();
        let saved = post("new", "Fresh");
        blog.save_post(&saved).unwrap();
        assert_eq!(blog.get_post("new").unwrap(), Some(saved));
    }

    #[test]
    fn test_new_posts_are_prepended() {
        let blog = store();
        blog.save_post(&post("a", "A")).unwrap();
        blog.save_post(&post("b", "B")).unwrap();
        let posts = blog.list_posts().unwrap();
        assert_eq!(ids(&posts, |p| p.id.as_str()), vec!["b", "a", "1", "2", "3"]);
    }

    #[test]
    fn test_save_existing_replaces_in_place() {
        let blog = store();
        let mut updated = post("2", "Renamed");
        updated.tags = vec!["new".to_owned()];
        blog.save_post(&updated).unwrap();

        let posts = blog.list_posts().unwrap();
        assert_eq!(ids(&posts, |p| p.id.as_str()), vec!["1", "2", "3"]);
        assert_eq!(posts[1], updated);
    }

    #[test]
    fn test_save_rejects_empty_id() {
        let blog = store();
        let err = blog.save_post(&post("", "No id")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPost(_)));
    }

    #[test]
    fn test_get_missing_post() {
        assert_eq!(store().get_post("nope").unwrap(), None);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let blog = store();
        blog.delete_post("2").unwrap();
        let after_first = blog.list_posts().unwrap();
        assert_eq!(ids(&after_first, |p| p.id.as_str()), vec!["1", "3"]);

        blog.delete_post("2").unwrap();
        assert_eq!(blog.list_posts().unwrap(), after_first);
    }

    #[test]
    fn test_delete_everything_does_not_reseed() {
        let blog = store();
        for id in ["1", "2", "3"] {
            blog.delete_post(id).unwrap();
        }
        assert!(blog.list_posts().unwrap().is_empty());
    }

    #[test]
    fn test_comments_sorted_by_date_descending() {
        for order in [["old", "new"], ["new", "old"]] {
            let blog = store();
            for which in order {
                let date = if which == "new" { "2024-01-02" } else { "2024-01-01" };
                blog.add_comment(&comment(which, "p", date)).unwrap();
            }
            let comments = blog.list_comments("p").unwrap();
            assert_eq!(ids(&comments, |c| c.id.as_str()), vec!["new", "old"]);
        }
    }

    #[test]
    fn test_comments_mixed_date_formats() {
        let blog = store();
        blog.add_comment(&comment("a", "p", "2024-01-01T10:00:00.000Z"))
            .unwrap();
        blog.add_comment(&comment("b", "p", "not a date")).unwrap();
        blog.add_comment(&comment("c", "p", "2024-03-01")).unwrap();
        blog.add_comment(&comment("d", "p", "2024-01-01T12:00:00+08:00"))
            .unwrap();

        let comments = blog.list_comments("p").unwrap();
        assert_eq!(ids(&comments, |c| c.id.as_str()), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_comments_dates_without_offset_are_utc() {
        let blog = store();
        blog.add_comment(&comment("new", "p", "2024-01-02T00:00:00"))
            .unwrap();
        blog.add_comment(&comment("old", "p", "2024-01-01T00:00:00"))
            .unwrap();
        blog.add_comment(&comment("late", "p", "2024-01-02T10:00Z"))
            .unwrap();
        blog.add_comment(&comment("noon", "p", "2024-01-01 12:30"))
            .unwrap();
        blog.add_comment(&comment("east", "p", "2024-01-02T09:00:00+08:00"))
            .unwrap();

        let comments = blog.list_comments("p").unwrap();
        assert_eq!(
            ids(&comments, |c| c.id.as_str()),
            vec!["late", "east", "new", "noon", "old"]
        );
    }

    #[test]
    fn test_parse_comment_date_layouts() {
        let utc = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
        assert_eq!(
            parse_comment_date("2024-05-06T07:08:09.250"),
            Some(utc("2024-05-06T07:08:09.250Z"))
        );
        assert_eq!(
            parse_comment_date("2024-05-06T07:08"),
            Some(utc("2024-05-06T07:08:00Z"))
        );
        assert_eq!(parse_comment_date("2024-05-06"), Some(utc("2024-05-06T00:00:00Z")));
        assert_eq!(parse_comment_date("yesterday"), None);
    }

    #[test]
    fn test_comments_filtered_by_post() {
        let blog = store();
        blog.add_comment(&comment("a", "p1", "2024-01-01")).unwrap();
        blog.add_comment(&comment("b", "p2", "2024-01-01")).unwrap();
        blog.add_comment(&comment("c", "deleted", "2024-01-01"))
            .unwrap();

        assert_eq!(ids(&blog.list_comments("p1").unwrap(), |c| c.id.as_str()), vec!["a"]);
        assert_eq!(
            ids(&blog.list_comments("deleted").unwrap(), |c| c.id.as_str()),
            vec!["c"]
        );
        assert!(blog.list_comments("none").unwrap().is_empty());
    }

    #[test]
    fn test_collections_are_independent() {
        let blog = store();
        blog.add_comment(&comment("a", "1", "2024-01-01")).unwrap();
        assert!(blog.kv().get(POSTS_KEY).unwrap().is_none());

        blog.save_post(&post("x", "X")).unwrap();
        assert_eq!(blog.list_comments("1").unwrap().len(), 1);
    }

    #[test]
    fn test_corrupted_posts_surface_as_error() {
        let blog = store();
        blog.kv().set(POSTS_KEY, b"{broken").unwrap();
        let err = blog.list_posts().unwrap_err();
        assert!(matches!(err, StoreError::Kv(KvError::Corrupted { .. })));
    }

    #[test]
    fn test_find_and_related() {
        let blog = store();
        blog.save_post(&post("a", "Agents")).unwrap();
        blog.save_post(&post("b", "Embeddings")).unwrap();

        let found = blog
            .find_posts(&PostQuery {
                search: "agent".to_owned(),
                category: None,
            })
            .unwrap();
        assert_eq!(ids(&found, |p| p.id.as_str()), vec!["a"]);

        let a = blog.get_post("a").unwrap().unwrap();
        let related = blog.related_posts(&a, 3).unwrap();
        assert_eq!(ids(&related, |p| p.id.as_str()), vec!["b"]);
    }
}
