//! Post filtering for list and detail views.

use crate::model::{Category, Post};

/// Filter applied to the post list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Case-insensitive substring matched against title, category and tags.
    /// Empty matches everything.
    pub search: String,
    /// Category to keep; `None` keeps all.
    pub category: Option<Category>,
}

impl PostQuery {
    /// Whether `post` passes both the search and the category filter.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = post.title.to_lowercase().contains(&needle)
            || post.category.as_str().to_lowercase().contains(&needle)
            || post
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));
        let matches_category = self.category.is_none_or(|c| c == post.category);
        matches_search && matches_category
    }
}

/// Keep the posts matching `query`, preserving order.
#[must_use]
pub fn filter_posts(posts: &[Post], query: &PostQuery) -> Vec<Post> {
    posts.iter().filter(|p| query.matches(p)).cloned().collect()
}

/// Other posts in the same category as `post`, in collection order.
#[must_use]
pub fn related_posts(posts: &[Post], post: &Post, limit: usize) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.category == post.category && p.id != post.id)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(id: &str, title: &str, category: Category, tags: &[&str]) -> Post {
        Post {
            id: id.to_owned(),
            title: title.to_owned(),
            category,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            ..Post::default()
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let posts = vec![
            post("1", "A", Category::Life, &[]),
            post("2", "B", Category::Ai, &[]),
        ];
        assert_eq!(ids(&filter_posts(&posts, &PostQuery::default())), vec!["1", "2"]);
    }

    #[test]
    fn test_search_title_category_and_tags() {
        let posts = vec![
            post("1", "Rust Ownership", Category::Development, &[]),
            post("2", "Morning", Category::Life, &["Rustic"]),
            post("3", "Prompting", Category::Ai, &[]),
        ];
        let query = PostQuery {
            search: "RUST".to_owned(),
            category: None,
        };
        assert_eq!(ids(&filter_posts(&posts, &query)), vec!["1", "2"]);

        let query = PostQuery {
            search: "ai".to_owned(),
            category: None,
        };
        assert_eq!(ids(&filter_posts(&posts, &query)), vec!["3"]);
    }

    #[test]
    fn test_category_filter_combines_with_search() {
        let posts = vec![
            post("1", "Rust", Category::Development, &[]),
            post("2", "Rust trip", Category::Life, &[]),
        ];
        let query = PostQuery {
            search: "rust".to_owned(),
            category: Some(Category::Life),
        };
        assert_eq!(ids(&filter_posts(&posts, &query)), vec!["2"]);
    }

    #[test]
    fn test_related_posts() {
        let posts = vec![
            post("1", "a", Category::Design, &[]),
            post("2", "b", Category::Design, &[]),
            post("3", "c", Category::Life, &[]),
            post("4", "d", Category::Design, &[]),
            post("5", "e", Category::Design, &[]),
            post("6", "f", Category::Design, &[]),
        ];
        let related = related_posts(&posts, &posts[1], 3);
        assert_eq!(ids(&related), vec!["1", "4", "5"]);
    }
}
