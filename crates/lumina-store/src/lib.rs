//! Storage gateway for Lumina posts and comments.
//!
//! [`BlogStore`] keeps two independent collections in a
//! [`KvStore`](lumina_kv::KvStore): posts (seeded with default content on first
//! use) and comments. [`SessionStore`] keeps the simulated login state in the
//! same namespace.
//!
//! # Example
//!
//! ```
//! use lumina_kv::MemoryStore;
//! use lumina_store::BlogStore;
//!
//! let blog = BlogStore::new(MemoryStore::new());
//! let posts = blog.list_posts().unwrap();
//! assert!(!posts.is_empty());
//! assert!(blog.get_post("missing").unwrap().is_none());
//! ```

mod error;
mod gateway;
mod model;
mod query;
mod seed;
mod session;

pub use error::StoreError;
pub use gateway::{BlogStore, COMMENTS_KEY, POSTS_KEY};
pub use model::{Category, Comment, Post, UnknownCategory, User};
pub use query::{PostQuery, filter_posts, related_posts};
pub use session::{ADMIN_KEY, CURRENT_USER_KEY, Session, SessionStore, guest_user};
