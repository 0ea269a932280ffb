//! Post editor core for Lumina.
//!
//! An [`Editor`] owns the draft of one post and persists it through a
//! [`BlogStore`](lumina_store::BlogStore). Saves are triggered manually, by an
//! [`Autosaver`] thread, or by [`Editor::publish`]; all of them run through
//! [`Editor::save`] so at most one save is in flight at a time.
//!
//! # Example
//!
//! ```
//! use lumina_editor::{DraftDefaults, Editor, SaveOutcome, SaveTrigger};
//! use lumina_kv::MemoryStore;
//! use lumina_store::BlogStore;
//!
//! let editor = Editor::new(BlogStore::new(MemoryStore::new()), &DraftDefaults::default());
//! assert_eq!(editor.save(SaveTrigger::Auto).unwrap(), SaveOutcome::Skipped);
//!
//! editor.update(|post| post.title = "Hello".to_owned());
//! assert!(editor.publish().is_err());
//! ```

mod autosave;
mod draft;
mod editor;
mod error;
mod format;

pub use autosave::Autosaver;
pub use draft::{DATE_FORMAT, Draft, DraftDefaults, parse_tags};
pub use editor::{Editor, SaveOutcome, SaveTrigger};
pub use error::EditorError;
pub use format::insert_format;
