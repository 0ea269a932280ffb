//! Draft editing with single-flight saves.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use lumina_ai::{ContentGenerator, GenerationMode, generate_or_message};
use lumina_kv::KvStore;
use lumina_store::{BlogStore, Post};
use tracing::{debug, info};

use crate::draft::{Draft, DraftDefaults};
use crate::error::EditorError;

/// What caused a save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveTrigger {
    /// Periodic autosave.
    Auto,
    /// Explicit save or publish.
    Manual,
}

/// Result of a save attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was written.
    Saved {
        /// When the write completed.
        at: DateTime<Local>,
    },
    /// The draft had neither title nor content.
    Skipped,
}

/// Editor session for one post.
///
/// [`Editor::save`] and [`Editor::publish`] hold the save lock from
/// snapshotting the draft until the collection is written. Two saves can
/// never interleave their read-modify-write of the post collection.
pub struct Editor<S> {
    draft: Mutex<Draft>,
    store: Mutex<BlogStore<S>>,
    last_saved: Mutex<Option<DateTime<Local>>>,
}

impl<S: KvStore> Editor<S> {
    /// Start editing a new post.
    pub fn new(store: BlogStore<S>, defaults: &DraftDefaults) -> Self {
        Self::with_draft(store, Draft::new(defaults))
    }

    /// Edit the post `id`, or start a new draft if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the post collection cannot be read.
    pub fn open(
        store: BlogStore<S>,
        id: &str,
        defaults: &DraftDefaults,
    ) -> Result<Self, EditorError> {
        let draft = match store.get_post(id)? {
            Some(post) => Draft::from_post(post),
            None => {
                debug!(id, "post not found, starting new draft");
                Draft::new(defaults)
            }
        };
        Ok(Self::with_draft(store, draft))
    }

    /// Edit the given draft.
    pub fn with_draft(store: BlogStore<S>, draft: Draft) -> Self {
        Self {
            draft: Mutex::new(draft),
            store: Mutex::new(store),
            last_saved: Mutex::new(None),
        }
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> Draft {
        self.lock_draft().clone()
    }

    /// Mutate the draft.
    pub fn update<R>(&self, f: impl FnOnce(&mut Post) -> R) -> R {
        f(self.lock_draft().post_mut())
    }

    /// Time of the last successful save.
    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        *self.last_saved.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the latest draft.
    ///
    /// Blank drafts are skipped without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the write fails; the draft is kept.
    pub fn save(&self, trigger: SaveTrigger) -> Result<SaveOutcome, EditorError> {
        let store = self.lock_store();

        let draft = self.draft();
        if draft.is_blank() {
            debug!(?trigger, "skipping save of blank draft");
            return Ok(SaveOutcome::Skipped);
        }

        let at = self.write(&store, &draft, trigger)?;
        Ok(SaveOutcome::Saved { at })
    }

    /// Save the draft as a finished post.
    ///
    /// The returned post is the exact snapshot that was validated and written;
    /// edits made while publishing are left for the next save.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Incomplete`] if title or content is empty, or
    /// [`EditorError::Store`] if the write fails.
    pub fn publish(&self) -> Result<Post, EditorError> {
        let store = self.lock_store();

        let draft = self.draft();
        if let Some(missing) = draft.missing_fields() {
            return Err(EditorError::Incomplete { missing });
        }

        self.write(&store, &draft, SaveTrigger::Manual)?;
        let post = draft.into_post();
        info!(id = %post.id, title = %post.title, "published post");
        Ok(post)
    }

    /// Write `draft` while the caller holds the save lock.
    fn write(
        &self,
        store: &BlogStore<S>,
        draft: &Draft,
        trigger: SaveTrigger,
    ) -> Result<DateTime<Local>, EditorError> {
        store.save_post(draft.post())?;
        let at = Local::now();
        *self.last_saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(at);
        debug!(id = %draft.post().id, ?trigger, "saved draft");
        Ok(at)
    }

    /// Insert generated text into the draft.
    ///
    /// Summaries replace the excerpt. Outlines and full posts are appended to
    /// the content after a blank line.
    pub fn apply_generated(&self, mode: GenerationMode, text: &str) {
        self.update(|post| match mode {
            GenerationMode::Summary => text.clone_into(&mut post.excerpt),
            GenerationMode::Outline | GenerationMode::Full => {
                if post.content.is_empty() {
                    text.clone_into(&mut post.content);
                } else {
                    post.content.push_str("\n\n");
                    post.content.push_str(text);
                }
            }
        });
    }

    /// Generate content and insert it into the draft.
    ///
    /// The topic is `prompt`, or the draft title when `prompt` is empty.
    /// Returns `false` without calling the generator when both are empty.
    /// Generation failures are inserted as a message, like any other text.
    pub fn generate(
        &self,
        generator: &dyn ContentGenerator,
        mode: GenerationMode,
        prompt: &str,
    ) -> bool {
        let topic = if prompt.is_empty() {
            self.lock_draft().post().title.clone()
        } else {
            prompt.to_owned()
        };
        if topic.is_empty() {
            return false;
        }

        let text = generate_or_message(generator, &topic, mode);
        self.apply_generated(mode, &text);
        true
    }

    fn lock_draft(&self) -> MutexGuard<'_, Draft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_store(&self) -> MutexGuard<'_, BlogStore<S>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_ai::{AiError, SERVICE_ERROR_MESSAGE};
    use lumina_kv::{KvError, MemoryStore};
    use lumina_store::POSTS_KEY;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    fn editor() -> (Arc<MemoryStore>, Editor<Arc<MemoryStore>>) {
        let kv = Arc::new(MemoryStore::new());
        let editor = Editor::new(BlogStore::new(Arc::clone(&kv)), &DraftDefaults::default());
        (kv, editor)
    }

    struct Echo;

    impl ContentGenerator for Echo {
        fn generate(&self, topic: &str, mode: GenerationMode) -> Result<String, AiError> {
            Ok(format!("{mode}:{topic}"))
        }
    }

    struct Failing;

    impl ContentGenerator for Failing {
        fn generate(&self, _topic: &str, _mode: GenerationMode) -> Result<String, AiError> {
            Err(AiError::MissingApiKey)
        }
    }

    /// Store whose writes always fail.
    struct ReadOnly(MemoryStore);

    impl KvStore for ReadOnly {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, _value: &[u8]) -> Result<(), KvError> {
            Err(KvError::InvalidKey(key.to_owned()))
        }

        fn remove(&self, key: &str) -> Result<(), KvError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_blank_draft_is_not_saved() {
        let (kv, editor) = editor();
        assert_eq!(editor.save(SaveTrigger::Auto).unwrap(), SaveOutcome::Skipped);
        assert_eq!(editor.save(SaveTrigger::Manual).unwrap(), SaveOutcome::Skipped);
        assert!(kv.get(POSTS_KEY).unwrap().is_none());
        assert_eq!(editor.last_saved(), None);
    }

    #[test]
    fn test_title_only_draft_is_saved() {
        let (kv, editor) = editor();
        editor.update(|p| p.title = "Draft".to_owned());

        let outcome = editor.save(SaveTrigger::Auto).unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { .. }));
        assert!(editor.last_saved().is_some());

        let id = editor.draft().post().id.clone();
        let stored = BlogStore::new(kv).get_post(&id).unwrap().unwrap();
        assert_eq!(stored.title, "Draft");
    }

    #[test]
    fn test_repeated_saves_upsert_one_post() {
        let (kv, editor) = editor();
        editor.update(|p| p.content = "v1".to_owned());
        editor.save(SaveTrigger::Auto).unwrap();
        editor.update(|p| p.content = "v2".to_owned());
        editor.save(SaveTrigger::Manual).unwrap();

        let posts = BlogStore::new(kv).list_posts().unwrap();
        let id = editor.draft().post().id.clone();
        let mine: Vec<&Post> = posts.iter().filter(|p| p.id == id).collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content, "v2");
        assert_eq!(posts[0].id, id);
    }

    #[test]
    fn test_publish_requires_title_and_content() {
        let (kv, editor) = editor();
        editor.update(|p| p.title = "Only title".to_owned());

        let err = editor.publish().unwrap_err();
        assert!(matches!(err, EditorError::Incomplete { missing: "content" }));
        assert!(kv.get(POSTS_KEY).unwrap().is_none());

        editor.update(|p| p.content = "Body".to_owned());
        let post = editor.publish().unwrap();
        assert_eq!(BlogStore::new(kv).get_post(&post.id).unwrap(), Some(post));
    }

    #[test]
    fn test_publish_returns_the_post_it_wrote() {
        let (kv, editor) = editor();
        editor.update(|p| {
            p.title = "Title".to_owned();
            p.content = "v0".to_owned();
        });
        let editor = Arc::new(editor);

        let writer = {
            let editor = Arc::clone(&editor);
            thread::spawn(move || {
                for i in 1..=200 {
                    editor.update(|p| p.content = format!("v{i}"));
                }
            })
        };

        let blog = BlogStore::new(kv);
        for _ in 0..50 {
            let post = editor.publish().unwrap();
            assert_eq!(blog.get_post(&post.id).unwrap(), Some(post));
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_open_existing_post() {
        let kv = Arc::new(MemoryStore::new());
        let editor = Editor::open(
            BlogStore::new(Arc::clone(&kv)),
            "2",
            &DraftDefaults::default(),
        )
        .unwrap();
        assert_eq!(editor.draft().post().id, "2");
        assert!(!editor.draft().is_blank());
    }

    #[test]
    fn test_open_missing_post_starts_new_draft() {
        let editor = Editor::open(
            BlogStore::new(MemoryStore::new()),
            "missing",
            &DraftDefaults::default(),
        )
        .unwrap();
        assert_ne!(editor.draft().post().id, "missing");
        assert!(editor.draft().is_blank());
    }

    #[test]
    fn test_failed_save_keeps_draft() {
        let editor = Editor::new(
            BlogStore::new(ReadOnly(MemoryStore::new())),
            &DraftDefaults::default(),
        );
        editor.update(|p| p.title = "Keep me".to_owned());

        assert!(matches!(
            editor.save(SaveTrigger::Manual),
            Err(EditorError::Store(_))
        ));
        assert_eq!(editor.draft().post().title, "Keep me");
        assert_eq!(editor.last_saved(), None);
    }

    #[test]
    fn test_apply_generated() {
        let (_, editor) = editor();
        editor.apply_generated(GenerationMode::Outline, "# Outline");
        assert_eq!(editor.draft().post().content, "# Outline");

        editor.apply_generated(GenerationMode::Full, "More");
        assert_eq!(editor.draft().post().content, "# Outline\n\nMore");

        editor.apply_generated(GenerationMode::Summary, "Short.");
        editor.apply_generated(GenerationMode::Summary, "Shorter.");
        assert_eq!(editor.draft().post().excerpt, "Shorter.");
        assert_eq!(editor.draft().post().content, "# Outline\n\nMore");
    }

    #[test]
    fn test_generate_topic_fallback() {
        let (_, editor) = editor();
        assert!(!editor.generate(&Echo, GenerationMode::Outline, ""));
        assert_eq!(editor.draft().post().content, "");

        editor.update(|p| p.title = "Rust".to_owned());
        assert!(editor.generate(&Echo, GenerationMode::Outline, ""));
        assert_eq!(editor.draft().post().content, "outline:Rust");

        assert!(editor.generate(&Echo, GenerationMode::Summary, "explicit"));
        assert_eq!(editor.draft().post().excerpt, "summary:explicit");
    }

    #[test]
    fn test_generate_failure_inserts_message() {
        let (_, editor) = editor();
        assert!(editor.generate(&Failing, GenerationMode::Full, "topic"));
        assert_eq!(editor.draft().post().content, SERVICE_ERROR_MESSAGE);
    }

    #[test]
    fn test_concurrent_saves_do_not_lose_the_post() {
        let (kv, editor) = editor();
        let editor = Arc::new(editor);
        editor.update(|p| p.title = "Race".to_owned());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let editor = Arc::clone(&editor);
                thread::spawn(move || {
                    for n in 0..25 {
                        editor.update(|p| p.content = format!("{i}-{n}"));
                        let trigger = if i % 2 == 0 {
                            SaveTrigger::Auto
                        } else {
                            SaveTrigger::Manual
                        };
                        editor.save(trigger).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        editor.save(SaveTrigger::Manual).unwrap();
        let posts = BlogStore::new(kv).list_posts().unwrap();
        let id = editor.draft().post().id.clone();
        let mine: Vec<&Post> = posts.iter().filter(|p| p.id == id).collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content, editor.draft().post().content);
        assert_eq!(posts.len(), 4);
    }
}
