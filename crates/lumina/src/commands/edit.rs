//! `lumina edit` command implementation.
//!
//! The post content lives in a plain file while editing. A sync thread copies
//! file changes into the draft, the autosaver persists the draft on the
//! configured interval, and pressing Enter publishes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use clap::Args;
use lumina_editor::{Autosaver, Editor, parse_tags};
use lumina_kv::KvStore;
use lumina_store::Category;
use tracing::{debug, warn};

use crate::context::Context;
use crate::error::CliError;
use crate::output::Output;

/// How often the content file is re-read.
const SYNC_INTERVAL: Duration = Duration::from_millis(500);

/// Arguments for the edit command.
#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    /// File holding the post content. Created from the post if missing.
    file: PathBuf,

    /// Existing post to edit (default: new post).
    #[arg(long)]
    id: Option<String>,

    /// Post title.
    #[arg(short, long)]
    title: Option<String>,

    /// Short summary shown on post cards.
    #[arg(short, long)]
    excerpt: Option<String>,

    /// Post category.
    #[arg(long)]
    category: Option<Category>,

    /// Comma-separated tags.
    #[arg(long)]
    tags: Option<String>,
}

impl EditArgs {
    /// Execute the edit command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        ctx.require_admin()?;

        let defaults = ctx.draft_defaults();
        let editor = match &self.id {
            Some(id) => Editor::open(ctx.blog(), id, &defaults)?,
            None => Editor::new(ctx.blog(), &defaults),
        };
        self.apply_fields(&editor);

        if self.file.exists() {
            let content = std::fs::read_to_string(&self.file)?;
            editor.update(|post| post.content = content);
        } else {
            std::fs::write(&self.file, &editor.draft().post().content)?;
            output.warning(&format!("Created {}", self.file.display()));
        }

        let editor = Arc::new(editor);
        let sync = FileSync::spawn(Arc::clone(&editor), self.file.clone(), SYNC_INTERVAL);
        let autosaver = Autosaver::spawn(Arc::clone(&editor), ctx.autosave_interval());

        let draft = editor.draft();
        output.highlight(&format!("Editing post {}", draft.post().id));
        output.info(&format!(
            "Edit {} in any editor. Autosaving every {}s.",
            self.file.display(),
            ctx.autosave_interval().as_secs()
        ));
        output.info("Press Enter to publish, Ctrl+C to stop.");

        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;

        sync.stop();
        autosaver.stop();
        sync_file(&editor, &self.file)?;

        let post = editor.publish()?;
        output.success(&format!("Published \"{}\" ({})", post.title, post.id));
        if let Some(at) = editor.last_saved() {
            output.muted(&format!("Last saved {}", at.format("%H:%M:%S")));
        }
        Ok(())
    }

    fn apply_fields<S: KvStore>(&self, editor: &Editor<S>) {
        editor.update(|post| {
            if let Some(title) = &self.title {
                post.title.clone_from(title);
            }
            if let Some(excerpt) = &self.excerpt {
                post.excerpt.clone_from(excerpt);
            }
            if let Some(category) = self.category {
                post.category = category;
            }
            if let Some(tags) = &self.tags {
                post.tags = parse_tags(tags);
            }
        });
    }
}

/// Copy the file content into the draft if it changed.
fn sync_file<S: KvStore>(editor: &Editor<S>, path: &Path) -> Result<bool, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(editor.update(|post| {
        if post.content == content {
            false
        } else {
            post.content = content;
            true
        }
    }))
}

/// Background thread mirroring a file into the draft content.
///
/// Uses RAII pattern - dropping the handle stops the thread.
struct FileSync {
    shutdown: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FileSync {
    fn spawn<S>(editor: Arc<Editor<S>>, path: PathBuf, interval: Duration) -> Self
    where
        S: KvStore + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let thread = thread::spawn(move || {
            loop {
                match shutdown_rx.recv_timeout(interval) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                }

                match sync_file(&editor, &path) {
                    Ok(true) => debug!(path = %path.display(), "draft content updated"),
                    Ok(false) => {}
                    Err(error) => warn!(%error, path = %path.display(), "failed to read draft file"),
                }
            }
        });

        Self {
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    fn stop(self) {
        drop(self);
    }
}

impl Drop for FileSync {
    fn drop(&mut self) {
        self.shutdown.take();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("file sync thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_editor::DraftDefaults;
    use lumina_kv::MemoryStore;
    use lumina_store::BlogStore;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn editor() -> Arc<Editor<MemoryStore>> {
        Arc::new(Editor::new(
            BlogStore::new(MemoryStore::new()),
            &DraftDefaults::default(),
        ))
    }

    #[test]
    fn test_sync_file_reports_changes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("post.md");
        std::fs::write(&path, "# One").unwrap();

        let editor = editor();
        assert!(sync_file(&editor, &path).unwrap());
        assert!(!sync_file(&editor, &path).unwrap());
        assert_eq!(editor.draft().post().content, "# One");
    }

    #[test]
    fn test_file_sync_thread_follows_edits() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("post.md");
        std::fs::write(&path, "first").unwrap();

        let editor = editor();
        let sync = FileSync::spawn(Arc::clone(&editor), path.clone(), Duration::from_millis(10));
        std::fs::write(&path, "second").unwrap();
        thread::sleep(Duration::from_millis(200));
        sync.stop();

        assert_eq!(editor.draft().post().content, "second");
    }

    #[test]
    fn test_file_sync_stops_reading_after_stop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("post.md");
        std::fs::write(&path, "kept").unwrap();

        let editor = editor();
        let sync = FileSync::spawn(Arc::clone(&editor), path.clone(), Duration::from_secs(60));
        sync.stop();
        std::fs::write(&path, "ignored").unwrap();

        assert_eq!(editor.draft().post().content, "");
    }

    #[test]
    fn test_apply_fields() {
        let args = EditArgs {
            file: PathBuf::from("unused.md"),
            id: None,
            title: Some("Title".to_owned()),
            excerpt: None,
            category: Some(Category::Design),
            tags: Some("a, b".to_owned()),
        };
        let editor = editor();
        args.apply_fields(&editor);

        let draft = editor.draft();
        assert_eq!(draft.post().title, "Title");
        assert_eq!(draft.post().excerpt, "");
        assert_eq!(draft.post().category, Category::Design);
        assert_eq!(draft.post().tags, vec!["a", "b"]);
    }
}
