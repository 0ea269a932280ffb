//! Periodic background saving.

use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use lumina_kv::KvStore;
use tracing::{debug, warn};

use crate::editor::{Editor, SaveOutcome, SaveTrigger};

/// Handle for a running autosave thread.
///
/// Uses RAII pattern - dropping the handle stops the thread and waits for an
/// in-flight save to finish.
pub struct Autosaver {
    shutdown: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Save `editor` every `interval` until the handle is dropped.
    ///
    /// Failed saves are logged and retried on the next tick.
    pub fn spawn<S>(editor: Arc<Editor<S>>, interval: Duration) -> Self
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

                match editor.save(SaveTrigger::Auto) {
                    Ok(SaveOutcome::Saved { at }) => debug!(%at, "autosaved"),
                    Ok(SaveOutcome::Skipped) => {}
                    Err(error) => warn!(%error, "autosave failed"),
                }
            }
            debug!("autosave stopped");
        });

        Self {
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    /// Stop autosaving (consumes the handle).
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.shutdown.take();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("autosave thread panicked");
        }
    }
}
