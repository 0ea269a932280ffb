//! Shared state for command execution.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use lumina_ai::GeminiClient;
use lumina_config::{CliSettings, Config};
use lumina_editor::DraftDefaults;
use lumina_kv::FileStore;
use lumina_store::{BlogStore, Session, SessionStore};
use tracing::debug;

use crate::error::CliError;

/// Options accepted by every command.
#[derive(Args, Debug)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover lumina.toml).
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Directory holding blog data (overrides config).
    #[arg(long, global = true, env = "LUMINA_DATA_DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Seconds between autosaves while editing (overrides config).
    #[arg(long, global = true)]
    pub(crate) autosave_secs: Option<u64>,

    /// API key for the AI writing assistant (overrides config).
    #[arg(long, global = true)]
    pub(crate) api_key: Option<String>,

    /// Enable verbose output (shows info-level logs).
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

/// Loaded configuration and the store it points at.
pub(crate) struct Context {
    pub(crate) config: Config,
    kv: Arc<FileStore>,
}

impl Context {
    /// Load configuration and open the data directory.
    pub(crate) fn load(args: &GlobalArgs) -> Result<Self, CliError> {
        let cli_settings = CliSettings {
            data_dir: args.data_dir.clone(),
            autosave_interval_secs: args.autosave_secs,
            ai_api_key: args.api_key.clone(),
        };
        let config = Config::load(args.config.as_deref(), Some(&cli_settings))?;
        let data_dir = config.storage_resolved.data_dir.clone();
        debug!(data_dir = %data_dir.display(), "using data directory");

        Ok(Self {
            config,
            kv: Arc::new(FileStore::new(data_dir)),
        })
    }

    /// Post and comment gateway.
    pub(crate) fn blog(&self) -> BlogStore<Arc<FileStore>> {
        BlogStore::new(Arc::clone(&self.kv))
    }

    /// Session gateway.
    pub(crate) fn sessions(&self) -> SessionStore<Arc<FileStore>> {
        SessionStore::new(Arc::clone(&self.kv))
    }

    /// Current session.
    pub(crate) fn session(&self) -> Result<Session, CliError> {
        Ok(self.sessions().load()?)
    }

    /// Fail unless the admin area is unlocked.
    pub(crate) fn require_admin(&self) -> Result<(), CliError> {
        if self.session()?.is_admin() {
            Ok(())
        } else {
            Err(CliError::Unauthorized(
                "admin login required: run `lumina session admin <password>`".to_owned(),
            ))
        }
    }

    /// Defaults for new drafts.
    pub(crate) fn draft_defaults(&self) -> DraftDefaults {
        DraftDefaults {
            cover_image: self.config.editor.default_cover_image.clone(),
            read_time: self.config.editor.default_read_time.clone(),
        }
    }

    /// Autosave period.
    pub(crate) fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.config.editor.autosave_interval_secs)
    }

    /// Client for the configured AI service.
    pub(crate) fn ai_client(&self) -> GeminiClient {
        let ai = &self.config.ai;
        GeminiClient::with_timeout(
            &ai.api_key,
            &ai.model,
            &ai.base_url,
            Duration::from_secs(ai.timeout_secs),
        )
    }
}
