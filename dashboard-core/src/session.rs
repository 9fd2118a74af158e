//! Persisted session token.
//!
//! The token lives in a single named slot that survives restarts. Components
//! receive the store explicitly as an `Arc<dyn SessionStore>` instead of
//! reaching for a global.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::info;

use crate::config::project_dirs;

/// Name of the slot holding the bearer token.
pub const TOKEN_SLOT: &str = "weatherAppToken";

pub trait SessionStore: Send + Sync + Debug {
    /// Current token, if any. Empty tokens count as absent.
    fn token(&self) -> Result<Option<String>>;

    fn store_token(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn has_token(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "weatherAppToken", skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Keeps the token in a TOML file in the platform data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `<data dir>/session.toml`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(project_dirs()?.data_dir().join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.read()?.token.filter(|t| !t.is_empty()))
    }

    fn store_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let file = SessionFile { token: Some(token.to_string()) };
        let toml = toml::to_string(&file).context("Failed to serialize session")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;

        info!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file: {}", self.path.display())
            })?;
        }

        info!("session cleared");
        Ok(())
    }
}

/// Session kept only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_string())) }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.slot().clone().filter(|t| !t.is_empty()))
    }

    fn store_token(&self, token: &str) -> Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
