//! The persisted token slot.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use log::debug;

use crate::runtime::Runtime;

/// One named slot holding the current bearer token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Keeps the token as the whole content of a single file.
pub struct FileTokenStore<R: Runtime> {
    runtime: R,
    path: PathBuf,
}

impl<R: Runtime> FileTokenStore<R> {
    pub fn new(runtime: R, path: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            path: path.into(),
        }
    }
}

impl<R: Runtime> TokenStore for FileTokenStore<R> {
    #[tracing::instrument(skip(self))]
    fn load(&self) -> Result<Option<String>> {
        if !self.runtime.exists(&self.path) {
            return Ok(None);
        }
        let content = self.runtime.read_to_string(&self.path)?;
        let token = content.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    #[tracing::instrument(skip(self, token))]
    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !self.runtime.exists(parent) {
                self.runtime.create_dir_all(parent)?;
            }
        }
        debug!("Writing session token to {:?}", self.path);
        self.runtime.write_private(&self.path, token.as_bytes())
    }

    #[tracing::instrument(skip(self))]
    fn clear(&self) -> Result<()> {
        if self.runtime.exists(&self.path) {
            debug!("Removing session token at {:?}", self.path);
            self.runtime.remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Process-local slot, for tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned slot still holds a valid Option<String>.
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
