//! Persistence for [`SessionState`].
//!
//! Reads are forgiving: a missing, unreadable, or corrupt state file
//! loads as `None` so a bad document can never wedge the hooks. Writes
//! are atomic: the document is staged in a temp file next to its final
//! location and renamed into place, so readers never observe a
//! half-written file.

use std::io::Write;
use std::path::{Path, PathBuf};

use fs_err as fs;
use tempfile::NamedTempFile;

use crate::error::{Result, VigilError};
use crate::storage::StorageConfig;
use crate::types::SessionState;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path: config.session_state_file(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session state, if a usable one exists.
    ///
    /// A missing file is the normal first-run case and stays quiet;
    /// unreadable or unparseable files are logged and treated as absent.
    pub fn load(&self) -> Option<SessionState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session state");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt session state");
                None
            }
        }
    }

    /// Write the session state atomically.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| VigilError::NoParentDir(self.path.clone()))?;
        fs::create_dir_all(parent).map_err(|e| VigilError::Io {
            context: format!("creating {}", parent.display()),
            source: e,
        })?;

        let json = serde_json::to_string_pretty(state).map_err(|e| VigilError::Json {
            context: "serializing session state".to_string(),
            source: e,
        })?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| VigilError::Io {
            context: format!("creating temp file in {}", parent.display()),
            source: e,
        })?;
        temp.write_all(json.as_bytes()).map_err(|e| VigilError::Io {
            context: "writing session state".to_string(),
            source: e,
        })?;
        temp.persist(&self.path).map_err(|e| VigilError::Io {
            context: format!("persisting {}", self.path.display()),
            source: e.error,
        })?;
        Ok(())
    }
}
