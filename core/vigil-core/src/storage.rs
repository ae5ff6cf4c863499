//! Storage layout for vigil's on-disk files.
//!
//! Everything vigil persists lives under a single status directory,
//! `~/.claude/status` by default. `StorageConfig` is the one place that
//! knows the layout; every other module asks it for paths instead of
//! assembling them ad hoc. Tests inject a temporary root via
//! [`StorageConfig::with_root`].

use std::path::{Path, PathBuf};

use crate::error::{Result, VigilError};

/// Directory under the home directory that holds all vigil state.
pub const STATUS_DIR: &str = ".claude/status";

/// Locations of vigil's persisted files.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl StorageConfig {
    /// Resolve the default storage root under the user's home directory.
    pub fn locate() -> Result<Self> {
        let home = dirs::home_dir().ok_or(VigilError::MissingHome)?;
        Ok(Self {
            root: home.join(STATUS_DIR),
        })
    }

    /// Use an explicit root instead of the home-based default.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// The status directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Session state document, rewritten on session start and stop.
    pub fn session_state_file(&self) -> PathBuf {
        self.root.join("session_state.json")
    }

    /// Free-form description of the task currently being worked on.
    /// Written by the user or other tooling; vigil only reads it.
    pub fn current_task_file(&self) -> PathBuf {
        self.root.join("current.md")
    }

    /// Append-only markdown log of completed sessions.
    pub fn session_log_file(&self) -> PathBuf {
        self.root.join("session_log.md")
    }

    /// Append-only markdown log of detected errors.
    pub fn error_log_file(&self) -> PathBuf {
        self.root.join("errors.md")
    }

    /// Queue directory for handoff files consumed by other tooling.
    /// Nothing in this crate writes to it; it only has to exist.
    pub fn queue_dir(&self) -> PathBuf {
        self.root.join("queue")
    }

    /// Directory for vigil's own diagnostic logs.
    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create the status and queue directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs_err::create_dir_all(&self.root)?;
        fs_err::create_dir_all(self.queue_dir())
    }
}
