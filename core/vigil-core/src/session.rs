//! Session lifecycle: what happens on session start and stop.
//!
//! A start snapshots the repository, folds in whatever the previous
//! session left behind, and writes a fresh state document. Work
//! carries over (`current_task`, `task_stack`); observations do not
//! (`uncommitted_files` is re-derived, `notes` start empty). A stop
//! refreshes the existing document in place and appends a summary to
//! the session log. Both produce human-readable messages for the hook
//! binary to print; neither assumes git or an existing state file.

use std::path::Path;

use chrono::Utc;
use fs_err as fs;

use crate::error::{Result, VigilError};
use crate::git;
use crate::logs;
use crate::storage::StorageConfig;
use crate::store::SessionStore;
use crate::types::SessionState;

/// Most changed files shown in a preview before eliding the rest.
pub const MAX_FILES_SHOWN: usize = 5;
/// Most stacked tasks shown in a preview.
pub const MAX_TASKS_SHOWN: usize = 3;

pub struct StartReport {
    pub state: SessionState,
    pub messages: Vec<String>,
}

pub struct StopReport {
    pub messages: Vec<String>,
}

pub struct SessionLifecycle {
    config: StorageConfig,
    store: SessionStore,
}

impl SessionLifecycle {
    pub fn new(config: StorageConfig) -> Self {
        let store = SessionStore::new(&config);
        Self { config, store }
    }

    /// Handle session start: snapshot the repository, carry over the
    /// previous session's tasks, persist the new state.
    pub fn start(&self, session_id: &str, workdir: &Path) -> Result<StartReport> {
        self.config.ensure_dirs().map_err(|e| VigilError::Io {
            context: format!("creating {}", self.config.root().display()),
            source: e,
        })?;

        let changes = git::status_lines(workdir);
        let branch = git::current_branch(workdir);
        let current_task = read_current_task(&self.config.current_task_file());
        let previous = self.store.load();

        let messages = start_messages(&changes, &branch, current_task.as_deref(), previous.as_ref());
        let state = new_session_state(session_id, previous.as_ref(), changes);
        self.store.save(&state)?;

        Ok(StartReport { state, messages })
    }

    /// Handle session stop: refresh the state document and log the
    /// session. Without a usable state document only the messages are
    /// produced; nothing is written.
    ///
    /// The log entry is keyed by the stopping event's session id, which
    /// can differ from the id stored at start when state was carried
    /// across a restart.
    pub fn stop(&self, session_id: &str, workdir: &Path) -> Result<StopReport> {
        let state = self.store.load();
        let changes = git::status_lines(workdir);
        let messages = stop_messages(&changes, state.as_ref());

        if let Some(mut state) = state {
            let ended_at = Utc::now().to_rfc3339();
            state.last_activity = ended_at.clone();
            state.uncommitted_files = changes;
            self.store.save(&state)?;
            logs::append_session_entry(
                &self.config.session_log_file(),
                session_id,
                &state.started_at,
                &ended_at,
                &state.uncommitted_files,
            )?;
        }

        Ok(StopReport { messages })
    }
}

/// Derive the state for a new session from whatever the previous one
/// left behind.
pub fn new_session_state(
    session_id: &str,
    previous: Option<&SessionState>,
    uncommitted_files: Vec<String>,
) -> SessionState {
    let now = Utc::now().to_rfc3339();
    SessionState {
        session_id: session_id.to_string(),
        started_at: now.clone(),
        last_activity: now,
        current_task: previous.and_then(|p| p.current_task.clone()),
        task_stack: previous.map(|p| p.task_stack.clone()).unwrap_or_default(),
        uncommitted_files,
        notes: Vec::new(),
    }
}

fn read_current_task(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Messages
// ═══════════════════════════════════════════════════════════════════════════

pub fn start_messages(
    changes: &[String],
    branch: &str,
    current_task: Option<&str>,
    previous: Option<&SessionState>,
) -> Vec<String> {
    let mut messages = Vec::new();

    if changes.is_empty() {
        messages.push(format!("✓ Clean working tree on branch '{}'", branch));
    } else {
        messages.push(format!(
            "⚠️ {} uncommitted changes on branch '{}'",
            changes.len(),
            branch
        ));
        let mut preview = changes
            .iter()
            .take(MAX_FILES_SHOWN)
            .map(|f| format!("  {}", f))
            .collect::<Vec<_>>()
            .join("\n");
        if changes.len() > MAX_FILES_SHOWN {
            preview.push_str(&format!(
                "\n  ... and {} more",
                changes.len() - MAX_FILES_SHOWN
            ));
        }
        messages.push(preview);
    }

    if let Some(task) = current_task {
        messages.push(format!("\n📋 Current Task:\n{}", task));
    }

    if let Some(previous) = previous {
        if !previous.task_stack.is_empty() {
            messages.push(format!(
                "\n📚 Task Stack ({} items):",
                previous.task_stack.len()
            ));
            for (i, task) in previous.task_stack.iter().take(MAX_TASKS_SHOWN).enumerate() {
                messages.push(format!("  {}. [{}] {}", i + 1, task.priority, task.title));
            }
        }
    }

    messages
}

pub fn stop_messages(changes: &[String], state: Option<&SessionState>) -> Vec<String> {
    let mut messages = Vec::new();

    if !changes.is_empty() {
        messages.push(format!("\n⚠️  {} uncommitted changes:", changes.len()));
        for file in changes.iter().take(MAX_FILES_SHOWN) {
            messages.push(format!("   {}", file));
        }
        if changes.len() > MAX_FILES_SHOWN {
            messages.push(format!("   ... and {} more", changes.len() - MAX_FILES_SHOWN));
        }
        messages.push("\n💡 Consider committing before ending session".to_string());
    }

    if let Some(state) = state {
        if !state.task_stack.is_empty() {
            messages.push(format!(
                "\n📚 Pending tasks in stack: {}",
                state.task_stack.len()
            ));
            for task in state.task_stack.iter().take(MAX_TASKS_SHOWN) {
                messages.push(format!("   [{}] {}", task.priority, task.title));
            }
        }
    }

    messages
}
