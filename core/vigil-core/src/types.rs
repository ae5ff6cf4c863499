//! Shared data types for session state and detected errors.
//!
//! `SessionState` is the document persisted to `session_state.json`.
//! Its field names are part of the on-disk format and are shared with
//! other tooling that reads the status directory, so they are stable.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    P1,
    P2,
    P3,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskPriority::P1 => "p1",
            TaskPriority::P2 => "p2",
            TaskPriority::P3 => "p3",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

/// A single tracked task, either active or parked on the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskState {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// ISO-8601 timestamp.
    pub created_at: String,
    /// ISO-8601 timestamp.
    pub updated_at: String,
    /// Free-form extra data attached by whoever created the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Session State
// ═══════════════════════════════════════════════════════════════════════════

/// Snapshot of one working session, persisted across hook invocations.
///
/// A fresh session keeps the previous session's `current_task` and
/// `task_stack` (work survives restarts) but re-derives
/// `uncommitted_files` from the repository and starts `notes` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    /// ISO-8601 timestamp.
    pub started_at: String,
    /// ISO-8601 timestamp.
    pub last_activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<TaskState>,
    #[serde(default)]
    pub task_stack: Vec<TaskState>,
    #[serde(default)]
    pub uncommitted_files: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Detected Errors
// ═══════════════════════════════════════════════════════════════════════════

/// Category of a detected issue. Only `Typescript` and `Lint` are
/// produced by the current checks; the other categories are reserved
/// for future check kinds and already understood by the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Typescript,
    Lint,
    Test,
    Build,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Typescript => "typescript",
            ErrorKind::Lint => "lint",
            ErrorKind::Test => "test",
            ErrorKind::Build => "build",
        };
        f.write_str(label)
    }
}

/// One issue found in a file after an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub file: String,
    pub kind: ErrorKind,
    pub line: Option<u32>,
    pub message: String,
    pub suggestion: Option<String>,
}
