//! Core library for vigil, a lifecycle companion for Claude Code
//! sessions.
//!
//! Claude Code invokes the `vigil-hook` binary on lifecycle events
//! (session start, user prompt, tool use, stop). This crate implements
//! everything behind that binary: decoding payloads, classifying them,
//! maintaining the persisted session state, and producing the messages
//! the binary prints.
//!
//! ## Design Principles
//!
//! - **Fail soft**: a hook must never break the session it watches.
//!   Missing git, absent toolchains, and corrupt state degrade to
//!   empty results instead of errors.
//! - **One layout**: every persisted file lives under the status
//!   directory described by [`StorageConfig`].
//! - **Tables over branches**: classification rules are data in
//!   [`classify`], inspectable and testable on their own.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vigil_core::{dispatch, HookOutcome, HookPayload, StorageConfig};
//!
//! let payload: HookPayload = serde_json::from_str(&stdin_json)?;
//! let config = StorageConfig::locate()?;
//! match dispatch(&payload, &config)? {
//!     HookOutcome::Handled { messages, .. } => {
//!         for message in messages {
//!             println!("{}", message);
//!         }
//!     }
//!     HookOutcome::Skipped { .. } => {}
//! }
//! ```

pub mod checks;
pub mod classify;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod format;
pub mod git;
pub mod logs;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
mod integration_tests;

pub use classify::Intent;
pub use dispatch::{dispatch, HookOutcome, SESSION_START_HEADING, SESSION_STOP_HEADING};
pub use error::{Result, VigilError};
pub use events::{HookEvent, HookPayload};
pub use format::{FormatError, FormatResult};
pub use session::{SessionLifecycle, StartReport, StopReport};
pub use storage::StorageConfig;
pub use store::SessionStore;
pub use types::{ErrorInfo, ErrorKind, SessionState, TaskPriority, TaskState, TaskStatus};
