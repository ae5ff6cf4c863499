//! Decoding of incoming hook payloads.
//!
//! Claude Code delivers one JSON object on stdin per hook invocation.
//! The payload shape varies by event and evolves over time, so
//! [`HookPayload`] treats every field as optional and ignores unknown
//! keys. [`HookPayload::to_event`] then decides whether the payload is
//! one of the events vigil handles; everything else is silently
//! skipped rather than rejected.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

/// Raw hook payload, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookPayload {
    pub hook_event_name: Option<String>,
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
    pub cwd: Option<String>,
    pub prompt: Option<String>,
    pub stop_reason: Option<String>,
    pub tool_name: Option<String>,
    pub tool_input: Option<Value>,
    pub tool_response: Option<Value>,
}

/// A hook event vigil knows how to handle.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    SessionStart {
        session_id: String,
    },
    UserPromptSubmit {
        session_id: String,
        prompt: String,
    },
    PostToolUse {
        session_id: String,
        tool_name: String,
        file_path: Option<String>,
    },
    Stop {
        session_id: String,
    },
}

impl HookPayload {
    /// Interpret the payload as a handleable event.
    ///
    /// `None` means "not for us": an unknown event name or a payload
    /// missing the fields its event type needs. A `PostToolUse` without
    /// a file path is still an event; which tools carry paths is the
    /// dispatcher's business.
    pub fn to_event(&self) -> Option<HookEvent> {
        let session_id = self.session_id.clone()?;
        match self.hook_event_name.as_deref()? {
            "SessionStart" => Some(HookEvent::SessionStart { session_id }),
            "UserPromptSubmit" => Some(HookEvent::UserPromptSubmit {
                session_id,
                prompt: self.prompt.clone()?,
            }),
            "PostToolUse" => Some(HookEvent::PostToolUse {
                session_id,
                tool_name: self.tool_name.clone()?,
                file_path: self.tool_file_path(),
            }),
            "Stop" => Some(HookEvent::Stop { session_id }),
            _ => None,
        }
    }

    /// `tool_input.file_path`, when present and a string.
    pub fn tool_file_path(&self) -> Option<String> {
        self.tool_input
            .as_ref()?
            .get("file_path")?
            .as_str()
            .map(String::from)
    }

    /// Working directory for repository commands: the payload's `cwd`
    /// when given, the process working directory otherwise.
    pub fn resolve_cwd(&self) -> PathBuf {
        self.cwd
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
