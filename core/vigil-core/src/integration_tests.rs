//! End-to-end tests that drive the dispatcher with raw payloads, the
//! way the hook binary does.

use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

use crate::dispatch::{dispatch, HookOutcome, SESSION_START_HEADING, SESSION_STOP_HEADING};
use crate::events::HookPayload;
use crate::storage::StorageConfig;
use crate::store::SessionStore;
use crate::types::{TaskPriority, TaskState, TaskStatus};

fn payload(value: Value) -> HookPayload {
    serde_json::from_value(value).unwrap()
}

fn handled_messages(outcome: HookOutcome, expected_heading: Option<&'static str>) -> Vec<String> {
    match outcome {
        HookOutcome::Handled { heading, messages } => {
            assert_eq!(heading, expected_heading);
            messages
        }
        HookOutcome::Skipped { reason } => panic!("unexpectedly skipped: {}", reason),
    }
}

fn make_task(title: &str, priority: TaskPriority) -> TaskState {
    TaskState {
        id: format!("task-{}", title),
        title: title.to_string(),
        description: None,
        priority,
        status: TaskStatus::Pending,
        created_at: "2025-01-01T09:00:00+00:00".to_string(),
        updated_at: "2025-01-01T09:00:00+00:00".to_string(),
        context: None,
    }
}

struct Harness {
    _status_root: TempDir,
    workdir: TempDir,
    config: StorageConfig,
}

impl Harness {
    fn new() -> Self {
        let status_root = tempdir().unwrap();
        let workdir = tempdir().unwrap();
        let config = StorageConfig::with_root(status_root.path().join("status"));
        Self {
            _status_root: status_root,
            workdir,
            config,
        }
    }

    fn event(&self, name: &str, session_id: &str) -> Value {
        json!({
            "session_id": session_id,
            "transcript_path": "/tmp/transcript.jsonl",
            "hook_event_name": name,
            "cwd": self.workdir.path().to_str().unwrap()
        })
    }
}

#[test]
fn test_session_lifecycle_across_restarts() {
    let harness = Harness::new();
    let store = SessionStore::new(&harness.config);

    // First session starts with nothing carried over.
    let outcome = dispatch(
        &payload(harness.event("SessionStart", "sess-1")),
        &harness.config,
    )
    .unwrap();
    let messages = handled_messages(outcome, Some(SESSION_START_HEADING));
    assert_eq!(messages.len(), 1);

    let state = store.load().unwrap();
    assert_eq!(state.session_id, "sess-1");
    assert!(state.task_stack.is_empty());

    // Park some work, as task tooling would.
    let mut state = state;
    state.current_task = Some(make_task("active", TaskPriority::P1));
    state.task_stack = vec![
        make_task("parked-one", TaskPriority::P2),
        make_task("parked-two", TaskPriority::P3),
    ];
    store.save(&state).unwrap();

    // Stopping logs the session under the stopping event's id and
    // previews the pending stack.
    let outcome = dispatch(&payload(harness.event("Stop", "sess-1")), &harness.config).unwrap();
    let messages = handled_messages(outcome, Some(SESSION_STOP_HEADING));
    assert!(messages.contains(&"\n📚 Pending tasks in stack: 2".to_string()));

    let log = fs_err::read_to_string(harness.config.session_log_file()).unwrap();
    assert!(log.starts_with("# Claude Code Session Log"));
    assert!(log.contains("## Session: sess-1"));

    // The next session carries the parked work forward untouched.
    let outcome = dispatch(
        &payload(harness.event("SessionStart", "sess-2")),
        &harness.config,
    )
    .unwrap();
    let messages = handled_messages(outcome, Some(SESSION_START_HEADING));
    assert!(messages.contains(&"\n📚 Task Stack (2 items):".to_string()));
    assert!(messages.contains(&"  1. [p2] parked-one".to_string()));

    let state = store.load().unwrap();
    assert_eq!(state.session_id, "sess-2");
    assert_eq!(state.task_stack.len(), 2);
    assert_eq!(
        state.current_task.as_ref().map(|t| t.title.as_str()),
        Some("active")
    );
    assert!(state.notes.is_empty());

    // A second stop appends rather than overwrites.
    dispatch(&payload(harness.event("Stop", "sess-2")), &harness.config).unwrap();
    let log = fs_err::read_to_string(harness.config.session_log_file()).unwrap();
    assert!(log.contains("## Session: sess-1"));
    assert!(log.contains("## Session: sess-2"));
    assert_eq!(log.matches("# Claude Code Session Log").count(), 1);
}

#[test]
fn test_corrupt_state_does_not_break_the_lifecycle() {
    let harness = Harness::new();
    harness.config.ensure_dirs().unwrap();
    fs_err::write(harness.config.session_state_file(), "{broken").unwrap();

    let outcome = dispatch(
        &payload(harness.event("SessionStart", "sess-1")),
        &harness.config,
    )
    .unwrap();
    handled_messages(outcome, Some(SESSION_START_HEADING));

    let store = SessionStore::new(&harness.config);
    let state = store.load().unwrap();
    assert_eq!(state.session_id, "sess-1");
    assert!(state.task_stack.is_empty());
}

#[test]
fn test_stop_before_any_start_stays_quiet() {
    let harness = Harness::new();
    let outcome = dispatch(&payload(harness.event("Stop", "sess-1")), &harness.config).unwrap();
    let messages = handled_messages(outcome, Some(SESSION_STOP_HEADING));
    assert!(messages.is_empty());
    assert!(!harness.config.session_log_file().exists());
    assert!(!harness.config.session_state_file().exists());
}

#[test]
fn test_prompt_and_tool_events_do_not_touch_session_state() {
    let harness = Harness::new();

    let mut prompt_event = harness.event("UserPromptSubmit", "sess-1");
    prompt_event["prompt"] = json!("implement the login form");
    let outcome = dispatch(&payload(prompt_event), &harness.config).unwrap();
    let messages = handled_messages(outcome, None);
    assert_eq!(messages[0], "🔨 Detected intent: implementation");

    let mut tool_event = harness.event("PostToolUse", "sess-1");
    tool_event["tool_name"] = json!("Write");
    tool_event["tool_input"] = json!({"file_path": "notes.txt"});
    dispatch(&payload(tool_event), &harness.config).unwrap();

    assert!(!harness.config.session_state_file().exists());
}
