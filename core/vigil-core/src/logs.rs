//! Append-only markdown logs for sessions and detected errors.
//!
//! Both logs use the same discipline: append an entry to the existing
//! file, create the file with its header when it does not exist yet,
//! and recreate it from the header when appending fails. A damaged log
//! costs history, never a hook run.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use fs_err as fs;

use crate::error::{Result, VigilError};
use crate::types::ErrorInfo;

const SESSION_LOG_HEADER: &str = "# Claude Code Session Log\n\n";
const ERROR_LOG_HEADER: &str = "# Error Log\n";

// ═══════════════════════════════════════════════════════════════════════════
// Session Log
// ═══════════════════════════════════════════════════════════════════════════

/// Render one completed-session entry.
pub fn format_session_entry(
    session_id: &str,
    started_at: &str,
    ended_at: &str,
    files: &[String],
) -> String {
    let file_list = if files.is_empty() {
        "  - (none)".to_string()
    } else {
        files
            .iter()
            .map(|f| format!("  - {}", f))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "\n## Session: {}\n- **Started**: {}\n- **Ended**: {}\n- **Uncommitted Files**: {}\n{}\n\n---\n",
        session_id,
        started_at,
        ended_at,
        files.len(),
        file_list
    )
}

pub fn append_session_entry(
    path: &Path,
    session_id: &str,
    started_at: &str,
    ended_at: &str,
    files: &[String],
) -> Result<()> {
    let entry = format_session_entry(session_id, started_at, ended_at, files);
    append_with_header(path, SESSION_LOG_HEADER, &entry)
}

// ═══════════════════════════════════════════════════════════════════════════
// Error Log
// ═══════════════════════════════════════════════════════════════════════════

/// Render one batch of detected errors.
pub fn format_error_entry(errors: &[ErrorInfo], timestamp: &str) -> String {
    let mut entry = format!("\n## Errors detected at {}\n\n", timestamp);
    for error in errors {
        match error.line {
            Some(line) => entry.push_str(&format!("### {}:{}\n", error.file, line)),
            None => entry.push_str(&format!("### {}\n", error.file)),
        }
        entry.push_str(&format!("- **Type**: {}\n", error.kind));
        entry.push_str(&format!("- **Message**: {}\n", error.message));
        if let Some(suggestion) = &error.suggestion {
            entry.push_str(&format!("- **Suggestion**: {}\n", suggestion));
        }
        entry.push('\n');
    }
    entry
}

/// Log a batch of detected errors, stamped with the current time.
/// An empty batch writes nothing.
pub fn append_error_entries(path: &Path, errors: &[ErrorInfo]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let entry = format_error_entry(errors, &Utc::now().to_rfc3339());
    append_with_header(path, ERROR_LOG_HEADER, &entry)
}

// ═══════════════════════════════════════════════════════════════════════════
// Shared Append Logic
// ═══════════════════════════════════════════════════════════════════════════

fn append_with_header(path: &Path, header: &str, entry: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if path.exists() {
        match try_append(path, entry) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "Appending to log failed, recreating it");
            }
        }
    }
    fs::write(path, format!("{}{}", header, entry)).map_err(|e| VigilError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })
}

fn try_append(path: &Path, entry: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new().append(true).open(path)?;
    file.write_all(entry.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use tempfile::tempdir;

    fn make_error(message: &str, line: Option<u32>, suggestion: Option<&str>) -> ErrorInfo {
        ErrorInfo {
            file: "src/app.ts".to_string(),
            kind: ErrorKind::Typescript,
            line,
            message: message.to_string(),
            suggestion: suggestion.map(String::from),
        }
    }

    #[test]
    fn test_session_entry_lists_files() {
        let entry = format_session_entry(
            "s-1",
            "2025-01-01T09:00:00+00:00",
            "2025-01-01T10:00:00+00:00",
            &["M  src/a.rs".to_string(), "?? notes.md".to_string()],
        );
        assert_eq!(
            entry,
            "\n## Session: s-1\n\
             - **Started**: 2025-01-01T09:00:00+00:00\n\
             - **Ended**: 2025-01-01T10:00:00+00:00\n\
             - **Uncommitted Files**: 2\n\
             \x20 - M  src/a.rs\n\
             \x20 - ?? notes.md\n\n\
             ---\n"
        );
    }

    #[test]
    fn test_session_entry_with_clean_tree() {
        let entry = format_session_entry("s-1", "a", "b", &[]);
        assert!(entry.contains("- **Uncommitted Files**: 0\n  - (none)\n"));
    }

    #[test]
    fn test_error_entry_includes_line_and_suggestion() {
        let errors = vec![make_error(
            "TS2304: Cannot find name 'foo'.",
            Some(10),
            Some("Check if the name is imported or declared"),
        )];
        let entry = format_error_entry(&errors, "2025-01-01T09:00:00+00:00");
        assert_eq!(
            entry,
            "\n## Errors detected at 2025-01-01T09:00:00+00:00\n\n\
             ### src/app.ts:10\n\
             - **Type**: typescript\n\
             - **Message**: TS2304: Cannot find name 'foo'.\n\
             - **Suggestion**: Check if the name is imported or declared\n\n"
        );
    }

    #[test]
    fn test_error_entry_without_line_or_suggestion() {
        let errors = vec![make_error("Biome lint errors detected", None, None)];
        let entry = format_error_entry(&errors, "t");
        assert!(entry.contains("### src/app.ts\n"));
        assert!(!entry.contains("- **Suggestion**"));
    }

    #[test]
    fn test_first_append_creates_file_with_header() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session_log.md");
        append_session_entry(&path, "s-1", "a", "b", &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Claude Code Session Log\n\n"));
        assert!(content.contains("## Session: s-1"));
    }

    #[test]
    fn test_later_appends_keep_earlier_entries() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session_log.md");
        append_session_entry(&path, "s-1", "a", "b", &[]).unwrap();
        append_session_entry(&path, "s-2", "c", "d", &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("# Claude Code Session Log").count(), 1);
        let first = content.find("## Session: s-1").unwrap();
        let second = content.find("## Session: s-2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_error_log_accumulates_batches() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("errors.md");
        append_error_entries(&path, &[make_error("first", None, None)]).unwrap();
        append_error_entries(&path, &[make_error("second", None, None)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("# Error Log").count(), 1);
        assert!(content.contains("first"));
        assert!(content.contains("second"));
    }

    #[test]
    fn test_empty_error_batch_writes_nothing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("errors.md");
        append_error_entries(&path, &[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_append_creates_missing_parent_directory() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("status").join("errors.md");
        append_error_entries(&path, &[make_error("first", None, None)]).unwrap();
        assert!(path.is_file());
    }
}
