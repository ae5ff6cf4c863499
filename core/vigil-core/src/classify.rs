//! Classification tables for hook events.
//!
//! Everything rule-shaped lives here: which paths are too sensitive to
//! auto-stage, which tools modify files, what a user prompt is trying
//! to do, and how compiler output is parsed. Handlers stay free of
//! inline regexes and string tables.
//!
//! ## Design Principles
//!
//! - Tables are data, matching is mechanical. Adding a rule means
//!   adding a row, not a branch.
//! - Prompt rules cover English and Japanese phrasing side by side.
//! - First match wins for intents; table order is the precedence.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ErrorInfo, ErrorKind};

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid classification regex"))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Sensitive Paths
// ═══════════════════════════════════════════════════════════════════════════

/// Paths that must never be auto-staged. Matched against the raw path
/// string as reported by the tool event, not a canonicalized form.
pub static SENSITIVE_PATH_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\.env$",
        r"\.env\..+$",
        r"(?i)credentials",
        r"(?i)secrets?",
        r"\.pem$",
        r"\.key$",
        r"node_modules",
        r"\.git/",
        r"\.DS_Store$",
    ])
});

pub fn is_sensitive_path(path: &str) -> bool {
    SENSITIVE_PATH_RULES.iter().any(|rule| rule.is_match(path))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tools
// ═══════════════════════════════════════════════════════════════════════════

/// Tools whose successful use means a file on disk changed.
pub const FILE_MODIFYING_TOOLS: [&str; 3] = ["Edit", "Write", "MultiEdit"];

pub fn modifies_files(tool_name: &str) -> bool {
    FILE_MODIFYING_TOOLS.contains(&tool_name)
}

// ═══════════════════════════════════════════════════════════════════════════
// Prompt Intents
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Planning,
    Implementation,
    Debugging,
    Review,
    Testing,
    Refactoring,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Planning => "planning",
            Intent::Implementation => "implementation",
            Intent::Debugging => "debugging",
            Intent::Review => "review",
            Intent::Testing => "testing",
            Intent::Refactoring => "refactoring",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Intent::Planning => "📋",
            Intent::Implementation => "🔨",
            Intent::Debugging => "🐛",
            Intent::Review => "👀",
            Intent::Testing => "🧪",
            Intent::Refactoring => "♻️",
        }
    }

    /// One-line workflow hint surfaced alongside the detected intent.
    pub fn hint(&self) -> &'static str {
        match self {
            Intent::Planning => {
                "Consider using /plan command or planner agent for structured planning"
            }
            Intent::Implementation => {
                "Remember: TDD approach - write tests first, then implement"
            }
            Intent::Debugging => "Check error logs, add strategic console.log, use debugger",
            Intent::Review => {
                "Use /review command for comprehensive code review with security checks"
            }
            Intent::Testing => "Use /tdd command for test-driven development workflow",
            Intent::Refactoring => {
                "Ensure tests pass before and after refactoring (Green → Refactor → Green)"
            }
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Intent rules in precedence order: the first category with a matching
/// pattern wins, so a prompt like "plan the implementation" classifies
/// as planning.
pub static INTENT_RULES: Lazy<Vec<(Intent, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            Intent::Planning,
            compile(&[
                r"(?i)\bplan\b",
                "設計",
                r"(?i)\barchitect",
                r"(?i)\bdesign\b",
                "どうやって|どうする",
                "方針",
            ]),
        ),
        (
            Intent::Implementation,
            compile(&[
                "実装",
                r"(?i)\bimplement",
                r"(?i)\bcreate\b",
                "作って|作る|作成",
                r"(?i)\badd\b",
                "追加",
                r"(?i)\bwrite\b",
                "書いて|書く",
            ]),
        ),
        (
            Intent::Debugging,
            compile(&[
                r"(?i)\bdebug",
                r"(?i)\bfix\b",
                r"(?i)\berror",
                "修正",
                "バグ",
                "直して|直す",
                "動かない|動きません",
            ]),
        ),
        (
            Intent::Review,
            compile(&[
                r"(?i)\breview",
                "レビュー",
                r"(?i)\bcheck\b",
                "確認",
                r"(?i)\bverify\b",
                "検証",
            ]),
        ),
        (
            Intent::Testing,
            compile(&[r"(?i)\btest", "テスト", r"(?i)\btdd\b", r"(?i)\bspec\b"]),
        ),
        (
            Intent::Refactoring,
            compile(&[r"(?i)\brefactor", "リファクタ", r"(?i)\bclean\b", "整理", "改善"]),
        ),
    ]
});

pub fn detect_intent(prompt: &str) -> Option<Intent> {
    INTENT_RULES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(prompt)))
        .map(|(intent, _)| *intent)
}

// ═══════════════════════════════════════════════════════════════════════════
// Security Keywords
// ═══════════════════════════════════════════════════════════════════════════

/// Prompt fragments that suggest the user is touching secrets or auth.
pub static SECURITY_KEYWORDS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\bpassword",
        r"(?i)\bsecret",
        r"(?i)\btoken",
        r"(?i)\bapi[_-]?key",
        r"(?i)\bcredential",
        r"(?i)\bauth",
    ])
});

pub fn mentions_credentials(prompt: &str) -> bool {
    SECURITY_KEYWORDS.iter().any(|rule| rule.is_match(prompt))
}

// ═══════════════════════════════════════════════════════════════════════════
// Compiler Output
// ═══════════════════════════════════════════════════════════════════════════

/// Matches one diagnostic line of `tsc --noEmit --pretty false` output,
/// e.g. `src/app.ts(10,5): error TS2304: Cannot find name 'foo'.`
static COMPILER_ERROR_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d+),\d+\):\s*error\s*(TS\d+):\s*(.+)").expect("valid compiler line regex")
});

/// Fix hints for the diagnostic codes that come up most in practice.
pub const ERROR_SUGGESTIONS: [(&str, &str); 7] = [
    ("TS2304", "Check if the name is imported or declared"),
    (
        "TS2339",
        "Verify the property exists on the type, or add type assertion",
    ),
    ("TS2345", "Check argument types match parameter types"),
    (
        "TS2322",
        "Verify the assigned value matches the expected type",
    ),
    (
        "TS7006",
        "Add type annotation or enable noImplicitAny: false",
    ),
    ("TS2307", "Check module path and ensure file exists"),
    (
        "TS1005",
        "Check for missing syntax elements (brackets, semicolons)",
    ),
];

pub fn suggestion_for(code: &str) -> Option<&'static str> {
    ERROR_SUGGESTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, hint)| *hint)
}

/// Parse one compiler output line into a structured error, attributed
/// to `file`. Lines that are not diagnostics yield `None`.
pub fn parse_compiler_error_line(file: &str, line: &str) -> Option<ErrorInfo> {
    let caps = COMPILER_ERROR_LINE.captures(line)?;
    let code = &caps[2];
    Some(ErrorInfo {
        file: file.to_string(),
        kind: ErrorKind::Typescript,
        line: caps[1].parse().ok(),
        message: format!("{}: {}", code, &caps[3]),
        suggestion: suggestion_for(code).map(String::from),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// File Extensions
// ═══════════════════════════════════════════════════════════════════════════

pub fn is_typescript_file(path: &str) -> bool {
    matches!(extension(path), Some("ts") | Some("tsx"))
}

pub fn is_javascript_family(path: &str) -> bool {
    matches!(
        extension(path),
        Some("ts") | Some("tsx") | Some("js") | Some("jsx")
    )
}

fn extension(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_paths_are_excluded() {
        let sensitive = [
            ".env",
            "config/.env",
            ".env.local",
            ".env.production",
            "aws-credentials.json",
            "CREDENTIALS.txt",
            "secrets.yaml",
            "my-secret.txt",
            "server.pem",
            "id_rsa.key",
            "node_modules/pkg/index.js",
            ".git/config",
            "photos/.DS_Store",
        ];
        for path in sensitive {
            assert!(is_sensitive_path(path), "expected {} to be sensitive", path);
        }
    }

    #[test]
    fn test_ordinary_paths_are_not_sensitive() {
        let ordinary = [
            "src/index.ts",
            "package.json",
            "README.md",
            ".envrc",
            "src/environment.ts",
            "keyboard.go",
        ];
        for path in ordinary {
            assert!(!is_sensitive_path(path), "expected {} to be ordinary", path);
        }
    }

    #[test]
    fn test_sensitive_rule_table_is_complete() {
        assert_eq!(SENSITIVE_PATH_RULES.len(), 9);
    }

    #[test]
    fn test_only_editing_tools_modify_files() {
        assert!(modifies_files("Edit"));
        assert!(modifies_files("Write"));
        assert!(modifies_files("MultiEdit"));
        assert!(!modifies_files("Read"));
        assert!(!modifies_files("Bash"));
        assert!(!modifies_files("Glob"));
        assert!(!modifies_files(""));
    }

    #[test]
    fn test_intent_precedence_is_table_order() {
        let order: Vec<Intent> = INTENT_RULES.iter().map(|(intent, _)| *intent).collect();
        assert_eq!(
            order,
            vec![
                Intent::Planning,
                Intent::Implementation,
                Intent::Debugging,
                Intent::Review,
                Intent::Testing,
                Intent::Refactoring,
            ]
        );
    }

    #[test]
    fn test_detects_english_intents() {
        assert_eq!(
            detect_intent("let's architect the system"),
            Some(Intent::Planning)
        );
        assert_eq!(
            detect_intent("implement the parser"),
            Some(Intent::Implementation)
        );
        assert_eq!(detect_intent("fix the bug"), Some(Intent::Debugging));
        assert_eq!(detect_intent("verify the output"), Some(Intent::Review));
        assert_eq!(detect_intent("run the unit tests"), Some(Intent::Testing));
        assert_eq!(
            detect_intent("refactor this module"),
            Some(Intent::Refactoring)
        );
    }

    #[test]
    fn test_detects_japanese_intents() {
        assert_eq!(detect_intent("方針を決めよう"), Some(Intent::Planning));
        assert_eq!(detect_intent("実装してください"), Some(Intent::Implementation));
        assert_eq!(detect_intent("動かないので見てほしい"), Some(Intent::Debugging));
        assert_eq!(detect_intent("レビューお願いします"), Some(Intent::Review));
        assert_eq!(detect_intent("リファクタリングしたい"), Some(Intent::Refactoring));
    }

    #[test]
    fn test_planning_outranks_implementation() {
        assert_eq!(
            detect_intent("plan the implementation"),
            Some(Intent::Planning)
        );
    }

    #[test]
    fn test_unclassified_prompts_yield_none() {
        assert_eq!(detect_intent("hello there"), None);
        assert_eq!(detect_intent("こんにちは"), None);
        assert_eq!(detect_intent(""), None);
    }

    #[test]
    fn test_intent_labels_match_display() {
        for (intent, _) in INTENT_RULES.iter() {
            assert_eq!(intent.to_string(), intent.label());
            assert!(!intent.hint().is_empty());
            assert!(!intent.emoji().is_empty());
        }
    }

    #[test]
    fn test_security_keywords() {
        assert!(mentions_credentials("update the password hashing"));
        assert!(mentions_credentials("rotate the API_KEY"));
        assert!(mentions_credentials("store the apikey somewhere safe"));
        assert!(mentions_credentials("add authentication middleware"));
        assert!(!mentions_credentials("refactor this module"));
        assert!(!mentions_credentials(""));
    }

    #[test]
    fn test_parses_compiler_error_line() {
        let line = "src/app.ts(10,5): error TS2304: Cannot find name 'foo'.";
        let info = parse_compiler_error_line("src/app.ts", line).unwrap();
        assert_eq!(info.file, "src/app.ts");
        assert_eq!(info.kind, ErrorKind::Typescript);
        assert_eq!(info.line, Some(10));
        assert_eq!(info.message, "TS2304: Cannot find name 'foo'.");
        assert_eq!(
            info.suggestion.as_deref(),
            Some("Check if the name is imported or declared")
        );
    }

    #[test]
    fn test_unknown_code_has_no_suggestion() {
        let line = "src/app.ts(3,1): error TS9999: Something new.";
        let info = parse_compiler_error_line("src/app.ts", line).unwrap();
        assert_eq!(info.message, "TS9999: Something new.");
        assert!(info.suggestion.is_none());
    }

    #[test]
    fn test_non_diagnostic_lines_are_ignored() {
        assert!(parse_compiler_error_line("a.ts", "").is_none());
        assert!(parse_compiler_error_line("a.ts", "Compilation complete.").is_none());
        assert!(parse_compiler_error_line("a.ts", "src/app.ts(10,5): warning").is_none());
    }

    #[test]
    fn test_suggestion_table_lookup() {
        assert!(suggestion_for("TS2307").is_some());
        assert!(suggestion_for("TS9999").is_none());
        for (code, hint) in ERROR_SUGGESTIONS {
            assert!(code.starts_with("TS"));
            assert!(!hint.is_empty());
        }
    }

    #[test]
    fn test_extension_helpers() {
        assert!(is_typescript_file("src/app.ts"));
        assert!(is_typescript_file("src/App.tsx"));
        assert!(!is_typescript_file("src/app.js"));
        assert!(is_javascript_family("a.ts"));
        assert!(is_javascript_family("a.tsx"));
        assert!(is_javascript_family("a.js"));
        assert!(is_javascript_family("a.jsx"));
        assert!(!is_javascript_family("a.go"));
        assert!(!is_javascript_family("Makefile"));
        assert!(is_typescript_file("file.test.ts"));
    }
}
