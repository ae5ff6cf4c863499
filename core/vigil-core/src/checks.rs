//! Post-edit compiler and lint checks.
//!
//! Both checks are opportunistic: they run only when the edited file's
//! language matches and the project carries the relevant config
//! (`tsconfig.json` for the compiler, `biome.json`/`biome.jsonc` for
//! lint). Missing toolchains degrade to no findings. The two checks are
//! independent, so they run on separate threads and their findings are
//! concatenated, compiler first.

use std::path::Path;
use std::process::Command;
use std::thread;

use crate::classify;
use crate::types::{ErrorInfo, ErrorKind};

/// Most compiler diagnostic lines examined per run.
const MAX_COMPILER_LINES: usize = 5;

/// Run all applicable checks against the edited file.
pub fn detect_errors(file_path: &str, workdir: &Path) -> Vec<ErrorInfo> {
    thread::scope(|scope| {
        let compiler = scope.spawn(|| compiler_errors(file_path, workdir));
        let lint = scope.spawn(|| lint_errors(file_path, workdir));

        let mut errors = compiler.join().unwrap_or_default();
        errors.extend(lint.join().unwrap_or_default());
        errors
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// TypeScript Compiler
// ═══════════════════════════════════════════════════════════════════════════

fn compiler_errors(file_path: &str, workdir: &Path) -> Vec<ErrorInfo> {
    if !classify::is_typescript_file(file_path) {
        return Vec::new();
    }
    if !workdir.join("tsconfig.json").exists() {
        return Vec::new();
    }

    let output = match Command::new("npx")
        .args(["tsc", "--noEmit", "--pretty", "false"])
        .current_dir(workdir)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "tsc unavailable");
            return Vec::new();
        }
    };

    // tsc exits nonzero when it finds errors, so the exit status is not
    // checked here.
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    parse_compiler_output(file_path, &combined)
}

/// Keep the diagnostics that mention the edited file, cap them, and
/// parse what remains.
fn parse_compiler_output(file_path: &str, output: &str) -> Vec<ErrorInfo> {
    output
        .lines()
        .filter(|line| line.contains(file_path))
        .take(MAX_COMPILER_LINES)
        .filter_map(|line| classify::parse_compiler_error_line(file_path, line))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Biome Lint
// ═══════════════════════════════════════════════════════════════════════════

fn lint_errors(file_path: &str, workdir: &Path) -> Vec<ErrorInfo> {
    if !classify::is_javascript_family(file_path) {
        return Vec::new();
    }
    if !workdir.join("biome.json").exists() && !workdir.join("biome.jsonc").exists() {
        return Vec::new();
    }

    let output = match Command::new("npx")
        .args(["@biomejs/biome", "check", file_path])
        .current_dir(workdir)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "biome unavailable");
            return Vec::new();
        }
    };
    if output.status.success() {
        return Vec::new();
    }

    // Only biome's own report (stdout) counts. A failing npx writes its
    // complaints to stderr, and those are not lint findings.
    let report = String::from_utf8_lossy(&output.stdout);
    if report.contains("error") {
        vec![ErrorInfo {
            file: file_path.to_string(),
            kind: ErrorKind::Lint,
            line: None,
            message: "Biome lint errors detected".to_string(),
            suggestion: Some("Run 'npx biome check --write' to auto-fix".to_string()),
        }]
    } else {
        Vec::new()
    }
}
