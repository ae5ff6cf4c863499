//! Fail-soft git queries and staging.
//!
//! Hooks run in arbitrary directories on arbitrary machines: git may be
//! missing, the directory may not be a repository, the index may be
//! locked. Nothing here returns an error. Queries degrade to empty or
//! placeholder values and staging reports plain success or failure, so
//! callers never have to unwind because of repository trouble.

use std::path::Path;
use std::process::Command;

/// Uncommitted changes as `git status --porcelain` lines.
///
/// Empty when the tree is clean, the directory is not a repository, or
/// git is unavailable. Lines keep their two-column status prefix.
pub fn status_lines(workdir: &Path) -> Vec<String> {
    let output = match Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(workdir)
        .output()
    {
        Ok(output) if output.status.success() => output,
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::debug!(error = %e, "git status failed");
            return Vec::new();
        }
    };
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Current branch name, or `"unknown"` when it cannot be determined
/// (not a repository, detached HEAD, git unavailable).
pub fn current_branch(workdir: &Path) -> String {
    let output = match Command::new("git")
        .args(["branch", "--show-current"])
        .current_dir(workdir)
        .output()
    {
        Ok(output) if output.status.success() => output,
        Ok(_) | Err(_) => return "unknown".to_string(),
    };
    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() {
        "unknown".to_string()
    } else {
        branch
    }
}

/// Whether `workdir` is inside a git work tree.
pub fn in_work_tree(workdir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(workdir)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Whether `path` is already known to the index.
pub fn is_tracked(workdir: &Path, path: &str) -> bool {
    Command::new("git")
        .args(["ls-files", "--error-unmatch", path])
        .current_dir(workdir)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Stage `path`. Returns whether the index was updated.
pub fn stage(workdir: &Path, path: &str) -> bool {
    match Command::new("git")
        .args(["add", path])
        .current_dir(workdir)
        .output()
    {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(path, stderr = %stderr.trim(), "git add failed");
            false
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "git add failed");
            false
        }
    }
}
