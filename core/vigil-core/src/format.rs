//! Post-edit file formatting.
//!
//! Routes an edited file to the formatter its extension calls for:
//! gofmt for Go, rustfmt for Rust, Biome or oxfmt for the
//! TypeScript/JavaScript family (whichever the project is configured
//! for), jq for JSON. Formatting is best-effort. Every outcome,
//! including "no formatter installed", is reported as a plain
//! [`FormatResult`] rather than an error.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use fs_err as fs;

/// Extensions the formatting pipeline knows how to route.
pub const FORMATTABLE_EXTENSIONS: [&str; 8] =
    ["go", "rs", "ts", "tsx", "js", "jsx", "json", "jsonc"];

/// Why a file could not be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    UnsupportedExtension,
    NoNodeModules,
    NoFormatterAvailable,
    GofmtFailed,
    RustfmtFailed,
    BiomeFailed,
    OxfmtFailed,
    JqFailed,
}

impl FormatError {
    /// Stable machine-readable code for logs and assertions.
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::UnsupportedExtension => "unsupported_extension",
            FormatError::NoNodeModules => "no_node_modules",
            FormatError::NoFormatterAvailable => "no_formatter_available",
            FormatError::GofmtFailed => "gofmt_failed",
            FormatError::RustfmtFailed => "rustfmt_failed",
            FormatError::BiomeFailed => "biome_failed",
            FormatError::OxfmtFailed => "oxfmt_failed",
            FormatError::JqFailed => "jq_failed",
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of one formatting attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatResult {
    pub formatted: bool,
    /// The formatter that ran (or was selected), when one was.
    pub formatter: Option<&'static str>,
    pub error: Option<FormatError>,
}

impl FormatResult {
    fn success(formatter: &'static str) -> Self {
        Self {
            formatted: true,
            formatter: Some(formatter),
            error: None,
        }
    }

    fn failure(error: FormatError) -> Self {
        Self {
            formatted: false,
            formatter: None,
            error: Some(error),
        }
    }

    fn failed(formatter: &'static str, error: FormatError) -> Self {
        Self {
            formatted: false,
            formatter: Some(formatter),
            error: Some(error),
        }
    }
}

pub fn is_formattable(path: &str) -> bool {
    extension_of(path).map_or(false, |ext| FORMATTABLE_EXTENSIONS.contains(&ext))
}

fn extension_of(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|ext| ext.to_str())
}

/// Format `path`, routing by extension.
pub fn format_file(path: &str, workdir: &Path) -> FormatResult {
    match extension_of(path) {
        Some("go") => run_formatter(
            "gofmt",
            "gofmt",
            &["-w", path],
            workdir,
            FormatError::GofmtFailed,
        ),
        Some("rs") => run_formatter(
            "rustfmt",
            "rustfmt",
            &[path],
            workdir,
            FormatError::RustfmtFailed,
        ),
        Some("ts") | Some("tsx") | Some("js") | Some("jsx") => format_javascript(path, workdir),
        Some("json") | Some("jsonc") => format_json(path, workdir),
        _ => FormatResult::failure(FormatError::UnsupportedExtension),
    }
}

fn run_formatter(
    name: &'static str,
    program: &str,
    args: &[&str],
    workdir: &Path,
    error: FormatError,
) -> FormatResult {
    match Command::new(program).args(args).current_dir(workdir).output() {
        Ok(output) if output.status.success() => FormatResult::success(name),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(formatter = name, stderr = %stderr.trim(), "formatter failed");
            FormatResult::failed(name, error)
        }
        Err(e) => {
            tracing::debug!(formatter = name, error = %e, "formatter unavailable");
            FormatResult::failed(name, error)
        }
    }
}

/// TypeScript/JavaScript formatting requires an installed toolchain
/// (`node_modules`) and a project config. Biome is preferred; oxfmt is
/// the fallback when Biome cannot format and an oxfmt config exists.
fn format_javascript(path: &str, workdir: &Path) -> FormatResult {
    if !workdir.join("node_modules").exists() {
        return FormatResult::failure(FormatError::NoNodeModules);
    }

    let has_biome =
        workdir.join("biome.json").exists() || workdir.join("biome.jsonc").exists();
    let has_oxfmt = workdir.join("oxfmt.toml").exists();

    if has_biome {
        let result = run_formatter(
            "biome",
            "npx",
            &["@biomejs/biome", "format", "--write", path],
            workdir,
            FormatError::BiomeFailed,
        );
        if result.formatted || !has_oxfmt {
            return result;
        }
    }
    if has_oxfmt {
        return run_formatter(
            "oxfmt",
            "npx",
            &["oxfmt", path],
            workdir,
            FormatError::OxfmtFailed,
        );
    }
    FormatResult::failure(FormatError::NoFormatterAvailable)
}

/// jq pretty-prints to stdout, so a successful run is written back
/// over the original file.
fn format_json(path: &str, workdir: &Path) -> FormatResult {
    let output = match Command::new("jq")
        .args([".", path])
        .current_dir(workdir)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "jq unavailable");
            return FormatResult::failed("jq", FormatError::JqFailed);
        }
    };
    if !output.status.success() || output.stdout.is_empty() {
        return FormatResult::failed("jq", FormatError::JqFailed);
    }

    let target = if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        workdir.join(path)
    };
    match fs::write(&target, &output.stdout) {
        Ok(()) => FormatResult::success("jq"),
        Err(e) => {
            tracing::debug!(error = %e, "writing formatted JSON failed");
            FormatResult::failed("jq", FormatError::JqFailed)
        }
    }
}
