use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning a directory for phrase tables.
pub struct ScanResult {
    /// Candidate table paths, sorted for deterministic run order.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

pub fn find_tables(
    root: &Path,
    extension: &str,
    output_suffix: &str,
    ignore_patterns: &[String],
) -> ScanResult {
    let mut files: Vec<String> = Vec::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(err) => warn!("invalid ignore pattern {p:?}: {err}"),
            }
        } else {
            // Literal path mode: anchor under the scan root for prefix matching
            literal_ignore_paths.push(root.join(p));
        }
    }

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                skipped_count += 1;
                warn!("cannot access path: {err}");
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        // Check if path matches any literal ignore path (prefix match)
        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        // Check if path matches any glob pattern
        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() && is_candidate_table(path, extension, output_suffix) {
            files.push(path_str.into_owned());
        }
    }

    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}

/// A candidate carries the table extension and is not one of our own
/// outputs. Without the suffix check, every run would enqueue the
/// previous run's results as fresh inputs.
fn is_candidate_table(path: &Path, extension: &str, output_suffix: &str) -> bool {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    if !has_extension {
        return false;
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    output_suffix.is_empty() || !stem.ends_with(output_suffix)
}
