//! Input Resolution
//!
//! Expands configured paths, globs and directories into an ordered,
//! deduplicated list of files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Resolves raw input entries against a base directory
pub struct InputResolver<'a> {
    base_dir: &'a Path,
    extensions: &'a [String],
    recursive: bool,
}

impl<'a> InputResolver<'a> {
    pub fn new(base_dir: &'a Path, extensions: &'a [String], recursive: bool) -> Self {
        Self {
            base_dir,
            extensions,
            recursive,
        }
    }

    /// Resolve every raw entry, keeping first-seen order
    pub fn resolve(&self, raw_inputs: &[String]) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for raw in raw_inputs {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let matches = self.expand(raw);
            debug!("🔎 '{}' matched {} path(s)", raw, matches.len());
            for path in matches {
                if path.is_file() && self.extension_allowed(&path) && seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        files
    }

    fn expand(&self, raw: &str) -> Vec<PathBuf> {
        let path = if Path::new(raw).is_absolute() {
            PathBuf::from(raw)
        } else {
            self.base_dir.join(raw)
        };

        if path.is_dir() {
            return self.walk_dir(&path);
        }

        if !has_wildcard(raw) {
            return if path.is_file() { vec![path] } else { Vec::new() };
        }

        let pattern = if Path::new(raw).is_absolute() {
            raw.to_string()
        } else {
            format!(
                "{}/{}",
                glob::Pattern::escape(&self.base_dir.to_string_lossy()),
                raw
            )
        };

        let mut matches = glob_paths(&pattern);
        if self.recursive && !raw.contains("**") {
            if let Some(implied) = implied_recursive(&pattern) {
                matches.extend(glob_paths(&implied));
            }
        }
        matches
    }

    fn walk_dir(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect()
    }

    fn extension_allowed(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()));
        match ext {
            Some(ext) => self.extensions.iter().any(|allowed| *allowed == ext),
            None => false,
        }
    }
}

fn has_wildcard(raw: &str) -> bool {
    raw.contains(['*', '?', '['])
}

/// Rewrite `parent/name` into `parent/**/name`
fn implied_recursive(pattern: &str) -> Option<String> {
    let (parent, name) = match pattern.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => (".", pattern),
    };
    if name.is_empty() {
        return None;
    }
    Some(format!("{}/**/{}", parent, name))
}

fn glob_paths(pattern: &str) -> Vec<PathBuf> {
    match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(|p| p.ok()).collect(),
        Err(e) => {
            warn!("⚠️ Invalid input pattern '{}': {}", pattern, e);
            Vec::new()
        }
    }
}
