// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path containment and edit-affordance checks.
//!
//! Configuration can reference paths anywhere on the filesystem. Only
//! paths that actually live under the job directory may be offered for
//! viewing, and only a small allow-list of suffixes for editing; the
//! decision is made on normalized absolute paths so `..` sequences and
//! symlinks cannot smuggle a path past the root.

use std::path::{Component, Path, PathBuf};

/// Extensions that may be offered for editing. Everything else is
/// view-only; the list gates write access, so the default is deny.
const EDITABLE_EXTENSIONS: &[&str] = &["cxml", "xml", "txt"];

/// Outcome of resolving a candidate path against a job directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path lives under the job directory; `relative` is its
    /// root-relative suffix with `/` separators (empty for the root
    /// itself).
    Contained { relative: String },
    /// The path normalizes outside the job directory. Only the absolute
    /// path is carried; no link should be offered.
    External { path: PathBuf },
}

impl Resolution {
    pub fn is_contained(&self) -> bool {
        matches!(self, Resolution::Contained { .. })
    }
}

/// Decide whether `candidate` lives under `job_root`.
///
/// Both sides are normalized before comparison: existing paths are
/// canonicalized (resolving symlinks), paths that do not exist yet are
/// normalized lexically after being absolutized against `job_root`. A
/// candidate whose literal string starts with the root but normalizes
/// elsewhere is external.
pub fn resolve(candidate: &Path, job_root: &Path) -> Resolution {
    let root = normalize(job_root, Path::new("."));
    let path = normalize(candidate, job_root);

    match path.strip_prefix(&root) {
        Ok(rel) => Resolution::Contained { relative: to_slash(rel) },
        Err(_) => Resolution::External { path },
    }
}

/// Whether the file may be offered for editing.
///
/// Explicit allow-list match on the extension; anything without a
/// matching extension is denied.
pub fn is_editable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EDITABLE_EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
}

/// Absolute, normalized form of `path`.
///
/// Canonicalization is preferred (it resolves symlinks); when the path
/// does not exist yet it falls back to lexical `.`/`..` resolution.
/// Relative paths are taken as relative to `base`.
fn normalize(path: &Path, base: &Path) -> PathBuf {
    let absolute = if path.is_absolute() { path.to_path_buf() } else { base.join(path) };
    if let Ok(canonical) = absolute.canonicalize() {
        return canonical;
    }

    // Not on disk yet: resolve dot components lexically, then canonicalize
    // the deepest existing ancestor so a symlinked prefix still compares
    // equal to a canonicalized root.
    let lexical = lexical_normalize(&absolute);
    let mut existing = lexical.clone();
    let mut tail = Vec::new();
    while !existing.as_os_str().is_empty() {
        if let Ok(canonical) = existing.canonicalize() {
            let mut out = canonical;
            for component in tail.iter().rev() {
                out.push(component);
            }
            return out;
        }
        match existing.file_name() {
            Some(name) => {
                tail.push(name.to_os_string());
                existing.pop();
            }
            None => break,
        }
    }
    lexical
}

/// Resolve `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // popping past the filesystem root leaves it at the root
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Join path components with `/` regardless of platform separator.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
