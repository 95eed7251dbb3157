// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::ResolveError;

/// Upper bound on file-name matches collected by one search.
pub const FALLBACK_RESULT_LIMIT: usize = 10;

/// Directories never descended into during the file-name search.
const SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    ".vscode",
    ".idea",
    "dist",
    "build",
    "out",
];

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
}

/// Files under `root` named exactly `file_name`, in file-name-sorted walk
/// order, at most `limit` of them.
pub fn find_by_file_name(
    root: &Path,
    file_name: &str,
    limit: usize,
) -> Result<Vec<PathBuf>, ResolveError> {
    fs::read_dir(root).map_err(|source| ResolveError::FallbackRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut matches = Vec::new();
    if file_name.is_empty() || limit == 0 {
        return Ok(matches);
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err
                    .io_error()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
                {
                    warn!("Permission denied during fallback search: {}", err);
                } else {
                    debug!("Error during fallback search: {}", err);
                }
                continue;
            }
        };
        if entry.file_type().is_file() && entry.file_name().to_str() == Some(file_name) {
            matches.push(entry.into_path());
            if matches.len() >= limit {
                break;
            }
        }
    }
    debug!(
        root = %root.display(),
        file_name,
        found = matches.len(),
        "fallback search finished"
    );
    Ok(matches)
}
