// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Resource path resolution.
//!
//! A raw path from a unit file is turned into an ordered list of candidate
//! locations under the document's directory, the mod root and the game data
//! root. The first candidate that is a regular file wins; otherwise the
//! workspace is searched by file name.

mod candidates;
mod fallback;
mod links;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use candidates::{
    candidate_paths, clean_raw, file_name_of, is_drive_absolute, normalize_path, ResolveContext,
};
pub use fallback::{find_by_file_name, FALLBACK_RESULT_LIMIT};
pub use links::{scan_resource_paths, PathLiteral};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot search '{}' for fallback matches: {source}", path.display())]
    FallbackRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a resolved path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "index")]
pub enum Origin {
    /// Index into the candidate list.
    Candidate(usize),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Resolution {
    Found { path: PathBuf, origin: Origin },
    NotFound,
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolution::Found { path, .. } => Some(path),
            Resolution::NotFound => None,
        }
    }
}

/// Probes every candidate in order, then falls back to a file-name search of
/// the workspace root. Only an unreadable workspace root is an error.
pub fn resolve(raw: &str, context: &ResolveContext) -> Result<Resolution, ResolveError> {
    let candidates = candidate_paths(raw, context);
    if let Some(index) = candidates.iter().position(|path| probe(path)) {
        return Ok(Resolution::Found {
            path: candidates[index].clone(),
            origin: Origin::Candidate(index),
        });
    }

    let file_name = file_name_of(raw);
    let Some(root) = context.workspace_root.as_deref() else {
        return Ok(Resolution::NotFound);
    };
    if file_name.is_empty() {
        return Ok(Resolution::NotFound);
    }
    let matches = find_by_file_name(root, file_name, FALLBACK_RESULT_LIMIT)?;
    Ok(match matches.into_iter().next() {
        Some(path) => Resolution::Found {
            path,
            origin: Origin::Fallback,
        },
        None => Resolution::NotFound,
    })
}

/// True for an existing regular file. Errors other than "not found" are
/// logged and treated as a miss.
fn probe(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => false,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "candidate probe failed");
            false
        }
    }
}
