// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::path::{Component, Path, PathBuf};

/// Roots a raw resource path can be resolved against. Every root is
/// optional; a missing root only removes its candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveContext {
    /// Directory of the document containing the path.
    pub source_dir: Option<PathBuf>,
    pub mod_root: Option<PathBuf>,
    /// Extracted base game data.
    pub game_data_root: Option<PathBuf>,
    /// Root searched by file name when no candidate exists.
    pub workspace_root: Option<PathBuf>,
}

impl ResolveContext {
    /// Context for a document at `source`, using its parent directory.
    pub fn for_source(source: &Path) -> Self {
        Self {
            source_dir: source.parent().map(Path::to_path_buf),
            ..Self::default()
        }
    }
}

/// Trims surrounding whitespace, then one leading and one trailing quote.
pub fn clean_raw(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}

/// Ordered probe list for `raw`. Candidates are lexically normalized; the
/// list may contain duplicates and is empty for an empty path.
pub fn candidate_paths(raw: &str, context: &ResolveContext) -> Vec<PathBuf> {
    let raw = clean_raw(raw);
    if raw.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    if is_drive_absolute(raw) {
        candidates.push(PathBuf::from(raw));
    } else if let Some(rooted) = raw.strip_prefix('/') {
        candidates.extend(context.mod_root.as_ref().map(|root| root.join(rooted)));
        candidates.extend(context.game_data_root.as_ref().map(|root| root.join(rooted)));
    } else {
        if let Some(source_dir) = &context.source_dir {
            candidates.push(source_dir.join(raw));
            if raw.starts_with("./") || raw.starts_with("../") {
                candidates.push(source_dir.join(raw));
            }
        }
        candidates.extend(context.mod_root.as_ref().map(|root| root.join(raw)));
        candidates.extend(context.game_data_root.as_ref().map(|root| root.join(raw)));
    }

    candidates.iter().map(|path| normalize_path(path)).collect()
}

/// `X:/...` or `X:\...`.
pub fn is_drive_absolute(raw: &str) -> bool {
    matches!(
        raw.as_bytes(),
        [letter, b':', b'/' | b'\\', ..] if letter.is_ascii_alphabetic()
    )
}

/// Folds `.` and `..` components without touching the filesystem. A `..`
/// above the root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::CurDir) | Some(Component::ParentDir) | None => {
                    out.push(Component::ParentDir.as_os_str());
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Last path segment, splitting on both separators.
pub fn file_name_of(raw: &str) -> &str {
    clean_raw(raw).rsplit(['/', '\\']).next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{
        candidate_paths, clean_raw, file_name_of, is_drive_absolute, normalize_path,
        ResolveContext,
    };
    use std::path::{Path, PathBuf};

    fn full_context() -> ResolveContext {
        ResolveContext {
            source_dir: Some(PathBuf::from("/mods/x/def/vehicle")),
            mod_root: Some(PathBuf::from("/mods/x")),
            game_data_root: Some(PathBuf::from("/data")),
            workspace_root: None,
        }
    }

    #[test]
    fn clean_raw_strips_quotes_independently() {
        assert_eq!(clean_raw("  \"/a/b.sii\" "), "/a/b.sii");
        assert_eq!(clean_raw("\"/a/b.sii"), "/a/b.sii");
        assert_eq!(clean_raw("/a/b.sii\""), "/a/b.sii");
        assert_eq!(clean_raw("\"\"x\"\""), "\"x\"");
    }

    #[test]
    fn rooted_path_prefers_mod_root_over_game_data() {
        assert_eq!(
            candidate_paths("/material/foo.mat", &full_context()),
            vec![
                PathBuf::from("/mods/x/material/foo.mat"),
                PathBuf::from("/data/material/foo.mat"),
            ]
        );
    }

    #[test]
    fn relative_path_tries_source_dir_then_roots() {
        assert_eq!(
            candidate_paths("truck.pmd", &full_context()),
            vec![
                PathBuf::from("/mods/x/def/vehicle/truck.pmd"),
                PathBuf::from("/mods/x/truck.pmd"),
                PathBuf::from("/data/truck.pmd"),
            ]
        );
    }

    #[test]
    fn dot_relative_path_probes_source_dir_twice() {
        let candidates = candidate_paths("../sound/horn.bank", &full_context());
        assert_eq!(candidates[0], PathBuf::from("/mods/x/def/sound/horn.bank"));
        assert_eq!(candidates[1], candidates[0]);
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn missing_roots_only_remove_candidates() {
        let context = ResolveContext::for_source(Path::new("/mods/x/def/a.sii"));
        assert!(candidate_paths("/material/foo.mat", &context).is_empty());
        assert_eq!(
            candidate_paths("b.sui", &context),
            vec![PathBuf::from("/mods/x/def/b.sui")]
        );
        assert!(candidate_paths("\"\"", &full_context()).is_empty());
    }

    #[test]
    fn drive_letter_paths_are_single_candidates() {
        assert!(is_drive_absolute("C:/games/ets2/base.scs"));
        assert!(is_drive_absolute("d:\\mods"));
        assert!(!is_drive_absolute("C:"));
        assert!(!is_drive_absolute("/C:/x"));
        assert_eq!(
            candidate_paths("C:/games/def.sii", &full_context()),
            vec![PathBuf::from("C:/games/def.sii")]
        );
    }

    #[test]
    fn normalize_folds_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
    }

    #[test]
    fn file_name_splits_on_either_separator() {
        assert_eq!(file_name_of("\"/model/truck.pmd\""), "truck.pmd");
        assert_eq!(file_name_of("C:\\mods\\a.sii"), "a.sii");
        assert_eq!(file_name_of("plain.tobj"), "plain.tobj");
    }
}
