// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid vocabulary '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Set of known key names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    keys: HashSet<String>,
}

impl Vocabulary {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// One key per line; blank lines and `#` comments are skipped.
    pub fn from_word_list(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// A JSON array of key names when the file starts with `[`, otherwise a
    /// word list.
    pub fn load_from_path(path: &Path) -> Result<Self, VocabularyError> {
        let text = fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = if text.trim_start().starts_with('[') {
            let keys: Vec<String> =
                serde_json::from_str(&text).map_err(|source| VocabularyError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            keys.into_iter().collect()
        } else {
            Self::from_word_list(&text)
        };
        debug!(path = %path.display(), keys = vocabulary.len(), "loaded vocabulary");
        Ok(vocabulary)
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
