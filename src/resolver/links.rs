// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::ops::Range;

use serde::Serialize;

use crate::classifier::{classify, LineKind};
use crate::core::Document;

/// A quoted resource path inside a document. `range` covers the text between
/// the quotes on line `line` (0-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathLiteral {
    pub line: usize,
    pub range: Range<usize>,
    pub raw: String,
}

/// Quoted strings in key-value values and directives that look like paths.
pub fn scan_resource_paths(text: &str) -> Vec<PathLiteral> {
    let doc = Document::parse(text);
    let mut found = Vec::new();
    for (line_idx, line) in doc.texts().enumerate() {
        let classified = classify(line);
        let search = match &classified.kind {
            LineKind::KeyValue(span) => span.value.clone(),
            LineKind::Directive => 0..line.len(),
            _ => continue,
        };
        for range in quoted_ranges(line, search) {
            let raw = &line[range.clone()];
            if looks_like_path(raw) {
                found.push(PathLiteral {
                    line: line_idx,
                    range,
                    raw: raw.to_string(),
                });
            }
        }
    }
    found
}

/// Contents of complete `"..."` strings inside `search`; backslash escapes a
/// quote.
fn quoted_ranges(line: &str, search: Range<usize>) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;
    let mut idx = search.start;
    while idx < search.end {
        match (bytes[idx], open) {
            (b'\\', Some(_)) => idx += 1,
            (b'"', None) => open = Some(idx + 1),
            (b'"', Some(start)) => {
                ranges.push(start..idx);
                open = None;
            }
            _ => {}
        }
        idx += 1;
    }
    ranges
}

fn looks_like_path(raw: &str) -> bool {
    if raw.is_empty() {
        return false;
    }
    raw.starts_with('/') || raw.contains('/') || has_extension(raw)
}

/// Ends in `.ext` where the extension starts with a letter.
fn has_extension(raw: &str) -> bool {
    let Some((stem, ext)) = raw.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && ext.starts_with(|ch: char| ch.is_ascii_alphabetic())
        && ext.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
