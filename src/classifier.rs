// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Single-line classification shared by the formatter, color scanner, path
//! scanner and key validator.
//!
//! Classification is purely textual: a line is looked at in isolation and
//! anything that does not fit a known shape is reported as [`LineKind::Other`].
//! Key and value positions are byte ranges into the classified line so
//! callers can slice, highlight or rewrite without copying.

use std::ops::Range;

use crate::core::text_utils::{ident_end_at, leading_whitespace_len, skip_spaces_tabs};
use crate::core::Document;

const COMMENT_PREFIXES: &[&str] = &["//", "#", "/*", "*/", "*"];

pub const OPEN_BLOCK_MARKER: char = '{';
pub const CLOSE_BLOCK_MARKER: char = '}';
pub const DIRECTIVE_MARKER: char = '@';
const ARRAY_KEY_SUFFIX: &str = "[]";
/// Token opening every unit file.
pub const ROOT_DECLARATION: &str = "SiiNunit";

/// Byte ranges of the key token and the trimmed value of a `key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueSpan {
    pub key: Range<usize>,
    pub value: Range<usize>,
}

impl KeyValueSpan {
    pub fn key<'a>(&self, line: &'a str) -> &'a str {
        &line[self.key.clone()]
    }

    /// Key without the `[]` array suffix.
    pub fn base_key<'a>(&self, line: &'a str) -> &'a str {
        let key = self.key(line);
        key.strip_suffix(ARRAY_KEY_SUFFIX).unwrap_or(key)
    }

    pub fn value<'a>(&self, line: &'a str) -> &'a str {
        &line[self.value.clone()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Directive,
    BlockOpen,
    BlockClose,
    KeyValue(KeyValueSpan),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Nesting increases after this line is emitted.
    pub opens_block: bool,
}

impl ClassifiedLine {
    fn plain(kind: LineKind) -> Self {
        Self {
            kind,
            opens_block: false,
        }
    }

    pub fn key_value(&self) -> Option<&KeyValueSpan> {
        match &self.kind {
            LineKind::KeyValue(span) => Some(span),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }
}

pub fn classify(line: &str) -> ClassifiedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ClassifiedLine::plain(LineKind::Blank);
    }
    if COMMENT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return ClassifiedLine {
            kind: LineKind::Comment,
            opens_block: trimmed.ends_with(OPEN_BLOCK_MARKER),
        };
    }

    let opens_block = trimmed.ends_with(OPEN_BLOCK_MARKER);
    let kind = if trimmed.starts_with(DIRECTIVE_MARKER) {
        LineKind::Directive
    } else if trimmed.starts_with(CLOSE_BLOCK_MARKER) {
        LineKind::BlockClose
    } else if trimmed == "{" {
        LineKind::BlockOpen
    } else if let Some(span) = match_key_value(line) {
        LineKind::KeyValue(span)
    } else {
        LineKind::Other
    };

    ClassifiedLine { kind, opens_block }
}

pub fn is_root_declaration(line: &str) -> bool {
    line.trim() == ROOT_DECLARATION
}

pub fn classify_document(doc: &Document) -> Vec<ClassifiedLine> {
    doc.texts().map(classify).collect()
}

/// Matches `identifier[optional "[]"] : rest` after leading whitespace.
fn match_key_value(line: &str) -> Option<KeyValueSpan> {
    let start = leading_whitespace_len(line);
    let mut key_end = ident_end_at(line, start)?;
    if line[key_end..].starts_with(ARRAY_KEY_SUFFIX) {
        key_end += ARRAY_KEY_SUFFIX.len();
    }

    let colon = skip_spaces_tabs(line, key_end);
    if line.as_bytes().get(colon) != Some(&b':') {
        return None;
    }

    let rest = &line[colon + 1..];
    let value_start = colon + 1 + leading_whitespace_len(rest);
    let value_end = value_start + rest.trim().len();
    Some(KeyValueSpan {
        key: start..key_end,
        value: value_start..value_end,
    })
}
