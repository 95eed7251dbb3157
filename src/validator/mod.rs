// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Advisory check of key names against a known vocabulary.

mod vocabulary;

use std::ops::Range;

use serde::Serialize;

use crate::classifier::{
    classify, is_root_declaration, CLOSE_BLOCK_MARKER, DIRECTIVE_MARKER, OPEN_BLOCK_MARKER,
};
use crate::core::{Document, FileKind};

pub use vocabulary::{Vocabulary, VocabularyError};

/// Settings key that turns unknown-key findings off.
pub const UNKNOWN_KEYS_SETTING: &str = "siiforge.validation.unknownKeys";

/// An unknown key. `columns` is the byte span of the full key token,
/// including any `[]` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFinding {
    pub line_index: usize,
    pub key: String,
    pub columns: Range<usize>,
}

impl KeyFinding {
    pub fn message(&self) -> String {
        format!(
            "unknown key \"{}\" (disable with `{UNKNOWN_KEYS_SETTING}`)",
            self.key
        )
    }
}

#[derive(Debug, Clone)]
pub struct KeyValidator<'a> {
    vocabulary: &'a Vocabulary,
    file_kinds: Vec<FileKind>,
}

impl<'a> KeyValidator<'a> {
    /// Validator applying to primary unit files only.
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            file_kinds: FileKind::primary_kinds(),
        }
    }

    pub fn with_file_kinds(mut self, file_kinds: Vec<FileKind>) -> Self {
        self.file_kinds = file_kinds;
        self
    }

    pub fn applies_to(&self, kind: FileKind) -> bool {
        self.file_kinds.contains(&kind)
    }

    pub fn validate(&self, doc: &Document, kind: FileKind) -> Vec<KeyFinding> {
        if !self.applies_to(kind) {
            return Vec::new();
        }
        let mut findings = Vec::new();
        for (line_index, line) in doc.texts().enumerate() {
            if is_skipped(line) {
                continue;
            }
            let classified = classify(line);
            let Some(span) = classified.key_value() else {
                continue;
            };
            if !self.vocabulary.contains(span.base_key(line)) {
                findings.push(KeyFinding {
                    line_index,
                    key: span.key(line).to_string(),
                    columns: span.key.clone(),
                });
            }
        }
        findings
    }
}

/// Lines that never carry a checkable key.
fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let lone_marker = matches!(
        (chars.next(), chars.next()),
        (Some(OPEN_BLOCK_MARKER | CLOSE_BLOCK_MARKER), None)
    );
    trimmed.starts_with(DIRECTIVE_MARKER) || lone_marker || is_root_declaration(line)
}

pub fn validate(
    doc: &Document,
    kind: FileKind,
    vocabulary: &Vocabulary,
    file_kinds: &[FileKind],
) -> Vec<KeyFinding> {
    KeyValidator::new(vocabulary)
        .with_file_kinds(file_kinds.to_vec())
        .validate(doc, kind)
}
