// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Small byte-level scanning helpers shared by the line-based analyses.

pub fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

pub fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

pub fn skip_spaces_tabs(input: &str, mut idx: usize) -> usize {
    let bytes = input.as_bytes();
    while idx < bytes.len() && (bytes[idx] == b' ' || bytes[idx] == b'\t') {
        idx += 1;
    }
    idx
}

/// Byte length of the leading whitespace of `line`.
pub fn leading_whitespace_len(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Returns the end of the identifier starting at `start`, if one starts there.
pub fn ident_end_at(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let first = *bytes.get(start)?;
    if !is_ident_start(first) {
        return None;
    }
    let mut idx = start + 1;
    while idx < bytes.len() && is_ident_char(bytes[idx]) {
        idx += 1;
    }
    Some(idx)
}
