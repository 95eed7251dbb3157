// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::ops::Range;

use serde::Serialize;

use crate::classifier::classify;
use crate::core::Document;

use super::literal::{parse_hex_at, parse_tuple_at, ColorLiteral, Rgba};
use super::presentation::default_presentation;

/// A color literal found in a document. `range` is a byte range into line
/// `line` (0-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMatch {
    pub line: usize,
    pub range: Range<usize>,
    pub rgba: Rgba,
    pub literal: ColorLiteral,
}

/// Keys containing `color` or `colour`, in any case.
pub fn is_color_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    lowered.contains("color") || lowered.contains("colour")
}

/// All color literals in the value of a color-named key-value line.
pub fn scan_line(line: &str) -> Vec<(Range<usize>, ColorLiteral)> {
    let classified = classify(line);
    let Some(span) = classified.key_value() else {
        return Vec::new();
    };
    if !is_color_key(span.key(line)) {
        return Vec::new();
    }

    let mut found = Vec::new();
    let mut idx = span.value.start;
    while idx < span.value.end {
        let parsed = match line.as_bytes()[idx] {
            b'(' => parse_tuple_at(line, idx),
            b'#' => parse_hex_at(line, idx),
            _ => None,
        };
        match parsed {
            Some((literal, end)) if end <= span.value.end => {
                found.push((idx..end, literal));
                idx = end;
            }
            _ => idx += 1,
        }
    }
    found
}

pub fn document_colors(text: &str) -> Vec<ColorMatch> {
    let doc = Document::parse(text);
    doc.texts()
        .enumerate()
        .flat_map(|(line_idx, line)| {
            scan_line(line)
                .into_iter()
                .map(move |(range, literal)| ColorMatch {
                    line: line_idx,
                    range,
                    rgba: literal.rgba,
                    literal,
                })
        })
        .collect()
}

/// Rewrites one matched literal in `line` using its default presentation for
/// `rgba`.
pub fn replace_color(line: &str, color: &ColorMatch, rgba: Rgba) -> String {
    let label = default_presentation(&color.literal, rgba).label;
    let mut out = String::with_capacity(line.len() + label.len());
    out.push_str(&line[..color.range.start]);
    out.push_str(&label);
    out.push_str(&line[color.range.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::{document_colors, is_color_key, replace_color, scan_line};
    use crate::color::literal::{ColorStyle, Rgba};

    #[test]
    fn color_key_match_is_case_insensitive_and_accepts_british_spelling() {
        assert!(is_color_key("paint_color"));
        assert!(is_color_key("ColourVariant"));
        assert!(is_color_key("COLOR"));
        assert!(!is_color_key("collar"));
        assert!(!is_color_key("name"));
    }

    #[test]
    fn only_color_keys_are_scanned() {
        assert!(scan_line("name: (1, 0, 0)").is_empty());
        assert!(scan_line("# color: (1, 0, 0)").is_empty());
        assert_eq!(scan_line("\tcolor: (1, 0, 0)").len(), 1);
    }

    #[test]
    fn multiple_literals_on_one_line_are_found_independently() {
        let line = "key_color: (1, 0, 0) #00FF00 (2, x, 3) #FFF (0, 0, 1, 0.5)";
        let found = scan_line(line);
        let texts: Vec<&str> = found.iter().map(|(range, _)| &line[range.clone()]).collect();
        assert_eq!(texts, vec!["(1, 0, 0)", "#00FF00", "(0, 0, 1, 0.5)"]);
        assert_eq!(found[1].1.style, ColorStyle::Hex);
        assert!(found[2].1.had_alpha);
    }

    #[test]
    fn document_colors_reports_line_and_range() {
        let text = "SiiNunit\n{\n\tname: x\n\tbase_color: #FF00CC\n}\n";
        let colors = document_colors(text);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].line, 3);
        assert_eq!(colors[0].range, 13..20);
        assert_eq!(colors[0].rgba.red, 1.0);
    }

    #[test]
    fn replace_color_keeps_surrounding_text_and_style() {
        let line = "\tkey_color: (0.320000, 0.010000, 0.060000) // tint";
        let colors = document_colors(line);
        let edited = replace_color(line, &colors[0], Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(edited, "\tkey_color: (1.000000, 0.500000, 0.000000) // tint");
    }
}
