// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Color literal parsing: `(r, g, b[, a])` tuples and `#RRGGBB[AA]` hex codes.

use serde::Serialize;

use crate::core::text_utils::skip_spaces_tabs;

/// Normalized color with every channel clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            alpha: clamp_unit(alpha),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 1.0
    }

    pub(crate) fn channels(&self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStyle {
    Tuple,
    Hex,
}

/// Numeric range the literal was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScale {
    Unit,
    Byte,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorLiteral {
    pub rgba: Rgba,
    pub style: ColorStyle,
    pub had_alpha: bool,
    pub scale: ColorScale,
}

/// Parses a tuple literal starting exactly at `start` (the `(`). Returns the
/// literal and the byte offset just past the closing `)`.
pub fn parse_tuple_at(text: &str, start: usize) -> Option<(ColorLiteral, usize)> {
    if text.as_bytes().get(start) != Some(&b'(') {
        return None;
    }
    let mut components = Vec::with_capacity(4);
    let mut idx = start + 1;
    loop {
        idx = skip_spaces_tabs(text, idx);
        let (value, end) = scan_number(text, idx)?;
        components.push(value);
        idx = skip_spaces_tabs(text, end);
        match text.as_bytes().get(idx) {
            Some(b',') if components.len() < 4 => idx += 1,
            Some(b')') if components.len() >= 3 => break,
            _ => return None,
        }
    }

    let scale = if components[..3].iter().any(|value| *value > 1.0) {
        ColorScale::Byte
    } else {
        ColorScale::Unit
    };
    let divisor = match scale {
        ColorScale::Byte => 255.0,
        ColorScale::Unit => 1.0,
    };
    let had_alpha = components.len() == 4;
    let alpha = components.get(3).map_or(1.0, |alpha| alpha / divisor);
    let rgba = Rgba::new(
        components[0] / divisor,
        components[1] / divisor,
        components[2] / divisor,
        alpha,
    );
    Some((
        ColorLiteral {
            rgba,
            style: ColorStyle::Tuple,
            had_alpha,
            scale,
        },
        idx + 1,
    ))
}

/// Parses a hex literal starting at `start` (the `#`). The run of hex digits
/// after the marker must be exactly 6 or 8 long.
pub fn parse_hex_at(text: &str, start: usize) -> Option<(ColorLiteral, usize)> {
    if text.as_bytes().get(start) != Some(&b'#') {
        return None;
    }
    let digits_start = start + 1;
    let digits_len = text[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_hexdigit)
        .count();
    if digits_len != 6 && digits_len != 8 {
        return None;
    }
    let digits = &text[digits_start..digits_start + digits_len];
    let channel = |offset: usize| -> Option<f64> {
        u8::from_str_radix(&digits[offset..offset + 2], 16)
            .ok()
            .map(|byte| f64::from(byte) / 255.0)
    };
    let alpha = if digits_len == 8 { channel(6)? } else { 1.0 };
    let rgba = Rgba::new(channel(0)?, channel(2)?, channel(4)?, alpha);
    Some((
        ColorLiteral {
            rgba,
            style: ColorStyle::Hex,
            had_alpha: digits_len == 8,
            scale: ColorScale::Byte,
        },
        digits_start + digits_len,
    ))
}

/// Parses a whole string as one color literal, ignoring surrounding spaces.
pub fn parse_color(text: &str) -> Option<ColorLiteral> {
    let trimmed = text.trim();
    let parsed = if trimmed.starts_with('#') {
        parse_hex_at(trimmed, 0)
    } else {
        parse_tuple_at(trimmed, 0)
    };
    parsed
        .filter(|(_, end)| *end == trimmed.len())
        .map(|(literal, _)| literal)
}

/// `[+-]? digits [. digits]` or `[+-]? . digits`.
fn scan_number(text: &str, start: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut idx = start;
    if matches!(bytes.get(idx), Some(b'+' | b'-')) {
        idx += 1;
    }
    let int_digits = count_digits(bytes, idx);
    idx += int_digits;
    if bytes.get(idx) == Some(&b'.') {
        let frac_digits = count_digits(bytes, idx + 1);
        if frac_digits == 0 {
            return None;
        }
        idx += 1 + frac_digits;
    } else if int_digits == 0 {
        return None;
    }
    let value: f64 = text[start..idx].parse().ok()?;
    value.is_finite().then_some((value, idx))
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}
