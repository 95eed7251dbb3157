// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use serde::Serialize;

use super::literal::{ColorLiteral, ColorScale, ColorStyle, Rgba};

/// One textual rendering offered for a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPresentation {
    pub label: String,
    pub style: ColorStyle,
    pub with_alpha: bool,
}

/// Rendering of `rgba` in the style the literal was written in. Alpha is
/// shown when the literal had it or when it is no longer opaque.
pub fn default_presentation(literal: &ColorLiteral, rgba: Rgba) -> ColorPresentation {
    let with_alpha = literal.had_alpha || !rgba.is_opaque();
    render(rgba, literal.style, literal.scale, with_alpha)
}

/// Default rendering first, then the alternatives a host can offer, with
/// duplicate labels removed.
pub fn presentations(literal: &ColorLiteral, rgba: Rgba) -> Vec<ColorPresentation> {
    let with_alpha = literal.had_alpha || !rgba.is_opaque();
    let (other_style, other_scale) = match literal.style {
        ColorStyle::Tuple => (ColorStyle::Hex, ColorScale::Byte),
        ColorStyle::Hex => (ColorStyle::Tuple, ColorScale::Unit),
    };

    let mut candidates = vec![render(rgba, literal.style, literal.scale, with_alpha)];
    if rgba.is_opaque() {
        candidates.push(render(rgba, literal.style, literal.scale, !with_alpha));
    }
    candidates.push(render(rgba, other_style, other_scale, with_alpha));
    if rgba.is_opaque() {
        candidates.push(render(rgba, other_style, other_scale, !with_alpha));
    }

    let mut out: Vec<ColorPresentation> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !out.iter().any(|seen| seen.label == candidate.label) {
            out.push(candidate);
        }
    }
    out
}

fn render(
    rgba: Rgba,
    style: ColorStyle,
    scale: ColorScale,
    with_alpha: bool,
) -> ColorPresentation {
    let channels = rgba.channels();
    let shown = if with_alpha { &channels[..] } else { &channels[..3] };
    let label = match (style, scale) {
        (ColorStyle::Hex, _) => {
            let mut label = String::from("#");
            for value in shown {
                label.push_str(&format!("{:02X}", to_byte(*value)));
            }
            label
        }
        (ColorStyle::Tuple, ColorScale::Unit) => {
            format_tuple(shown.iter().map(|v| format!("{v:.6}")))
        }
        (ColorStyle::Tuple, ColorScale::Byte) => {
            format_tuple(shown.iter().map(|v| to_byte(*v).to_string()))
        }
    };
    ColorPresentation {
        label,
        style,
        with_alpha,
    }
}

fn format_tuple(parts: impl Iterator<Item = String>) -> String {
    format!("({})", parts.collect::<Vec<_>>().join(", "))
}

fn to_byte(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
