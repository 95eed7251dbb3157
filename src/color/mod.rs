// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Color literals on color-named keys: detection, normalization to RGBA and
//! style-preserving presentation back to text.

mod literal;
mod presentation;
mod scanner;

pub use literal::{parse_color, ColorLiteral, ColorScale, ColorStyle, Rgba};
pub use presentation::{default_presentation, presentations, ColorPresentation};
pub use scanner::{document_colors, is_color_key, replace_color, scan_line, ColorMatch};
