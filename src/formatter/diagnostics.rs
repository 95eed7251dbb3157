// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use serde::Serialize;

use crate::classifier::{is_root_declaration, ClassifiedLine, LineKind};
use crate::core::Document;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterDiagnostic {
    pub line_number: usize,
    pub message: String,
}

/// Reports lines the formatter only re-indented because they match no known
/// line shape. The root declaration line is expected and not reported.
pub fn collect_fallback_diagnostics(
    doc: &Document,
    classified: &[ClassifiedLine],
) -> Vec<FormatterDiagnostic> {
    let mut diagnostics = Vec::new();
    for (idx, (line, class)) in doc.texts().zip(classified).enumerate() {
        if class.kind == LineKind::Other && !is_root_declaration(line) {
            diagnostics.push(FormatterDiagnostic {
                line_number: idx + 1,
                message: "Formatter preserved unrecognized line content; only indentation was normalized"
                    .to_string(),
            });
        }
    }
    diagnostics
}
