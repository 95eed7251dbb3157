// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use crate::core::Document;

use super::FormatPlan;

/// Joins planned lines with the source's preferred line ending, keeping a
/// final newline only when the source had one.
pub fn render_plan(plan: &FormatPlan, source_doc: &Document) -> String {
    let line_ending = source_doc.preferred_line_ending().as_str();

    let mut out = String::new();
    let mut emitted_any = false;
    for line in plan.emitted_lines() {
        if emitted_any {
            out.push_str(line_ending);
        }
        out.push_str(line);
        emitted_any = true;
    }

    if emitted_any && source_doc.has_final_newline() {
        out.push_str(line_ending);
    }
    out
}
