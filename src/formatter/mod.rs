// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Structural formatter for unit files.
//!
//! Formatting is a single pass over classified lines: block markers drive the
//! nesting level, runs of key-value lines at one level are buffered and
//! emitted with a shared colon column, and everything else is re-indented
//! with its content untouched. Running the formatter on its own output is a
//! no-op.

mod config;
mod diagnostics;
mod engine;
#[cfg(test)]
mod fixture_tests;
mod planner;
mod renderer;

pub use config::{
    ConfigError, FormatterConfig, IndentUnit, CONFIG_FILE_NAME, MAX_EMPTY_LINES_LIMIT,
};
pub use diagnostics::{collect_fallback_diagnostics, FormatterDiagnostic};
pub use engine::{
    FormatMode, FormatterEngine, FormatterFileReport, FormatterOutput, FormatterRunReport,
    FormatterRunSummary,
};
pub use planner::{plan_document, FormatPlan, PlannedLine};
pub use renderer::render_plan;
