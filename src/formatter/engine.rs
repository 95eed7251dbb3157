// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::classify_document;
use crate::core::Document;

use super::{
    collect_fallback_diagnostics, plan_document, render_plan, FormatterConfig,
    FormatterDiagnostic,
};

/// Formatter execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Check,
    Write,
    Stdout,
}

/// Aggregate formatter run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FormatterRunSummary {
    pub files_seen: usize,
    pub files_changed: usize,
    pub warnings: usize,
    pub files_with_warnings: usize,
}

impl FormatterRunSummary {
    fn record(&mut self, file: &FormatterFileReport) {
        self.files_seen += 1;
        self.files_changed += usize::from(file.changed);
        if !file.diagnostics.is_empty() {
            self.warnings += file.diagnostics.len();
            self.files_with_warnings += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterOutput {
    pub rendered: String,
    pub diagnostics: Vec<FormatterDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterFileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub diagnostics: Vec<FormatterDiagnostic>,
    #[serde(skip)]
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormatterRunReport {
    pub summary: FormatterRunSummary,
    pub files: Vec<FormatterFileReport>,
}

#[derive(Debug, Clone)]
pub struct FormatterEngine {
    config: FormatterConfig,
}

impl FormatterEngine {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Whether a host should run the formatter when a document is saved.
    pub fn formats_on_save(&self) -> bool {
        self.config.enabled && self.config.on_save
    }

    pub fn format_source_with_diagnostics(&self, source: &str) -> FormatterOutput {
        if !self.config.enabled {
            return FormatterOutput {
                rendered: source.to_string(),
                diagnostics: Vec::new(),
            };
        }
        let doc = Document::parse(source);
        let classified = classify_document(&doc);
        let diagnostics = collect_fallback_diagnostics(&doc, &classified);
        let plan = plan_document(&doc, &classified, &self.config);
        debug!(
            lines = doc.len(),
            changed = plan.changed_line_count(),
            "planned formatting"
        );
        let rendered = render_plan(&plan, &doc);
        FormatterOutput {
            rendered,
            diagnostics,
        }
    }

    pub fn format_source(&self, source: &str) -> String {
        self.format_source_with_diagnostics(source).rendered
    }

    pub fn format_path_to_string(&self, path: &Path) -> io::Result<String> {
        let input = fs::read_to_string(path)?;
        Ok(self.format_source(&input))
    }

    /// Formats one file; in write mode a changed file is saved back.
    pub fn format_file(&self, path: &Path, mode: FormatMode) -> io::Result<FormatterFileReport> {
        let input = fs::read_to_string(path)?;
        let FormatterOutput {
            rendered,
            diagnostics,
        } = self.format_source_with_diagnostics(&input);
        let changed = rendered != input;
        if changed && mode == FormatMode::Write {
            fs::write(path, &rendered)?;
            info!(path = %path.display(), "formatted file");
        }
        Ok(FormatterFileReport {
            path: path.to_path_buf(),
            changed,
            diagnostics,
            rendered,
        })
    }

    pub fn run_paths(
        &self,
        paths: &[PathBuf],
        mode: FormatMode,
    ) -> io::Result<FormatterRunSummary> {
        Ok(self.run_paths_with_report(paths, mode)?.summary)
    }

    /// Stops at the first file that cannot be read or written.
    pub fn run_paths_with_report(
        &self,
        paths: &[PathBuf],
        mode: FormatMode,
    ) -> io::Result<FormatterRunReport> {
        let files = paths
            .iter()
            .map(|path| self.format_file(path, mode))
            .collect::<io::Result<Vec<_>>>()?;
        let mut summary = FormatterRunSummary::default();
        for file in &files {
            summary.record(file);
        }
        debug!(?summary, "formatter run finished");
        Ok(FormatterRunReport { summary, files })
    }
}
