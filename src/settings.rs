// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Host settings (the `siiforge` section of an editor's JSON settings) mapped
//! onto each service's configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::FileKind;
use crate::formatter::{ConfigError, FormatterConfig, IndentUnit, MAX_EMPTY_LINES_LIMIT};
use crate::resolver::ResolveContext;

pub const SETTINGS_SECTION: &str = "siiforge";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSettings {
    pub mod_root: Option<PathBuf>,
    pub game_data_root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSettings {
    pub unknown_keys: bool,
    pub file_kinds: Vec<FileKind>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            unknown_keys: true,
            file_kinds: FileKind::primary_kinds(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub format: FormatterConfig,
    pub paths: PathSettings,
    pub validation: ValidationSettings,
}

impl Settings {
    /// Reads a JSON settings document holding a `siiforge` section.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::default();
        settings.update_from_workspace_settings(Some(&value));
        debug!(path = %path.display(), "loaded workspace settings");
        Ok(settings)
    }

    /// Applies every recognized key that is present; missing keys keep their
    /// current value and malformed ones are ignored with a warning.
    pub fn update_from_workspace_settings(&mut self, settings: Option<&Value>) {
        let Some(settings) = settings else {
            return;
        };
        let Some(root) = settings.get(SETTINGS_SECTION) else {
            return;
        };

        if let Some(format) = root.get("format") {
            self.update_format(format);
        }
        if let Some(paths) = root.get("paths") {
            if let Some(path) = read_optional_path(paths.get("modRoot")) {
                self.paths.mod_root = path;
            }
            if let Some(path) = read_optional_path(paths.get("gameDataRoot")) {
                self.paths.game_data_root = path;
            }
        }
        if let Some(validation) = root.get("validation") {
            if let Some(enabled) = validation.get("unknownKeys").and_then(Value::as_bool) {
                self.validation.unknown_keys = enabled;
            }
            if let Some(kinds) = read_string_array(validation.get("fileKinds")) {
                self.validation.file_kinds = kinds
                    .iter()
                    .filter_map(|kind| {
                        let parsed = FileKind::parse(kind);
                        if parsed.is_none() {
                            warn!(kind = %kind, "ignoring unknown file kind in settings");
                        }
                        parsed
                    })
                    .collect();
            }
        }
    }

    fn update_format(&mut self, format: &Value) {
        let config = &mut self.format;
        if let Some(value) = format.get("enabled").and_then(Value::as_bool) {
            config.enabled = value;
        }
        if let Some(value) = format.get("onSave").and_then(Value::as_bool) {
            config.on_save = value;
        }
        if let Some(value) = format.get("alignColons").and_then(Value::as_bool) {
            config.align_colons = value;
        }
        if let Some(value) = format.get("maxEmptyLines").and_then(Value::as_u64) {
            config.max_empty_lines = clamp_max_empty_lines(value);
        }
        if let Some(value) = format.get("trimTrailingWhitespace").and_then(Value::as_bool) {
            config.trim_trailing_whitespace = value;
        }
        if let Some(value) = format.get("spaceAfterCommaInTuples").and_then(Value::as_bool) {
            config.space_after_comma_in_tuples = value;
        }
        if let Some(value) = format.get("indentUnit") {
            let parsed = match value {
                Value::String(text) => IndentUnit::parse(text),
                Value::Number(number) => number
                    .as_u64()
                    .map(|width| width.to_string())
                    .ok_or_else(|| format!("invalid indent unit {number}"))
                    .and_then(|width| IndentUnit::parse(&width)),
                other => Err(format!("invalid indent unit {other}")),
            };
            match parsed {
                Ok(unit) => config.indent_unit = unit,
                Err(err) => warn!("{err}"),
            }
        }
    }

    /// Resolver roots for a document at `source`.
    pub fn resolve_context(&self, source: &Path, workspace_root: Option<&Path>) -> ResolveContext {
        ResolveContext {
            mod_root: self.paths.mod_root.clone(),
            game_data_root: self.paths.game_data_root.clone(),
            workspace_root: workspace_root.map(Path::to_path_buf),
            ..ResolveContext::for_source(source)
        }
    }
}

/// Values above the config file limit are clamped and reported.
fn clamp_max_empty_lines(value: u64) -> usize {
    let requested = usize::try_from(value).unwrap_or(usize::MAX);
    if requested > MAX_EMPTY_LINES_LIMIT {
        warn!(
            value,
            max = MAX_EMPTY_LINES_LIMIT,
            "clamping maxEmptyLines from settings"
        );
        return MAX_EMPTY_LINES_LIMIT;
    }
    requested
}

fn read_string_array(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect()
    })
}

/// `Some(None)` clears the setting (JSON null or an empty string).
fn read_optional_path(value: Option<&Value>) -> Option<Option<PathBuf>> {
    value.map(|v| {
        v.as_str()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(PathBuf::from)
    })
}
