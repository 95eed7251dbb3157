// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".siifmt.toml";
pub const MAX_EMPTY_LINES_LIMIT: usize = 10;

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentUnit {
    #[default]
    Tab,
    Spaces(usize),
}

impl IndentUnit {
    /// Accepts `"tab"`, a literal tab, a run of spaces, or a space count.
    pub fn parse(value: &str) -> Result<Self, String> {
        if value.eq_ignore_ascii_case("tab") || value == "\t" {
            return Ok(Self::Tab);
        }
        if !value.is_empty() && value.bytes().all(|byte| byte == b' ') {
            return Ok(Self::Spaces(value.len()));
        }
        match value.trim().parse::<usize>() {
            Ok(0) => Err("indent unit must be at least one space".to_string()),
            Ok(width) => Ok(Self::Spaces(width)),
            Err(_) => Err(format!(
                "invalid indent unit {value:?}: expected \"tab\", spaces, or a space count"
            )),
        }
    }

    pub fn text(self) -> String {
        match self {
            Self::Tab => "\t".to_string(),
            Self::Spaces(width) => " ".repeat(width),
        }
    }

    pub fn render(self, level: usize) -> String {
        self.text().repeat(level)
    }
}

impl Display for IndentUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab => f.write_str("tab"),
            Self::Spaces(width) => write!(f, "{width} spaces"),
        }
    }
}

impl Serialize for IndentUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text())
    }
}

impl<'de> Deserialize<'de> for IndentUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawIndent {
            Text(String),
            Width(usize),
        }

        match RawIndent::deserialize(deserializer)? {
            RawIndent::Text(text) => IndentUnit::parse(&text).map_err(serde::de::Error::custom),
            RawIndent::Width(0) => Err(serde::de::Error::custom(
                "indent unit must be at least one space",
            )),
            RawIndent::Width(width) => Ok(IndentUnit::Spaces(width)),
        }
    }
}

/// Formatter settings used by the formatting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatterConfig {
    pub enabled: bool,
    #[serde(alias = "on_save")]
    pub on_save: bool,
    #[serde(alias = "align_colons")]
    pub align_colons: bool,
    #[serde(alias = "max_empty_lines")]
    pub max_empty_lines: usize,
    #[serde(alias = "trim_trailing_whitespace")]
    pub trim_trailing_whitespace: bool,
    #[serde(alias = "space_after_comma_in_tuples")]
    pub space_after_comma_in_tuples: bool,
    #[serde(alias = "indent_unit")]
    pub indent_unit: IndentUnit,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            on_save: true,
            align_colons: true,
            max_empty_lines: 1,
            trim_trailing_whitespace: true,
            space_after_comma_in_tuples: true,
            indent_unit: IndentUnit::Tab,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{key}' must be between 0 and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: usize,
        max: usize,
    },
}

impl FormatterConfig {
    /// Loads a `.siifmt.toml` file. Keys live either at the root or in a
    /// `[formatter]` section; both snake_case and camelCase are accepted.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_toml(path, &text)?;
        debug!(path = %path.display(), ?config, "loaded formatter config");
        Ok(config)
    }

    /// Walks from `start` towards the filesystem root looking for a config file.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    fn parse_toml(path: &Path, source: &str) -> Result<Self, ConfigError> {
        let toml_error = |source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        };
        let mut table = source.parse::<toml::Table>().map_err(toml_error)?;
        let section = match table.remove("formatter") {
            Some(toml::Value::Table(section)) => section,
            Some(_) | None => table,
        };
        let config: Self = toml::Value::Table(section)
            .try_into()
            .map_err(toml_error)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_empty_lines > MAX_EMPTY_LINES_LIMIT {
            return Err(ConfigError::OutOfRange {
                key: "maxEmptyLines",
                value: self.max_empty_lines,
                max: MAX_EMPTY_LINES_LIMIT,
            });
        }
        Ok(self)
    }
}
