// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// File flavours of the unit-definition format, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Top-level unit file; the primary structured kind.
    Sii,
    /// Include fragment pulled in through `@include`.
    Sui,
    /// Material definition.
    Mat,
    Other,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [Self::Sii, Self::Sui, Self::Mat, Self::Other];

    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "sii" => Self::Sii,
            "sui" => Self::Sui,
            "mat" => Self::Mat,
            _ => Self::Other,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sii" => Some(Self::Sii),
            "sui" => Some(Self::Sui),
            "mat" => Some(Self::Mat),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sii => "sii",
            Self::Sui => "sui",
            Self::Mat => "mat",
            Self::Other => "other",
        }
    }

    pub fn is_primary(self) -> bool {
        self == Self::Sii
    }

    /// Kinds checked by default; the others carry caller-specific keys.
    pub fn primary_kinds() -> Vec<FileKind> {
        Self::ALL.into_iter().filter(|kind| kind.is_primary()).collect()
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::FileKind;
    use std::path::Path;

    #[test]
    fn kind_follows_extension_case_insensitively() {
        assert_eq!(FileKind::from_path(Path::new("def/truck.SII")), FileKind::Sii);
        assert_eq!(FileKind::from_path(Path::new("a/b.sui")), FileKind::Sui);
        assert_eq!(FileKind::from_path(Path::new("x.mat")), FileKind::Mat);
        assert_eq!(FileKind::from_path(Path::new("README")), FileKind::Other);
        assert!(FileKind::Sii.is_primary());
        assert!(!FileKind::Sui.is_primary());
        assert_eq!(FileKind::primary_kinds(), vec![FileKind::Sii]);
    }

    #[test]
    fn parse_accepts_display_names() {
        for kind in FileKind::ALL {
            assert_eq!(FileKind::parse(&kind.to_string()), Some(kind));
        }
        assert_eq!(FileKind::parse("tobj"), None);
    }
}
