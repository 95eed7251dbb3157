// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use walkdir::WalkDir;

use crate::color::{parse_color, Rgba};
use crate::core::FileKind;
use crate::formatter::FormatMode;
use crate::resolver::ResolveContext;
use crate::settings::Settings;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SIIFORGE_LOG";

const LONG_ABOUT: &str = "Tooling for SCS unit files (.sii, .sui, .mat).

fmt reformats files: consistent indentation, colon-aligned key groups,
normalized tuple spacing. Output goes to stdout unless --check or --write
is given. colors lists color literals on color-named keys, resolve and
links map resource paths to files, check-keys reports keys missing from a
vocabulary.

Exit status: 0 on success, 1 when --check finds changes or a command
reports findings, 2 on usage or I/O errors.";

#[derive(Parser, Debug)]
#[command(
    name = "siiforge",
    version = VERSION,
    about = "Formatter, color, path and key tooling for SCS unit files",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        long = "format",
        value_enum,
        global = true,
        default_value_t = OutputFormat::Text,
        long_help = "Select global CLI output format. text is default; json enables machine-readable output."
    )]
    pub format: OutputFormat,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::SetTrue,
        global = true,
        long_help = "Log at debug level to stderr. Without it the SIIFORGE_LOG filter applies (default warn)."
    )]
    pub verbose: bool,
    #[arg(
        long = "settings",
        value_name = "FILE",
        global = true,
        long_help = "Read editor settings JSON with a \"siiforge\" section (format, paths, validation)."
    )]
    pub settings: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format unit files.
    Fmt(FmtArgs),
    /// List color literals and their presentations.
    Colors(ColorsArgs),
    /// Resolve one resource path.
    Resolve(ResolveArgs),
    /// Resolve every resource path in a file.
    Links(LinksArgs),
    /// Report keys missing from a vocabulary.
    CheckKeys(CheckKeysArgs),
}

#[derive(Args, Debug)]
pub struct FmtArgs {
    #[arg(
        long = "check",
        action = ArgAction::SetTrue,
        conflicts_with = "write",
        long_help = "Report files that would change without writing them."
    )]
    pub check: bool,
    #[arg(
        long = "write",
        action = ArgAction::SetTrue,
        long_help = "Rewrite files in place."
    )]
    pub write: bool,
    #[arg(
        long = "config",
        value_name = "FILE",
        long_help = "Formatter config file. Defaults to the nearest .siifmt.toml above the first input."
    )]
    pub config: Option<PathBuf>,
    #[arg(
        value_name = "PATH",
        required = true,
        long_help = "Files or directories; directories are searched for .sii, .sui and .mat files."
    )]
    pub paths: Vec<PathBuf>,
}

impl FmtArgs {
    pub fn mode(&self) -> FormatMode {
        if self.check {
            FormatMode::Check
        } else if self.write {
            FormatMode::Write
        } else {
            FormatMode::Stdout
        }
    }
}

#[derive(Args, Debug)]
pub struct ColorsArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[arg(
        long = "set",
        value_name = "INDEX=COLOR",
        value_parser = parse_color_edit,
        long_help = "Replace color INDEX (as listed) with COLOR, a tuple or hex literal, and print the edited file."
    )]
    pub set: Option<ColorEdit>,
}

/// Parsed `--set INDEX=COLOR`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEdit {
    pub index: usize,
    pub rgba: Rgba,
}

pub fn parse_color_edit(value: &str) -> Result<ColorEdit, String> {
    let (index, color) = value
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=COLOR, got {value:?}"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid color index {index:?}"))?;
    let literal = parse_color(color).ok_or_else(|| format!("invalid color literal {color:?}"))?;
    Ok(ColorEdit {
        index,
        rgba: literal.rgba,
    })
}

#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    #[arg(long = "mod-root", value_name = "DIR")]
    pub mod_root: Option<PathBuf>,
    #[arg(long = "game-data-root", value_name = "DIR")]
    pub game_data_root: Option<PathBuf>,
    #[arg(
        long = "workspace",
        value_name = "DIR",
        long_help = "Directory searched by file name when no candidate exists."
    )]
    pub workspace: Option<PathBuf>,
}

impl RootArgs {
    /// Command-line roots override settings roots.
    pub fn context(&self, source: &Path, settings: &Settings) -> ResolveContext {
        let mut context = settings.resolve_context(source, self.workspace.as_deref());
        if let Some(root) = &self.mod_root {
            context.mod_root = Some(root.clone());
        }
        if let Some(root) = &self.game_data_root {
            context.game_data_root = Some(root.clone());
        }
        context
    }
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(value_name = "RAW")]
    pub raw: String,
    #[arg(
        long = "source",
        value_name = "FILE",
        long_help = "Document the path appears in; relative paths start from its directory."
    )]
    pub source: PathBuf,
    #[command(flatten)]
    pub roots: RootArgs,
}

#[derive(Args, Debug)]
pub struct LinksArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[command(flatten)]
    pub roots: RootArgs,
}

#[derive(Args, Debug)]
pub struct CheckKeysArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[arg(
        long = "vocabulary",
        value_name = "FILE",
        long_help = "Known keys: a JSON array of strings or one key per line."
    )]
    pub vocabulary: PathBuf,
    #[arg(
        long = "kind",
        value_enum,
        long_help = "File kind to validate as. Defaults to the kind implied by the extension."
    )]
    pub kind: Option<FileKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Expands directories into the unit files below them, sorted by name.
/// Plain file arguments are kept whatever their extension.
pub fn collect_input_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let walker = WalkDir::new(path).sort_by_file_name().into_iter();
        for entry in walker.filter_map(Result::ok) {
            if entry.file_type().is_file() && FileKind::from_path(entry.path()) != FileKind::Other
            {
                files.push(entry.into_path());
            }
        }
    }
    files
}
