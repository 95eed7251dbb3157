// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for siiforge.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use siiforge::cli::{
    collect_input_files, CheckKeysArgs, Cli, ColorsArgs, Command, FmtArgs, LinksArgs,
    OutputFormat, ResolveArgs, LOG_ENV,
};
use siiforge::color::{document_colors, presentations, replace_color};
use siiforge::core::{Document, FileKind};
use siiforge::formatter::{FormatMode, FormatterConfig, FormatterEngine};
use siiforge::resolver::{candidate_paths, resolve, scan_resource_paths, Origin, Resolution};
use siiforge::settings::Settings;
use siiforge::validator::{KeyValidator, Vocabulary};

const EXIT_FINDINGS: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// Whether a command finished cleanly or has something to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Clean,
    Findings,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(Outcome::Clean) => {}
        Ok(Outcome::Findings) => std::process::exit(EXIT_FINDINGS),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let settings = match &cli.settings {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::default(),
    };
    let mut out = io::stdout().lock();
    let outcome = match &cli.command {
        Command::Fmt(args) => run_fmt(args, &settings, cli.format, &mut out),
        Command::Colors(args) => run_colors(args, cli.format, &mut out),
        Command::Resolve(args) => run_resolve(args, &settings, cli.format, &mut out),
        Command::Links(args) => run_links(args, &settings, cli.format, &mut out),
        Command::CheckKeys(args) => run_check_keys(args, &settings, cli.format, &mut out),
    }?;
    out.flush()?;
    Ok(outcome)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_json(out: &mut impl Write, value: &serde_json::Value) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// An explicit --config wins, then the nearest `.siifmt.toml`, then the
/// settings' format section.
fn formatter_config(args: &FmtArgs, settings: &Settings) -> Result<FormatterConfig> {
    if let Some(path) = &args.config {
        return Ok(FormatterConfig::load_from_path(path)?);
    }
    let start = args.paths.first().map(|path| {
        if path.is_dir() {
            path.clone()
        } else {
            path.parent().map(Path::to_path_buf).unwrap_or_default()
        }
    });
    let start = start
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                dir
            }
        })
        .and_then(|dir| fs::canonicalize(dir).ok());
    if let Some(found) = start.as_deref().and_then(FormatterConfig::discover) {
        debug!(path = %found.display(), "using discovered formatter config");
        return Ok(FormatterConfig::load_from_path(&found)?);
    }
    Ok(settings.format.clone())
}

fn run_fmt(
    args: &FmtArgs,
    settings: &Settings,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Outcome> {
    let config = formatter_config(args, settings)?;
    let files = collect_input_files(&args.paths);
    if files.is_empty() {
        bail!("no unit files found in the given paths");
    }
    let mode = args.mode();
    let engine = FormatterEngine::new(config);
    let report = engine
        .run_paths_with_report(&files, mode)
        .context("formatter run failed")?;

    if format == OutputFormat::Json {
        print_json(out, &serde_json::to_value(&report)?)?;
    } else {
        for file in &report.files {
            for diagnostic in &file.diagnostics {
                eprintln!(
                    "{}:{}: warning: {}",
                    file.path.display(),
                    diagnostic.line_number,
                    diagnostic.message
                );
            }
            match mode {
                FormatMode::Stdout => out.write_all(file.rendered.as_bytes())?,
                FormatMode::Check if file.changed => {
                    writeln!(out, "would reformat {}", file.path.display())?
                }
                FormatMode::Write if file.changed => {
                    writeln!(out, "reformatted {}", file.path.display())?
                }
                FormatMode::Check | FormatMode::Write => {}
            }
        }
    }

    let changes_pending = mode == FormatMode::Check && report.summary.files_changed > 0;
    Ok(if changes_pending {
        Outcome::Findings
    } else {
        Outcome::Clean
    })
}

fn run_colors(args: &ColorsArgs, format: OutputFormat, out: &mut impl Write) -> Result<Outcome> {
    let source = read_source(&args.file)?;
    let colors = document_colors(&source);

    if let Some(edit) = &args.set {
        let Some(color) = colors.get(edit.index) else {
            bail!(
                "color index {} out of range ({} colors in {})",
                edit.index,
                colors.len(),
                args.file.display()
            );
        };
        let mut doc = Document::parse(&source);
        let line = &mut doc.lines[color.line];
        line.text = replace_color(&line.text, color, edit.rgba);
        out.write_all(doc.render().as_bytes())?;
        return Ok(Outcome::Clean);
    }

    if format == OutputFormat::Json {
        let payload: Vec<_> = colors
            .iter()
            .map(|color| {
                json!({
                    "line": color.line,
                    "range": color.range,
                    "rgba": color.rgba,
                    "literal": color.literal,
                    "presentations": presentations(&color.literal, color.rgba)
                        .into_iter()
                        .map(|presentation| presentation.label)
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        print_json(out, &json!(payload))?;
    } else {
        for (index, color) in colors.iter().enumerate() {
            let labels: Vec<String> = presentations(&color.literal, color.rgba)
                .into_iter()
                .map(|presentation| presentation.label)
                .collect();
            writeln!(
                out,
                "[{index}] {}:{}: rgba({:.3}, {:.3}, {:.3}, {:.3}) {}",
                color.line + 1,
                color.range.start + 1,
                color.rgba.red,
                color.rgba.green,
                color.rgba.blue,
                color.rgba.alpha,
                labels.join(" | ")
            )?;
        }
    }
    Ok(Outcome::Clean)
}

fn describe(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Found {
            path,
            origin: Origin::Candidate(index),
        } => format!("{} (candidate {index})", path.display()),
        Resolution::Found {
            path,
            origin: Origin::Fallback,
        } => format!("{} (fallback search)", path.display()),
        Resolution::NotFound => "not found".to_string(),
    }
}

fn run_resolve(
    args: &ResolveArgs,
    settings: &Settings,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Outcome> {
    let context = args.roots.context(&args.source, settings);
    let candidates = candidate_paths(&args.raw, &context);
    let resolution = resolve(&args.raw, &context)?;

    if format == OutputFormat::Json {
        print_json(
            out,
            &json!({
                "raw": args.raw,
                "candidates": candidates,
                "resolution": resolution,
            }),
        )?;
    } else {
        for (index, candidate) in candidates.iter().enumerate() {
            writeln!(out, "candidate {index}: {}", candidate.display())?;
        }
        writeln!(out, "{}", describe(&resolution))?;
    }
    Ok(match resolution {
        Resolution::Found { .. } => Outcome::Clean,
        Resolution::NotFound => Outcome::Findings,
    })
}

fn run_links(
    args: &LinksArgs,
    settings: &Settings,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Outcome> {
    let source = read_source(&args.file)?;
    let context = args.roots.context(&args.file, settings);
    let mut resolved = Vec::new();
    for literal in scan_resource_paths(&source) {
        let resolution = resolve(&literal.raw, &context)?;
        resolved.push((literal, resolution));
    }
    let unresolved = resolved
        .iter()
        .filter(|(_, resolution)| *resolution == Resolution::NotFound)
        .count();

    if format == OutputFormat::Json {
        let payload: Vec<_> = resolved
            .iter()
            .map(|(literal, resolution)| json!({ "path": literal, "resolution": resolution }))
            .collect();
        print_json(out, &json!(payload))?;
    } else {
        for (literal, resolution) in &resolved {
            writeln!(
                out,
                "{}:{}: {} -> {}",
                literal.line + 1,
                literal.range.start + 1,
                literal.raw,
                describe(resolution)
            )?;
        }
    }
    Ok(if unresolved > 0 {
        Outcome::Findings
    } else {
        Outcome::Clean
    })
}

fn run_check_keys(
    args: &CheckKeysArgs,
    settings: &Settings,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Outcome> {
    if !settings.validation.unknown_keys {
        debug!("unknown-key validation disabled by settings");
        return Ok(Outcome::Clean);
    }
    let source = read_source(&args.file)?;
    let vocabulary = Vocabulary::load_from_path(&args.vocabulary)?;
    let kind = args
        .kind
        .unwrap_or_else(|| FileKind::from_path(&args.file));
    let doc = Document::parse(&source);
    let findings = KeyValidator::new(&vocabulary)
        .with_file_kinds(settings.validation.file_kinds.clone())
        .validate(&doc, kind);

    if format == OutputFormat::Json {
        print_json(out, &serde_json::to_value(&findings)?)?;
    } else {
        for finding in &findings {
            writeln!(
                out,
                "{}:{}:{}: {}",
                args.file.display(),
                finding.line_index + 1,
                finding.columns.start + 1,
                finding.message()
            )?;
        }
    }
    Ok(if findings.is_empty() {
        Outcome::Clean
    } else {
        Outcome::Findings
    })
}
