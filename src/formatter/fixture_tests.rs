// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use super::{FormatterConfig, FormatterEngine, IndentUnit};

const FIXTURE_STEMS: &[&str] = &[
    "truck_unit",
    "includes_and_comments",
    "fallback_ambiguous",
    "crlf_material",
];

#[test]
fn formatter_golden_snapshots_match_fixture_expectations() {
    let engine = FormatterEngine::new(FormatterConfig::default());
    for stem in FIXTURE_STEMS {
        let input = read_fixture(stem, "input");
        let expected = read_fixture(stem, "expected");
        let output = engine.format_source_with_diagnostics(&input);
        assert_eq!(
            output.rendered, expected,
            "formatter fixture mismatch for {stem}"
        );
    }
}

#[test]
fn formatter_is_idempotent_across_fixture_corpus() {
    let engine = FormatterEngine::new(FormatterConfig::default());
    for stem in FIXTURE_STEMS {
        let input = read_fixture(stem, "input");
        let once = engine.format_source(&input);
        let twice = engine.format_source(&once);
        assert_eq!(once, twice, "formatter idempotence failed for {stem}");
    }
}

#[test]
fn fallback_fixture_emits_warning_without_changing_source() {
    let engine = FormatterEngine::new(FormatterConfig::default());
    let input = read_fixture("fallback_ambiguous", "input");
    let output = engine.format_source_with_diagnostics(&input);
    assert_eq!(output.rendered, input);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].line_number, 5);
}

#[test]
fn space_indent_fixture_only_changes_leading_whitespace() {
    let engine = FormatterEngine::new(FormatterConfig {
        indent_unit: IndentUnit::Spaces(4),
        ..FormatterConfig::default()
    });
    let input = read_fixture("truck_unit", "input");
    let expected = read_fixture("truck_unit", "expected").replace('\t', "    ");
    assert_eq!(engine.format_source(&input), expected);
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("} {".to_string()),
        Just("SiiNunit".to_string()),
        Just("# note".to_string()),
        Just("@include \"a.sui\"".to_string()),
        "[ \t]{0,3}[a-z_]{1,12}(\\[\\])?[ \t]{0,2}:[ \t]{0,2}[a-z0-9.\" ]{0,10}",
        "[ \t]{0,3}[a-z_]{1,8} ?: ?\\( ?[0-9]{1,3} ?, ?[0-9]{1,3} ?,[0-9]{1,3} ?\\)",
        "[ \t]{0,3}[a-z_]{1,8} : \\.[a-z]{1,6} \\{",
        "[ \t]{0,4}[a-z =]{1,10}[ \t]{0,2}",
    ]
}

proptest! {
    #[test]
    fn formatting_twice_matches_formatting_once(
        lines in prop::collection::vec(arb_line(), 0..24),
        crlf in any::<bool>(),
        final_newline in any::<bool>(),
        max_empty_lines in 0usize..3,
        align_colons in any::<bool>(),
    ) {
        let ending = if crlf { "\r\n" } else { "\n" };
        let mut source = lines.join(ending);
        if final_newline && !lines.is_empty() {
            source.push_str(ending);
        }
        let engine = FormatterEngine::new(FormatterConfig {
            max_empty_lines,
            align_colons,
            ..FormatterConfig::default()
        });
        let once = engine.format_source(&source);
        let twice = engine.format_source(&once);
        prop_assert_eq!(once, twice);
    }
}

fn read_fixture(stem: &str, kind: &str) -> String {
    let path = fixture_path(stem, kind);
    fs::read_to_string(&path).unwrap_or_else(|err| {
        panic!("missing fixture {}: {err}", path.display());
    })
}

fn fixture_path(stem: &str, kind: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("formatter")
        .join("fixtures")
        .join(format!("{stem}.{kind}.sii"))
}
