// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use crate::classifier::{ClassifiedLine, LineKind, OPEN_BLOCK_MARKER};
use crate::core::Document;

use super::FormatterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
    pub line_number: usize,
    pub output: Option<String>,
    pub changed: bool,
    pub preserved_original: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatPlan {
    pub lines: Vec<PlannedLine>,
}

impl FormatPlan {
    pub fn changed_line_count(&self) -> usize {
        self.lines.iter().filter(|line| line.changed).count()
    }

    pub fn emitted_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| line.output.as_deref())
    }

    fn push(&mut self, line_number: usize, original: &str, output: Option<String>, preserved: bool) {
        let changed = output.as_deref() != Some(original);
        self.lines.push(PlannedLine {
            line_number,
            output,
            changed,
            preserved_original: preserved,
        });
    }
}

#[derive(Debug)]
struct AlignmentEntry<'a> {
    line_number: usize,
    original: &'a str,
    indent: String,
    key: &'a str,
    value: String,
}

/// Key-value lines buffered until every key width in the run is known.
#[derive(Debug, Default)]
enum PendingGroup<'a> {
    #[default]
    Empty,
    Open {
        level: usize,
        entries: Vec<AlignmentEntry<'a>>,
    },
}

impl<'a> PendingGroup<'a> {
    fn accepts(&self, level: usize) -> bool {
        match self {
            PendingGroup::Empty => true,
            PendingGroup::Open {
                level: group_level, ..
            } => *group_level == level,
        }
    }

    fn push(&mut self, level: usize, entry: AlignmentEntry<'a>) {
        match self {
            PendingGroup::Open { entries, .. } => entries.push(entry),
            PendingGroup::Empty => {
                *self = PendingGroup::Open {
                    level,
                    entries: vec![entry],
                }
            }
        }
    }

    fn take(&mut self) -> Vec<AlignmentEntry<'a>> {
        match std::mem::take(self) {
            PendingGroup::Empty => Vec::new(),
            PendingGroup::Open { entries, .. } => entries,
        }
    }
}

#[derive(Debug, Default)]
struct PlannerState<'a> {
    level: usize,
    pending: PendingGroup<'a>,
    blank_run: usize,
}

impl<'a> PlannerState<'a> {
    fn flush(&mut self, config: &FormatterConfig, plan: &mut FormatPlan) {
        let entries = self.pending.take();
        if entries.is_empty() {
            return;
        }

        let width = if config.align_colons {
            entries
                .iter()
                .map(|entry| entry.key.chars().count())
                .max()
                .unwrap_or(0)
        } else {
            0
        };

        for entry in entries {
            let mut text = format!("{}{:<width$}:", entry.indent, entry.key, width = width);
            if !entry.value.is_empty() {
                text.push(' ');
                text.push_str(&entry.value);
            }
            if config.trim_trailing_whitespace {
                trim_trailing_space(&mut text);
            }
            plan.push(entry.line_number, entry.original, Some(text), false);
        }
    }

    fn emit_at_level(
        &self,
        line_number: usize,
        line: &str,
        config: &FormatterConfig,
        plan: &mut FormatPlan,
        preserved: bool,
    ) {
        let content = line.trim_start();
        let content = if config.trim_trailing_whitespace {
            content.trim_end()
        } else {
            content
        };
        let mut text = config.indent_unit.render(self.level);
        text.push_str(content);
        plan.push(line_number, line, Some(text), preserved);
    }
}

/// Single pass over the classified document producing one planned line per
/// input line.
pub fn plan_document(
    doc: &Document,
    classified: &[ClassifiedLine],
    config: &FormatterConfig,
) -> FormatPlan {
    let mut plan = FormatPlan {
        lines: Vec::with_capacity(doc.len()),
    };
    let mut state = PlannerState::default();

    for (idx, (line, class)) in doc.texts().zip(classified).enumerate() {
        let line_number = idx + 1;

        if class.is_blank() {
            state.blank_run += 1;
            if state.blank_run <= config.max_empty_lines {
                state.flush(config, &mut plan);
                plan.push(line_number, line, Some(String::new()), false);
            } else {
                plan.push(line_number, line, None, false);
            }
            continue;
        }
        state.blank_run = 0;

        match &class.kind {
            LineKind::KeyValue(span) => {
                let value = normalize_value(span.value(line), config);
                let opens_block = value.ends_with(OPEN_BLOCK_MARKER);
                if !state.pending.accepts(state.level) {
                    state.flush(config, &mut plan);
                }
                let entry = AlignmentEntry {
                    line_number,
                    original: line,
                    indent: config.indent_unit.render(state.level),
                    key: span.key(line),
                    value,
                };
                state.pending.push(state.level, entry);
                if opens_block {
                    state.flush(config, &mut plan);
                    state.level += 1;
                }
            }
            LineKind::BlockClose => {
                state.level = state.level.saturating_sub(1);
                state.flush(config, &mut plan);
                state.emit_at_level(line_number, line, config, &mut plan, false);
                if class.opens_block {
                    state.level += 1;
                }
            }
            kind => {
                state.flush(config, &mut plan);
                let preserved = *kind == LineKind::Other;
                state.emit_at_level(line_number, line, config, &mut plan, preserved);
                if class.opens_block {
                    state.level += 1;
                }
            }
        }
    }

    state.flush(config, &mut plan);
    plan
}

fn normalize_value(value: &str, config: &FormatterConfig) -> String {
    if config.space_after_comma_in_tuples
        && value.len() >= 2
        && value.starts_with('(')
        && value.ends_with(')')
    {
        normalize_tuple_spacing(value)
    } else {
        value.to_string()
    }
}

/// Re-joins the comma separated parts of a `( ... )` value with one space
/// after each comma. Commas inside quoted strings are left alone.
fn normalize_tuple_spacing(value: &str) -> String {
    let inner = value[1..value.len() - 1].trim();
    let mut out = String::with_capacity(value.len() + 4);
    out.push('(');

    let mut chars = inner.chars().peekable();
    let mut in_double = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if escaped {
            out.push(ch);
            escaped = false;
            continue;
        }
        if ch == '\\' && in_double {
            out.push(ch);
            escaped = true;
            continue;
        }
        if ch == '"' {
            in_double = !in_double;
            out.push(ch);
            continue;
        }
        if ch == ',' && !in_double {
            trim_trailing_space(&mut out);
            out.push(',');
            while matches!(chars.peek(), Some(' ' | '\t')) {
                chars.next();
            }
            if chars.peek().is_some() {
                out.push(' ');
            }
            continue;
        }
        out.push(ch);
    }

    out.push(')');
    out
}

fn trim_trailing_space(out: &mut String) {
    while matches!(out.chars().last(), Some(' ' | '\t')) {
        out.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_tuple_spacing, plan_document, FormatPlan};
    use crate::classifier::classify_document;
    use crate::core::Document;
    use crate::formatter::{FormatterConfig, IndentUnit};

    fn plan(source: &str, config: &FormatterConfig) -> FormatPlan {
        let doc = Document::parse(source);
        let classified = classify_document(&doc);
        plan_document(&doc, &classified, config)
    }

    fn lines(source: &str, config: &FormatterConfig) -> Vec<String> {
        plan(source, config)
            .emitted_lines()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn nested_blocks_are_indented_by_level() {
        let source = "SiiNunit\n{\nunit : .a\n{\nname: \"x\"\n}\n}\n";
        assert_eq!(
            lines(source, &FormatterConfig::default()),
            vec!["SiiNunit", "{", "\tunit: .a", "\t{", "\t\tname: \"x\"", "\t}", "}"]
        );
    }

    #[test]
    fn group_keys_are_padded_to_a_shared_colon_column() {
        let source = "{\nname: a\nfuel_capacity: 500\nmass : 2\n}\n";
        let output = lines(source, &FormatterConfig::default());
        assert_eq!(
            output,
            vec![
                "{",
                "\tname         : a",
                "\tfuel_capacity: 500",
                "\tmass         : 2",
                "}",
            ]
        );
        let columns: Vec<usize> = output[1..4]
            .iter()
            .map(|line| line.find(':').expect("colon"))
            .collect();
        assert!(columns.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn alignment_disabled_emits_unpadded_keys() {
        let config = FormatterConfig {
            align_colons: false,
            ..FormatterConfig::default()
        };
        assert_eq!(
            lines("a: 1\nlonger : 2\n", &config),
            vec!["a: 1", "longer: 2"]
        );
    }

    #[test]
    fn comments_and_blank_lines_split_alignment_groups() {
        let source = "a: 1\nlong_key: 2\n# note\nb: 3\n\nlonger_key: 4\n";
        assert_eq!(
            lines(source, &FormatterConfig::default()),
            vec!["a       : 1", "long_key: 2", "# note", "b: 3", "", "longer_key: 4"]
        );
    }

    #[test]
    fn block_opening_key_value_flushes_once_with_its_group() {
        let source = "first: 1\nvehicle_data : .truck {\nname: x\n}\n";
        let planned = plan(source, &FormatterConfig::default());
        let output: Vec<&str> = planned.emitted_lines().collect();
        assert_eq!(
            output,
            vec![
                "first       : 1",
                "vehicle_data: .truck {",
                "\tname: x",
                "}",
            ]
        );
        let numbers: Vec<usize> = planned.lines.iter().map(|line| line.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn comment_ending_in_open_marker_indents_following_lines() {
        let source = "// unit : .x {\nname: a\n}\n";
        assert_eq!(
            lines(source, &FormatterConfig::default()),
            vec!["// unit : .x {", "\tname: a", "}"]
        );
    }

    #[test]
    fn close_marker_is_dedented_before_emission_and_floors_at_zero() {
        let source = "}\n}\na: 1\n";
        assert_eq!(
            lines(source, &FormatterConfig::default()),
            vec!["}", "}", "a: 1"]
        );
    }

    #[test]
    fn compound_close_reopens_block() {
        let source = "{\n} {\nx: 1\n}\n";
        assert_eq!(
            lines(source, &FormatterConfig::default()),
            vec!["{", "} {", "\tx: 1", "}"]
        );
    }

    #[test]
    fn blank_runs_are_clamped_to_configured_max() {
        let source = "a: 1\n\n\n\nb: 2\n";
        let config = FormatterConfig {
            max_empty_lines: 1,
            ..FormatterConfig::default()
        };
        let planned = plan(source, &config);
        assert_eq!(
            planned.emitted_lines().collect::<Vec<_>>(),
            vec!["a: 1", "", "b: 2"]
        );
        assert_eq!(planned.changed_line_count(), 2);
    }

    #[test]
    fn suppressed_blank_lines_do_not_split_groups() {
        let config = FormatterConfig {
            max_empty_lines: 0,
            ..FormatterConfig::default()
        };
        assert_eq!(
            lines("a: 1\n\nlong: 2\n", &config),
            vec!["a   : 1", "long: 2"]
        );
    }

    #[test]
    fn tuple_spacing_is_normalized_when_enabled() {
        assert_eq!(
            lines("color: ( 1,0 ,  0.5 )\n", &FormatterConfig::default()),
            vec!["color: (1, 0, 0.5)"]
        );
        let config = FormatterConfig {
            space_after_comma_in_tuples: false,
            ..FormatterConfig::default()
        };
        assert_eq!(
            lines("color: ( 1,0 ,  0.5 )\n", &config),
            vec!["color: ( 1,0 ,  0.5 )"]
        );
    }

    #[test]
    fn tuple_spacing_keeps_commas_inside_strings() {
        assert_eq!(normalize_tuple_spacing("(\"a,b\",1)"), "(\"a,b\", 1)");
        assert_eq!(normalize_tuple_spacing("()"), "()");
        assert_eq!(normalize_tuple_spacing("(1,)"), "(1,)");
    }

    #[test]
    fn other_lines_are_preserved_and_reindented() {
        let source = "{\n   something odd here   \n}\n";
        let planned = plan(source, &FormatterConfig::default());
        assert_eq!(
            planned.emitted_lines().collect::<Vec<_>>(),
            vec!["{", "\tsomething odd here", "}"]
        );
        assert!(planned.lines[1].preserved_original);
    }

    #[test]
    fn trailing_whitespace_is_kept_when_trimming_is_disabled() {
        let config = FormatterConfig {
            trim_trailing_whitespace: false,
            indent_unit: IndentUnit::Spaces(2),
            ..FormatterConfig::default()
        };
        assert_eq!(
            lines("{\n# keep  \n}\n", &config),
            vec!["{", "  # keep  ", "}"]
        );
    }

    #[test]
    fn unchanged_lines_are_not_marked_changed() {
        let source = "SiiNunit\n{\n\tname: x\n}\n";
        let planned = plan(source, &FormatterConfig::default());
        assert_eq!(planned.changed_line_count(), 0);
    }
}
