// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    None,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// One physical line with its terminator split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    pub line_ending: LineEnding,
}

impl SourceLine {
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 2);
        out.push_str(&self.text);
        out.push_str(self.line_ending.as_str());
        out
    }
}

/// Line-split view of a unit file. Immutable input to every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub lines: Vec<SourceLine>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0usize;
        let bytes = source.as_bytes();

        while start < bytes.len() {
            let mut end = start;
            while end < bytes.len() && bytes[end] != b'\n' {
                end += 1;
            }

            let (line_text, line_ending, next_start) = if end < bytes.len() {
                if end > start && bytes[end - 1] == b'\r' {
                    (&source[start..end - 1], LineEnding::Crlf, end + 1)
                } else {
                    (&source[start..end], LineEnding::Lf, end + 1)
                }
            } else {
                (&source[start..end], LineEnding::None, end)
            };

            lines.push(SourceLine {
                text: line_text.to_string(),
                line_ending,
            });
            start = next_start;
        }

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| line.text.as_str())
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// First terminator seen in the document, `\n` when there is none.
    pub fn preferred_line_ending(&self) -> LineEnding {
        self.lines
            .iter()
            .map(|line| line.line_ending)
            .find(|ending| *ending != LineEnding::None)
            .unwrap_or(LineEnding::Lf)
    }

    pub fn has_final_newline(&self) -> bool {
        self.lines
            .last()
            .is_some_and(|line| line.line_ending != LineEnding::None)
    }

    pub fn render(&self) -> String {
        self.lines.iter().map(SourceLine::render).collect()
    }
}
