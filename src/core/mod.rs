// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared document substrate: line splitting, file kinds and scanning helpers.

pub mod document;
pub mod file_kind;
pub mod text_utils;

pub use document::{Document, LineEnding, SourceLine};
pub use file_kind::FileKind;
