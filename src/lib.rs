// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Library entry exposing the unit-file services.
pub mod classifier;
pub mod cli;
pub mod color;
pub mod core;
pub mod formatter;
pub mod resolver;
pub mod settings;
pub mod validator;
