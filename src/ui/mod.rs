// Netprofile - Console UI
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Console user interface: prompts and the interactive menu.

pub mod menu;
pub mod prompt;

pub use prompt::Console;
