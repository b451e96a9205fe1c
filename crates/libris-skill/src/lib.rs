// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tools for the Libris reading companion.
//!
//! Defines the [`Tool`] trait and [`ToolRegistry`], the [`ToolDispatcher`]
//! that validates and runs model-requested calls, and the six built-in
//! catalog and reading-list tools.

pub mod builtin;
pub mod dispatcher;
pub mod tool;

pub use builtin::register_builtins;
pub use dispatcher::ToolDispatcher;
pub use tool::{Tool, ToolOutput, ToolRegistry};
