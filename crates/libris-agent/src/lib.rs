// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat orchestration for the Libris reading companion.
//!
//! - [`ChatOrchestrator`] runs the two-pass tool-calling protocol
//! - [`prompt`] resolves the system prompt from configuration
//! - [`shutdown`] turns SIGINT/SIGTERM into a cancellation token

pub mod orchestrator;
pub mod prompt;
pub mod shutdown;

pub use orchestrator::{ChatOrchestrator, ChatReply};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, load_system_prompt};
