// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation loop and turn orchestration for the Mnemo agent.
//!
//! [`AgentSession`] holds one session's [`ConversationHistory`] and
//! routes each user turn through intent classification into the memory
//! pipeline, returning the reply for the shell to print.

pub mod history;
pub mod session;

pub use history::{ConversationHistory, Role};
pub use session::AgentSession;
