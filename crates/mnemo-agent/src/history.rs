// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-scoped conversation history.

/// Speaker role for a history turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl Role {
    /// Capitalized label used when rendering history for prompts.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Agent => "Agent",
        }
    }
}

/// Ordered (role, text) turns for the current session.
///
/// Lives only as long as the session and is never written to the
/// memory index.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<(Role, String)>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, text: &str) {
        self.turns.push((Role::User, text.to_string()));
    }

    /// Append an agent turn.
    pub fn push_agent(&mut self, text: &str) {
        self.turns.push((Role::Agent, text.to_string()));
    }

    /// Render to flat text, one `Role: text` line per turn.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|(role, text)| format!("{}: {text}", role.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of turns recorded so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns have been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_renders_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.render(), "");
    }

    #[test]
    fn render_capitalizes_roles_one_line_per_turn() {
        let mut history = ConversationHistory::new();
        history.push_user("I love hiking");
        history.push_agent("Updated the memory accordingly.");
        history.push_user("What do I love doing?");

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.render(),
            "User: I love hiking\n\
             Agent: Updated the memory accordingly.\n\
             User: What do I love doing?"
        );
    }

    #[test]
    fn role_labels() {
        assert_eq!(Role::User.label(), "User");
        assert_eq!(Role::Agent.label(), "Agent");
    }
}
