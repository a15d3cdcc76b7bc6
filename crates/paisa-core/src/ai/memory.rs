//! Rolling conversation memory
//!
//! Keeps the last `window` prompt/response exchanges so follow-up requests
//! carry recent context. Older exchanges are dropped first.

use std::collections::VecDeque;

use super::types::ChatMessage;

/// Default number of exchanges retained
pub const DEFAULT_MEMORY_WINDOW: usize = 3;

/// One prompt and the model's reply to it
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub human: String,
    pub ai: String,
}

/// Bounded queue of prior exchanges
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    window: usize,
    exchanges: VecDeque<Exchange>,
}

impl ConversationMemory {
    /// Create a memory holding at most `window` exchanges (minimum 1)
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            exchanges: VecDeque::with_capacity(window),
        }
    }

    /// Remember an exchange, evicting the oldest one when full
    pub fn record(&mut self, human: impl Into<String>, ai: impl Into<String>) {
        if self.exchanges.len() == self.window {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(Exchange {
            human: human.into(),
            ai: ai.into(),
        });
    }

    /// Retained exchanges as alternating user/assistant messages, oldest first
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.exchanges
            .iter()
            .flat_map(|e| {
                [
                    ChatMessage::user(e.human.clone()),
                    ChatMessage::assistant(e.ai.clone()),
                ]
            })
            .collect()
    }

    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::Role;

    #[test]
    fn test_default_window() {
        let memory = ConversationMemory::default();
        assert_eq!(memory.window(), 3);
        assert!(memory.is_empty());
        assert!(memory.messages().is_empty());
    }

    #[test]
    fn test_evicts_oldest_beyond_window() {
        let mut memory = ConversationMemory::new(3);
        for i in 1..=5 {
            memory.record(format!("q{}", i), format!("a{}", i));
        }

        assert_eq!(memory.len(), 3);
        let humans: Vec<&str> = memory.exchanges().map(|e| e.human.as_str()).collect();
        assert_eq!(humans, vec!["q3", "q4", "q5"]);
    }

    #[test]
    fn test_messages_alternate_roles() {
        let mut memory = ConversationMemory::new(3);
        memory.record("q1", "a1");
        memory.record("q2", "a2");

        let messages = memory.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], ChatMessage::user("q1"));
        assert_eq!(messages[1], ChatMessage::assistant("a1"));
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[3].content, "a2");
    }

    #[test]
    fn test_zero_window_clamped() {
        let mut memory = ConversationMemory::new(0);
        assert_eq!(memory.window(), 1);
        memory.record("q1", "a1");
        memory.record("q2", "a2");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut memory = ConversationMemory::default();
        memory.record("q", "a");
        memory.clear();
        assert!(memory.is_empty());
    }
}
