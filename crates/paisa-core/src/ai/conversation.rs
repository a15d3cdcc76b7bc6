//! Conversation wrapper: fixed system prompt plus rolling memory

use tracing::debug;

use crate::error::Result;

use super::memory::ConversationMemory;
use super::types::ChatMessage;
use super::{AIBackend, AIClient};

/// A chat session with a fixed system instruction
///
/// Each request is sent as: system message, remembered exchanges (oldest
/// first), then the new user message. Only successful exchanges are remembered.
#[derive(Clone)]
pub struct Conversation {
    client: AIClient,
    system_prompt: String,
    memory: ConversationMemory,
}

impl Conversation {
    pub fn new(client: AIClient, system_prompt: impl Into<String>, window: usize) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
            memory: ConversationMemory::new(window),
        }
    }

    /// Send `input` with the current context and remember the exchange
    pub async fn predict(&mut self, input: &str) -> Result<String> {
        let messages = self.build_messages(input);
        debug!(
            model = self.client.model(),
            history = self.memory.len(),
            "Sending conversation turn"
        );

        let reply = self.client.chat(&messages).await?;
        self.memory.record(input, reply.clone());
        Ok(reply)
    }

    /// The exact message list `predict` would send for `input`
    pub fn build_messages(&self, input: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2 + self.memory.len() * 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(self.memory.messages());
        messages.push(ChatMessage::user(input));
        messages
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Replace the system instruction (memory is kept)
    pub fn set_system_prompt(&mut self, system_prompt: impl Into<String>) {
        self.system_prompt = system_prompt.into();
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn client(&self) -> &AIClient {
        &self.client
    }
}
