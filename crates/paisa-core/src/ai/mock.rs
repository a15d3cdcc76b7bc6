//! Mock backend for testing
//!
//! Returns canned advice (or a canned failure) and records every message
//! list it is sent. Clones share the same call log, so a test can hand a
//! clone to the code under test and inspect the original afterwards.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::types::{ChatMessage, Role};
use super::AIBackend;

#[derive(Clone, Debug)]
enum Reply {
    /// Build a three-point answer from the prompt
    Generated,
    Fixed(String),
    Fail(String),
}

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    reply: Reply,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            reply: Reply::Generated,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always replies with `text`
    pub fn with_reply(text: &str) -> Self {
        Self {
            reply: Reply::Fixed(text.to_string()),
            ..Self::new()
        }
    }

    /// Create a mock whose chat calls always fail with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            healthy: false,
            reply: Reply::Fail(message.to_string()),
            ..Self::new()
        }
    }

    /// Create a new instance with a different model (no-op for mock)
    pub fn with_model(&self, _model: &str) -> Self {
        self.clone()
    }

    /// Number of chat calls received
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Message lists received, oldest call first
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        match &self.reply {
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(Error::Ai(message.clone())),
            Reply::Generated => {
                let prompt = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.as_str())
                    .unwrap_or("");
                Ok(generated_tips(prompt))
            }
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

/// Three generic tips aimed at the highest category named in the prompt
fn generated_tips(prompt: &str) -> String {
    let category = prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix("Highest spending category:"))
        .and_then(|rest| rest.split('(').next())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("your top category");

    format!(
        "1. Set a monthly cap for {category} and review it every week.\n\
         2. Move recurring bills to UPI autopay so nothing slips through.\n\
         3. Put a fixed share of each salary into a recurring deposit or SIP first."
    )
}
