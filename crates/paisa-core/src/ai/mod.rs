//! Pluggable AI backend abstraction
//!
//! This module provides a backend-agnostic interface for the chat model that
//! produces savings advice.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for all AI operations
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//! - `Conversation`: system prompt + rolling memory on top of a client
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = Config::load(None)?;
//! if let Some(client) = AIClient::from_env(&config.ai) {
//!     let reply = client.chat(&[ChatMessage::user("Hello")]).await?;
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `PAISA_AI_BACKEND`: Backend to use (groq, openai_compatible, mock). Default: groq
//! - `GROQ_API_KEY`: API key for Groq (required for the groq backend)
//! - `OPENAI_COMPATIBLE_API_KEY`: API key for other servers (optional)

mod conversation;
mod memory;
mod mock;
mod openai_compatible;
pub mod types;

pub use conversation::Conversation;
pub use memory::{ConversationMemory, Exchange, DEFAULT_MEMORY_WINDOW};
pub use mock::MockBackend;
pub use openai_compatible::OpenAICompatibleBackend;
pub use types::*;

use async_trait::async_trait;

use crate::config::AiConfig;
use crate::error::Result;

/// Environment variable holding the Groq credential
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Send a full message list and return the assistant's reply text
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible backend (Groq, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Returns None when the selected backend has no credential, which
    /// disables advice entirely.
    pub fn from_env(config: &AiConfig) -> Option<Self> {
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    /// Same as [`AIClient::from_env`] with an injectable variable lookup
    ///
    /// Checks `PAISA_AI_BACKEND` to determine which backend to use:
    /// - `groq` (default): requires `GROQ_API_KEY`
    /// - `openai_compatible`: key from `OPENAI_COMPATIBLE_API_KEY` is optional
    /// - `mock`: canned responses, no network
    pub fn from_lookup<F>(config: &AiConfig, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("PAISA_AI_BACKEND").unwrap_or_else(|| "groq".to_string());
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        match backend.to_lowercase().as_str() {
            "groq" => non_empty(GROQ_API_KEY_VAR).map(|key| {
                AIClient::OpenAICompatible(OpenAICompatibleBackend::from_config(config, Some(key)))
            }),
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                let key = non_empty("OPENAI_COMPATIBLE_API_KEY");
                Some(AIClient::OpenAICompatible(
                    OpenAICompatibleBackend::from_config(config, key),
                ))
            }
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown PAISA_AI_BACKEND, falling back to groq");
                non_empty(GROQ_API_KEY_VAR).map(|key| {
                    AIClient::OpenAICompatible(OpenAICompatibleBackend::from_config(
                        config,
                        Some(key),
                    ))
                })
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AIClient::OpenAICompatible(b) => AIClient::OpenAICompatible(b.with_model(model)),
            AIClient::Mock(b) => AIClient::Mock(b.with_model(model)),
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        match self {
            AIClient::OpenAICompatible(b) => b.chat(messages).await,
            AIClient::Mock(b) => b.chat(messages).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
