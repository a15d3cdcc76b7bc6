//! Paisa Core Library
//!
//! Shared functionality for the Paisa expense tracker:
//! - Expense records and the per-session store
//! - Aggregations (totals, per category, per day, per month)
//! - CSV export and import
//! - Pluggable AI backends (Groq or any OpenAI-compatible server)
//! - Conversation memory for follow-up advice
//! - Prompt library for customizable AI prompts
//! - Layered TOML configuration

pub mod advisor;
pub mod aggregate;
pub mod ai;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod prompts;
pub mod session;
pub mod store;

/// Test utilities including a mock chat completions server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{AdviceOutcome, Advisor};
pub use ai::{
    AIBackend, AIClient, ChatMessage, Conversation, ConversationMemory, MockBackend,
    OpenAICompatibleBackend, Role,
};
pub use config::{AdviceConfig, AiConfig, Config};
pub use error::{Error, Result};
pub use models::{
    format_currency, Category, CategorySummary, DailyTotal, Expense, MonthlyTotal,
    SpendingSummary,
};
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary};
pub use session::Session;
pub use store::ExpenseStore;
