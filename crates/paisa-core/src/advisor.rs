//! AI-powered savings advice
//!
//! Turns a spending summary into a prompt, sends it through a [`Conversation`]
//! and maps every possible outcome to something the presentation layer can
//! show directly. Transport and API errors never reach the caller: they are
//! logged and reported as [`AdviceOutcome::Unavailable`].

use std::collections::HashMap;

use tracing::{info, warn};

use crate::aggregate;
use crate::ai::{AIBackend, AIClient, Conversation, DEFAULT_MEMORY_WINDOW};
use crate::error::{Error, Result};
use crate::models::{Category, Expense, SpendingSummary};
use crate::prompts::{PromptId, PromptLibrary};

/// Shown instead of advice when nothing has been logged yet
pub const NO_EXPENSES_MESSAGE: &str = "Start adding your expenses to get personalized advice!";

/// Shown in the advice section when no credential is configured
pub const NOT_CONFIGURED_MESSAGE: &str = "AI advice is not available without the Groq API key.";

/// Startup warning when no credential is configured
pub const MISSING_KEY_WARNING: &str =
    "Please set the GROQ_API_KEY environment variable for AI advice.";

/// Shown when the advice service fails for any reason
pub const UNAVAILABLE_MESSAGE: &str = "AI advice is currently unavailable. Please try again later.";

/// Result of asking for advice
#[derive(Debug, Clone, PartialEq)]
pub enum AdviceOutcome {
    /// The store is empty; no request was made
    NoExpenses,
    /// No AI client configured; no request was made
    NotConfigured,
    /// The model's answer, verbatim
    Advice(String),
    /// The request failed
    Unavailable,
}

impl AdviceOutcome {
    /// Text to show the user
    pub fn message(&self) -> &str {
        match self {
            Self::NoExpenses => NO_EXPENSES_MESSAGE,
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE,
            Self::Advice(text) => text,
            Self::Unavailable => UNAVAILABLE_MESSAGE,
        }
    }

    /// Whether the message is a warning rather than information
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::Unavailable)
    }
}

/// Builds advice prompts and relays them to the configured model
///
/// Every request starts a fresh [`Conversation`], so the model only ever
/// sees the figures of the current store.
pub struct Advisor {
    client: Option<AIClient>,
    prompts: PromptLibrary,
    memory_window: usize,
}

impl Advisor {
    /// Create an advisor; `None` disables advice entirely
    pub fn new(client: Option<AIClient>) -> Self {
        Self {
            client,
            prompts: PromptLibrary::new(),
            memory_window: DEFAULT_MEMORY_WINDOW,
        }
    }

    /// Use a specific prompt library (e.g. embedded only in tests)
    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = prompts;
        self
    }

    /// Number of prior exchanges kept as context
    pub fn with_memory_window(mut self, window: usize) -> Self {
        self.memory_window = window;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Option<&AIClient> {
        self.client.as_ref()
    }

    /// Ask for advice on `records`, never failing
    ///
    /// A missing client wins over an empty store, matching what the page
    /// shows: without a key there is no point asking the user to add data.
    pub async fn advise(&mut self, records: &[Expense]) -> AdviceOutcome {
        if self.client.is_none() {
            return AdviceOutcome::NotConfigured;
        }

        match self.get_ai_advice(records).await {
            Ok(None) => AdviceOutcome::NoExpenses,
            Ok(Some(text)) => AdviceOutcome::Advice(text),
            Err(e) => {
                warn!(error = %e, "AI advice request failed");
                AdviceOutcome::Unavailable
            }
        }
    }

    /// Request advice, returning `Ok(None)` without any call for an empty store
    pub async fn get_ai_advice(&mut self, records: &[Expense]) -> Result<Option<String>> {
        let Some(summary) = aggregate::summarize(records) else {
            return Ok(None);
        };

        let (system, user) = self.build_prompt(&summary)?;
        let mut conversation = self.new_conversation(system)?;
        let reply = conversation.predict(&user).await?;

        info!(
            records = records.len(),
            model = conversation.client().model(),
            "AI advice received"
        );
        Ok(Some(reply))
    }

    /// Render the system instruction and user prompt for a summary
    pub fn build_prompt(&mut self, summary: &SpendingSummary) -> Result<(String, String)> {
        let prompt = self.prompts.get(PromptId::FinancialAdvice)?;

        let mut vars = HashMap::new();
        vars.insert("total_spent", format!("{:.2}", summary.total));
        vars.insert(
            "highest_category",
            summary.highest_category.as_str().to_string(),
        );
        vars.insert("highest_amount", format!("{:.2}", summary.highest_amount));
        vars.insert(
            "category_breakdown",
            format_breakdown(&summary.category_totals),
        );

        let system = prompt.system_section().unwrap_or_default().to_string();
        let user = prompt.render_user(&vars);
        Ok((system, user))
    }

    fn new_conversation(&self, system: String) -> Result<Conversation> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::Ai("no AI client configured".into()))?;
        Ok(Conversation::new(client.clone(), system, self.memory_window))
    }
}

/// Category totals as `{'Groceries': 800.0, 'Transportation': 100.0}`
pub fn format_breakdown(totals: &[(Category, f64)]) -> String {
    let entries: Vec<String> = totals
        .iter()
        .map(|(category, total)| format!("'{}': {}", category.as_str(), float_repr(*total)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Shortest round-tripping float text with a signed, two-digit exponent
/// (`1e+16`, `1.5e-05`)
fn float_repr(value: f64) -> String {
    let text = format!("{:?}", value);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}
