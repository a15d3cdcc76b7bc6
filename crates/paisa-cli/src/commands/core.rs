//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve the layered config
//! - `build_advisor` - Wire the AI client into an advisor
//! - `load_store` - Read an exported report into a store
//! - `cmd_categories` - List the expense categories

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use paisa_core::advisor::MISSING_KEY_WARNING;
use paisa_core::export::import_csv;
use paisa_core::{AIBackend, AIClient, Advisor, Category, Config, ExpenseStore};

/// Load config from `--config`, the data dir override or the built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load config")
}

/// Build the advisor from config and the environment
///
/// Prints a warning when no credential is set; the advisor then reports
/// advice as not available instead of calling out.
pub fn build_advisor(config: &Config) -> Advisor {
    let client = AIClient::from_env(&config.ai);
    match client {
        Some(ref c) => {
            tracing::debug!(model = c.model(), host = c.host(), "AI advice enabled");
        }
        None => {
            eprintln!("⚠️  {}", MISSING_KEY_WARNING);
        }
    }
    Advisor::new(client).with_memory_window(config.advice.memory_window)
}

/// Read an exported expense report into a store
pub fn load_store(input: &Path) -> Result<ExpenseStore> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open file: {}", input.display()))?;
    let records = import_csv(file)
        .with_context(|| format!("Failed to parse expense report: {}", input.display()))?;
    let store = ExpenseStore::from_records(records)
        .with_context(|| format!("Invalid expense in {}", input.display()))?;

    tracing::info!(records = store.len(), path = %input.display(), "Loaded expense report");
    Ok(store)
}

pub fn cmd_categories() -> Result<()> {
    println!("Expense Categories:\n");
    for category in Category::all() {
        println!("  - {}", category);
    }
    Ok(())
}
