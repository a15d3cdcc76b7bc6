//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Paisa - Track your expenses and get AI savings tips
#[derive(Parser)]
#[command(name = "paisa")]
#[command(about = "Session expense tracker with AI-powered savings advice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (add expenses, view the dashboard, get advice)
    Session,

    /// Render the dashboard for an exported expense report
    Report {
        /// Expense report CSV (Date,Category,Amount,Description)
        #[arg(short, long)]
        input: PathBuf,

        /// Include the AI savings advice section
        #[arg(long)]
        advice: bool,
    },

    /// Print AI savings advice for an exported expense report
    Advise {
        /// Expense report CSV (Date,Category,Amount,Description)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Re-export an expense report in normalized form
    Export {
        /// Expense report CSV to read
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the expense categories
    Categories,

    /// Manage AI prompts
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all available prompts and their override status
    List,

    /// Show the content of a specific prompt
    Show {
        /// Prompt ID (e.g., financial_advice)
        prompt_id: String,
    },

    /// Show the path where prompt overrides should be placed
    Path,
}
