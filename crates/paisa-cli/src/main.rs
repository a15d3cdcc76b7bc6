//! Paisa CLI - Session expense tracker with AI savings tips
//!
//! Usage:
//!   paisa session                     Interactive session
//!   paisa report --input report.csv   Dashboard for an exported report
//!   paisa advise --input report.csv   AI savings advice only
//!   paisa export --input report.csv   Normalized CSV export

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Session => commands::cmd_session(config).await,
        Commands::Report { input, advice } => commands::cmd_report(config, &input, advice).await,
        Commands::Advise { input } => commands::cmd_advise(config, &input).await,
        Commands::Export { input, output } => commands::cmd_export(&input, output.as_deref()),
        Commands::Categories => commands::cmd_categories(),
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { prompt_id }) => commands::cmd_prompts_show(&prompt_id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
    }
}
