//! Interactive session command
//!
//! Reads one command per line, mutates the in-memory store and re-renders
//! the requested dashboard section. Nothing is persisted: quitting the
//! session discards every expense unless it was exported first.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use paisa_core::export::DEFAULT_EXPORT_FILE;
use paisa_core::{Category, Session};

use super::reports::{
    render_advice, render_categories, render_daily, render_dashboard, render_monthly,
    render_records, render_summary,
};
use super::{build_advisor, load_config};

/// One parsed session line
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Add {
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: String,
    },
    Dashboard,
    Summary,
    Categories,
    Daily,
    Monthly,
    Records,
    Advice,
    Export(PathBuf),
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  add <YYYY-MM-DD|today> <category> <amount> [description...]
      Log an expense. Quote multi-word categories: add today \"Food & Dining\" 250 Lunch
  dashboard     Show every section
  summary       Total and category split
  daily         Daily expense trend
  records       All expenses, newest first
  categories    Total, average and count per category
  monthly       Monthly totals
  advice        AI savings advice
  export [path] Write the expense report (default: expense_report.csv)
  help          Show this help
  quit          End the session";

/// Split a line on whitespace, keeping double-quoted runs together
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote");
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse an amount, tolerating a leading ₹ and thousands separators
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount: f64 = cleaned
        .parse()
        .with_context(|| format!("Invalid amount: {}", s))?;
    Ok(amount)
}

fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {} (use YYYY-MM-DD or today)", s))
}

/// Parse one session line; `None` for a blank line
pub fn parse_command(line: &str, today: NaiveDate) -> Result<Option<SessionCommand>> {
    let tokens = tokenize(line)?;
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
        "add" => {
            if args.len() < 3 {
                bail!("Usage: add <YYYY-MM-DD|today> <category> <amount> [description...]");
            }
            let date = parse_date(&args[0], today)?;
            let category: Category = args[1].parse().map_err(|e: String| {
                anyhow::anyhow!("{} (run 'categories' in the shell or 'paisa categories')", e)
            })?;
            let amount = parse_amount(&args[2])?;
            SessionCommand::Add {
                date,
                category,
                amount,
                description: args[3..].join(" "),
            }
        }
        "dashboard" => SessionCommand::Dashboard,
        "summary" => SessionCommand::Summary,
        "categories" => SessionCommand::Categories,
        "daily" | "trends" => SessionCommand::Daily,
        "monthly" => SessionCommand::Monthly,
        "records" => SessionCommand::Records,
        "advice" => SessionCommand::Advice,
        "export" => SessionCommand::Export(
            args.first()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE)),
        ),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => bail!("Unknown command: {} (type 'help')", other),
    };
    Ok(Some(command))
}

fn write_export(session: &Session, path: &Path) -> Result<()> {
    let csv = session.export_csv()?;
    fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Run one command against the session, returning false when the session should end
pub async fn execute<W: Write>(
    session: &mut Session,
    command: SessionCommand,
    out: &mut W,
) -> Result<bool> {
    match command {
        SessionCommand::Add {
            date,
            category,
            amount,
            description,
        } => {
            session.add_expense(date, category, amount, &description)?;
            writeln!(out, "✅ Expense added successfully!")?;
        }
        SessionCommand::Dashboard => {
            write!(out, "{}", render_dashboard(session.store().records()))?;
            let outcome = session.advice().await;
            write!(out, "{}", render_advice(&outcome))?;
        }
        SessionCommand::Summary => write!(out, "{}", render_summary(session.store().records()))?,
        SessionCommand::Categories => {
            write!(out, "{}", render_categories(session.store().records()))?
        }
        SessionCommand::Daily => write!(out, "{}", render_daily(session.store().records()))?,
        SessionCommand::Monthly => write!(out, "{}", render_monthly(session.store().records()))?,
        SessionCommand::Records => write!(out, "{}", render_records(session.store().records()))?,
        SessionCommand::Advice => {
            let outcome = session.advice().await;
            write!(out, "{}", render_advice(&outcome))?;
        }
        SessionCommand::Export(path) => {
            if session.store().is_empty() {
                writeln!(out, "Nothing to export yet.")?;
            } else {
                write_export(session, &path)?;
                writeln!(
                    out,
                    "📤 Exported {} expenses to {}",
                    session.store().len(),
                    path.display()
                )?;
            }
        }
        SessionCommand::Help => writeln!(out, "{}", HELP)?,
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Drive a session from any line source
///
/// Bad input is reported and the loop carries on; only I/O failures end it.
pub async fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    today: NaiveDate,
) -> Result<()> {
    write!(out, "paisa> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        match parse_command(&line, today) {
            Ok(Some(command)) => match execute(session, command, out).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => writeln!(out, "❌ {:#}", e)?,
            },
            Ok(None) => {}
            Err(e) => writeln!(out, "❌ {:#}", e)?,
        }

        write!(out, "paisa> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

pub async fn cmd_session(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut session = Session::new(build_advisor(&config));

    println!("💰 Smart Personal Expense Tracker");
    println!("   Type 'help' for commands, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let today = Local::now().date_naive();
    run_session(&mut session, stdin.lock(), &mut stdout, today).await?;

    if !session.store().is_empty() {
        println!(
            "Session ended; {} expenses were not saved (use 'export' to keep them).",
            session.store().len()
        );
    }
    Ok(())
}
