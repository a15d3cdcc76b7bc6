//! Dashboard rendering and report command implementations
//!
//! Each section is rendered to a `String` so the interactive session and the
//! one-shot `report` command print exactly the same text.

use std::path::Path;

use anyhow::Result;
use paisa_core::aggregate;
use paisa_core::{format_currency, AdviceOutcome, Expense, Session};

use super::{build_advisor, load_config, load_store, truncate};

/// Shown wherever a table would be empty
pub const NO_RECORDS_MESSAGE: &str = "No expenses recorded yet. Start by adding an expense!";

const RULE: &str = "   ─────────────────────────────────────────────────────────────";
const BAR_WIDTH: usize = 24;

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(if value > 0.0 { 1 } else { 0 }, BAR_WIDTH))
}

/// Append one line of section text
fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// Start a section, returning the buffer it renders into
fn section(title: &str) -> String {
    let mut out = String::new();
    push_line(&mut out, "");
    push_line(&mut out, title);
    push_line(&mut out, RULE);
    out
}

fn push_empty(out: &mut String) {
    push_line(out, format!("   {}", NO_RECORDS_MESSAGE));
}

/// Total plus the category split (with share of total)
pub fn render_summary(records: &[Expense]) -> String {
    let mut out = section("📊 Expense Summary");

    if records.is_empty() {
        push_empty(&mut out);
        return out;
    }

    let total = aggregate::total(records);
    push_line(&mut out, format!("   Total Expenses: {}", format_currency(total)));
    push_line(&mut out, format!("   Records: {}", records.len()));
    if let Some((category, amount)) = aggregate::highest_category(records) {
        push_line(
            &mut out,
            format!("   Highest: {} ({})", category, format_currency(amount)),
        );
    }
    push_line(&mut out, "");

    let categories = aggregate::by_category(records);
    let max = categories.values().map(|c| c.total).fold(0.0, f64::max);
    for summary in categories.values() {
        let share = if total > 0.0 {
            summary.total / total * 100.0
        } else {
            0.0
        };
        push_line(
            &mut out,
            format!(
                "   {:20} {:>5.1}%  {}",
                truncate(summary.category.as_str(), 20),
                share,
                bar(summary.total, max)
            ),
        );
    }
    out
}

/// Per-day totals, oldest first
pub fn render_daily(records: &[Expense]) -> String {
    let mut out = section("📈 Expense Trends");

    let days = aggregate::by_day(records);
    if days.is_empty() {
        push_empty(&mut out);
        return out;
    }

    let max = days.iter().map(|d| d.total).fold(0.0, f64::max);
    for day in &days {
        push_line(
            &mut out,
            format!(
                "   {} │ {:>14} │ {}",
                day.date,
                format_currency(day.total),
                bar(day.total, max)
            ),
        );
    }
    out
}

/// All records, newest first
pub fn render_records(records: &[Expense]) -> String {
    let mut out = section("📝 Expense Records");

    if records.is_empty() {
        push_empty(&mut out);
        return out;
    }

    push_line(
        &mut out,
        format!(
            "   {:10} │ {:18} │ {:>14} │ {}",
            "Date", "Category", "Amount", "Description"
        ),
    );
    push_line(
        &mut out,
        "   ───────────┼────────────────────┼────────────────┼──────────────────",
    );
    for expense in aggregate::sorted_by_date_desc(records) {
        push_line(
            &mut out,
            format!(
                "   {:10} │ {:18} │ {:>14} │ {}",
                expense.date,
                truncate(expense.category.as_str(), 18),
                format_currency(expense.amount),
                truncate(&expense.description, 40)
            ),
        );
    }
    out
}

/// Total, average and count per category
pub fn render_categories(records: &[Expense]) -> String {
    let mut out = section("📊 Category-wise Analysis");

    if records.is_empty() {
        push_empty(&mut out);
        return out;
    }

    push_line(
        &mut out,
        format!(
            "   {:20} │ {:>14} │ {:>14} │ {:>5}",
            "Category", "Total Amount", "Average Amount", "Count"
        ),
    );
    push_line(
        &mut out,
        "   ─────────────────────┼────────────────┼────────────────┼───────",
    );
    for summary in aggregate::by_category(records).values() {
        push_line(
            &mut out,
            format!(
                "   {:20} │ {:>14} │ {:>14} │ {:>5}",
                truncate(summary.category.as_str(), 20),
                format_currency(summary.total),
                format_currency(summary.mean),
                summary.count
            ),
        );
    }
    out
}

/// Per-month totals, most recent month first
pub fn render_monthly(records: &[Expense]) -> String {
    let mut out = section("📅 Monthly Summary");

    let months = aggregate::by_month(records);
    if months.is_empty() {
        push_empty(&mut out);
        return out;
    }

    for month in &months {
        push_line(
            &mut out,
            format!("   {:20} {:>14}", month.label, format_currency(month.total)),
        );
    }
    out
}

pub fn render_advice(outcome: &AdviceOutcome) -> String {
    let mut out = section("🤖 AI Financial Advice");

    let icon = if outcome.is_warning() { "⚠️ " } else { "💡" };
    let mut lines = outcome.message().lines();
    if let Some(first) = lines.next() {
        push_line(&mut out, format!("   {} {}", icon, first));
    }
    for line in lines {
        push_line(&mut out, format!("      {}", line));
    }
    out
}

/// Every dashboard section except advice, in page order
pub fn render_dashboard(records: &[Expense]) -> String {
    let mut out = String::new();
    out.push_str(&render_summary(records));
    out.push_str(&render_daily(records));
    out.push_str(&render_records(records));
    if !records.is_empty() {
        out.push_str(&render_categories(records));
        out.push_str(&render_monthly(records));
    }
    out
}

pub async fn cmd_report(config_path: Option<&Path>, input: &Path, with_advice: bool) -> Result<()> {
    let store = load_store(input)?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│    💰 Smart Personal Expense Tracker    │");
    println!("╰─────────────────────────────────────────╯");
    print!("{}", render_dashboard(store.records()));

    if with_advice {
        let config = load_config(config_path)?;
        let mut session = Session::with_store(store, build_advisor(&config));
        let outcome = session.advice().await;
        print!("{}", render_advice(&outcome));
    }

    println!();
    Ok(())
}

pub async fn cmd_advise(config_path: Option<&Path>, input: &Path) -> Result<()> {
    let store = load_store(input)?;
    let config = load_config(config_path)?;
    let mut session = Session::with_store(store, build_advisor(&config));

    let outcome = session.advice().await;
    print!("{}", render_advice(&outcome));
    println!();
    Ok(())
}
