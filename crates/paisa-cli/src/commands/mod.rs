//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, advisor, report loading) and categories
//! - `export` - Normalized CSV export
//! - `prompts` - Prompt library management commands
//! - `reports` - Dashboard rendering, report and advise commands
//! - `session` - Interactive session

pub mod core;
pub mod export;
pub mod prompts;
pub mod reports;
pub mod session;

// Re-export command functions for main.rs
pub use self::core::*;
pub use export::*;
pub use prompts::*;
pub use reports::*;
pub use session::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
