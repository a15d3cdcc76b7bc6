//! Export command implementation

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use paisa_core::export::write_csv;

use super::load_store;

/// Read an expense report and write it back out in normalized form
///
/// Writes to stdout when no output path is given.
pub fn cmd_export(input: &Path, output: Option<&Path>) -> Result<()> {
    let store = load_store(input)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_csv(file, store.records()).context("Failed to write CSV")?;
            eprintln!(
                "📤 Exported {} expenses to {}",
                store.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_csv(&mut handle, store.records()).context("Failed to write CSV")?;
            handle.flush()?;
        }
    }

    Ok(())
}
