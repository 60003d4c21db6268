use std::path::Path;

use anyhow::{bail, Context, Result};

use mnemo::cards::parse_chunks;

use crate::app::App;

pub fn run(app: &App, file: &Path) -> Result<()> {
    if !file.is_file() {
        bail!("File not found: {}", file.display());
    }

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let chunks = parse_chunks(&text);
    if chunks.is_empty() {
        println!("No questions found in this file.");
        return Ok(());
    }

    let mut forgotten = 0;
    for chunk in &chunks {
        if app.store.delete(&chunk.id())? {
            forgotten += 1;
        }
    }

    println!("Forgot {} question(s) from the schedule.", forgotten);
    Ok(())
}
