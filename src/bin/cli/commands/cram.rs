use std::path::Path;

use anyhow::{bail, Context, Result};

use mnemo::cards::parse_chunks;
use mnemo::presenter::VimPresenter;
use mnemo::session::{ReviewSession, StudyMode};

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
    println!("Cram mode: {} question(s), schedule untouched", chunks.len());

    let mut presenter =
        VimPresenter::new(&app.config.vim).with_buffer_name(file.display().to_string());

    ReviewSession::new(
        file,
        &app.store,
        &mut presenter,
        app.today(),
        StudyMode::Cram,
    )
    .run()
    .with_context(|| format!("Cram session over {} failed", file.display()))?;

    Ok(())
}
