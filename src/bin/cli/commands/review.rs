use std::path::Path;

use anyhow::{bail, Context, Result};

use mnemo::presenter::VimPresenter;
use mnemo::session::{ReviewSession, SessionEnd, StudyMode};

use crate::app::App;

pub fn run(app: &App, file: &Path) -> Result<()> {
    if !file.is_file() {
        bail!("File not found: {}", file.display());
    }

    let mut presenter =
        VimPresenter::new(&app.config.vim).with_buffer_name(file.display().to_string());

    let summary = ReviewSession::new(
        file,
        &app.store,
        &mut presenter,
        app.today(),
        StudyMode::Scheduled,
    )
    .run()
    .with_context(|| format!("Review session over {} failed", file.display()))?;

    if summary.reviewed == 0 && summary.end == SessionEnd::Completed {
        println!("No due questions in this file.");
    }

    Ok(())
}
