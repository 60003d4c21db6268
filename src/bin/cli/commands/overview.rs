use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use mnemo::vault;

use crate::app::App;
use crate::OutputFormat;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DueEntry {
    path: String,
    due: usize,
}

pub fn run(app: &App, root: &Path, format: &OutputFormat) -> Result<()> {
    if !root.exists() {
        bail!("Path not found: {}", root.display());
    }

    let today = app.today();

    // Opportunistic maintenance: drop records whose question no longer
    // appears anywhere under the tracked root.
    let live = vault::live_card_ids(&app.config.root)
        .context("Failed to scan note files for orphan pruning")?;
    app.store.prune_orphans(&live)?;

    match format {
        OutputFormat::Json => {
            let files = if root.is_file() {
                vec![root.to_path_buf()]
            } else {
                vault::note_files(root)
            };

            let mut entries = Vec::with_capacity(files.len());
            for file in files {
                let due = vault::due_count_in_file(&app.store, &file, today)?;
                let path = file.strip_prefix(root).unwrap_or(&file);
                entries.push(DueEntry {
                    path: path.display().to_string(),
                    due,
                });
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if root.is_file() {
                let due = vault::due_count_in_file(&app.store, root, today)?;
                let name = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.display().to_string());
                println!("{} {}", name, due);
                return Ok(());
            }

            println!(".");
            print_tree(app, root, "", today)?;
        }
    }

    Ok(())
}

/// Recursive due-count tree: directories first, then note files, each file
/// suffixed with its due count.
fn print_tree(app: &App, dir: &Path, prefix: &str, today: NaiveDate) -> Result<()> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push((name, path));
        } else if path
            .extension()
            .map_or(false, |ext| ext == vault::NOTE_EXTENSION)
        {
            files.push((name, path));
        }
    }
    dirs.sort();
    files.sort();

    let total = dirs.len() + files.len();
    let mut idx = 0;

    for (name, path) in &dirs {
        idx += 1;
        let is_last = idx == total;
        let connector = if is_last { "\u{2514}\u{2500}\u{2500} " } else { "\u{251c}\u{2500}\u{2500} " };
        println!("{}{}{}/", prefix, connector, name);

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "\u{2502}   " });
        print_tree(app, path, &child_prefix, today)?;
    }

    for (name, path) in &files {
        idx += 1;
        let is_last = idx == total;
        let connector = if is_last { "\u{2514}\u{2500}\u{2500} " } else { "\u{251c}\u{2500}\u{2500} " };
        let due = vault::due_count_in_file(&app.store, path, today)?;
        println!("{}{}{} {}", prefix, connector, name, due);
    }

    Ok(())
}
