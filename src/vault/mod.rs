//! Note-file discovery under the tracked root.
//!
//! The vault is just a directory tree of plain-text note files; nothing
//! here mutates schedule state except the orphan-pruning input it feeds
//! the store.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use walkdir::WalkDir;

use crate::cards::{parse_chunks, CardId};
use crate::schedule::{storage, ScheduleStore};

/// File extension that marks a note file.
pub const NOTE_EXTENSION: &str = "txt";

/// Recursively collect note files under `root` in a stable sorted order.
/// Hidden files and directories are skipped, as is everything without the
/// note extension (including the schedule database itself).
pub fn note_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map_or(false, |ext| ext == NOTE_EXTENSION)
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.starts_with('.'))
}

/// Every card identity present in any note file under `root`.
///
/// Propagates read failures instead of skipping files: treating an
/// unreadable file's cards as dead would make the orphan pruner delete
/// live records.
pub fn live_card_ids(root: &Path) -> io::Result<HashSet<CardId>> {
    let mut ids = HashSet::new();
    for file in note_files(root) {
        let text = std::fs::read_to_string(&file)?;
        ids.extend(parse_chunks(&text).iter().map(|chunk| chunk.id()));
    }
    log::debug!("{} live card(s) under {}", ids.len(), root.display());
    Ok(ids)
}

/// Number of chunks in `path` due on `today`. A missing or unreadable file
/// counts zero; files can vanish mid-walk during a due-count display.
pub fn due_count_in_file(
    store: &ScheduleStore,
    path: &Path,
    today: NaiveDate,
) -> storage::Result<usize> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return Ok(0);
    };

    let mut count = 0;
    for chunk in parse_chunks(&text) {
        if store.is_due(&chunk.id(), today)? {
            count += 1;
        }
    }
    Ok(count)
}
