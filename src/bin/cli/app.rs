use anyhow::{Context, Result};
use chrono::NaiveDate;

use mnemo::config::Config;
use mnemo::schedule::ScheduleStore;

/// Shared state for CLI commands: resolved configuration and the opened
/// schedule store.
pub struct App {
    pub config: Config,
    pub store: ScheduleStore,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::resolve()
            .context("Failed to resolve a home directory for the note root")?;

        let store = ScheduleStore::open(&config.db_path).with_context(|| {
            format!(
                "Failed to open schedule store at {}",
                config.db_path.display()
            )
        })?;

        Ok(Self { config, store })
    }

    /// The calendar date all due computations in this invocation use.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
