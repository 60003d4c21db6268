//! Process-start configuration.
//!
//! Resolved once at command entry and threaded explicitly into whatever
//! needs it; nothing here is mutable runtime state.

use std::path::PathBuf;

/// Environment variable overriding the default note root.
pub const ROOT_ENV: &str = "MNEMO_ROOT";

/// Environment variable overriding the editor binary.
pub const VIM_ENV: &str = "MNEMO_VIM";

const DB_FILE_NAME: &str = ".mnemo.db";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of tracked note files.
    pub root: PathBuf,
    /// Schedule database location.
    pub db_path: PathBuf,
    /// Editor binary used as the review surface.
    pub vim: String,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// The note root defaults to `~/mnemo`; the schedule database lives
    /// inside it as a dotfile so the note walker never picks it up.
    /// Returns `None` only when no home directory can be determined and
    /// `MNEMO_ROOT` is unset.
    pub fn resolve() -> Option<Self> {
        let root = match std::env::var_os(ROOT_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()?.join("mnemo"),
        };
        let db_path = root.join(DB_FILE_NAME);
        let vim = std::env::var(VIM_ENV).unwrap_or_else(|_| "vim".to_string());

        Some(Self { root, db_path, vim })
    }
}
