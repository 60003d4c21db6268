//! The presentation adapter.
//!
//! The session engine never talks to vim directly: it goes through the
//! [`Present`] trait, so tests can drive whole sessions with scripted
//! outcomes and no editor processes.

mod vim;

use std::path::Path;

use thiserror::Error;

use crate::cards::Chunk;
use crate::schedule::Grade;

pub use vim::VimPresenter;

/// What the human decided about a presented card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// End the session immediately.
    Quit,
    /// Open the note file itself for editing, then re-parse.
    Edit,
    /// Reverse the last recorded review.
    Undo,
    /// A grade that feeds the scheduler.
    Graded(Grade),
}

impl Outcome {
    /// Map an editor exit status to an outcome.
    ///
    /// The vim-side bindings leave the review buffer through `:cquit` with
    /// these codes; any other code is a protocol violation the caller must
    /// treat as fatal, since guessing intent could corrupt the schedule.
    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Quit),
            1 => Some(Self::Graded(Grade::Wrong)),
            2 => Some(Self::Edit),
            3 => Some(Self::Graded(Grade::Skip)),
            4 => Some(Self::Graded(Grade::Correct)),
            5 => Some(Self::Undo),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("Failed to launch editor: {0}")]
    Launch(#[from] std::io::Error),

    #[error("Editor exited with unrecognized code {0}")]
    UnrecognizedExit(i32),

    #[error("Editor was terminated by a signal")]
    Terminated,
}

pub type Result<T> = std::result::Result<T, PresenterError>;

/// Injected presentation capability: show a chunk, obtain an outcome.
pub trait Present {
    /// Present one chunk for review, blocking until the human decides.
    fn present(&mut self, chunk: &Chunk) -> Result<Outcome>;

    /// Open the note file itself in the editor, blocking until it closes.
    /// `question_line` positions the editor at the card under review.
    fn edit_file(&mut self, path: &Path, question_line: &str) -> Result<()>;
}
