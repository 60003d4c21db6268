//! Vim as the review surface.
//!
//! A chunk is piped to vim on stdin with the answer lines deleted from the
//! visible buffer (`normal ggjdG`), so a freshly opened card shows only the
//! question; the human recovers the answer with undo-tree travel
//! (`:earlier 9999h`) and leaves through a binding that exits with the
//! outcome code. Notes typed into the buffer stay with the human; the
//! scheduler only reads the exit status.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::cards::Chunk;

use super::{Outcome, Present, PresenterError, Result};

pub struct VimPresenter {
    /// Editor binary, usually `vim`.
    program: String,
    /// Buffer name shown in the status line, usually the note file path.
    buffer_name: Option<String>,
}

impl VimPresenter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            buffer_name: None,
        }
    }

    /// Name the review buffer after the file under review.
    pub fn with_buffer_name(mut self, name: impl Into<String>) -> Self {
        self.buffer_name = Some(name.into());
        self
    }

    fn clear_screen(&self) {
        let _ = Command::new("clear").status();
    }
}

impl Present for VimPresenter {
    fn present(&mut self, chunk: &Chunk) -> Result<Outcome> {
        self.clear_screen();

        let mut cmd = Command::new(&self.program);
        cmd.arg("-c").arg("normal ggjdG");
        if let Some(name) = &self.buffer_name {
            cmd.arg("-c").arg(format!("file {}", name));
        }
        cmd.arg("-").stdin(Stdio::piped());

        let mut child = cmd.spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(chunk.text().as_bytes())?;
        }
        let status = child.wait()?;

        match status.code() {
            Some(code) => {
                log::debug!("Review buffer exited with code {}", code);
                Outcome::from_exit_code(code).ok_or(PresenterError::UnrecognizedExit(code))
            }
            None => Err(PresenterError::Terminated),
        }
    }

    fn edit_file(&mut self, path: &Path, question_line: &str) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        if let Some(line) = find_line_number(path, question_line) {
            cmd.arg(format!("+{}", line)).arg("-c").arg("normal zt");
        }
        cmd.arg(path);

        let status = cmd.status()?;
        if !status.success() {
            log::warn!(
                "Editor exited with {:?} while editing {}",
                status.code(),
                path.display()
            );
        }
        self.clear_screen();
        Ok(())
    }
}

/// 1-based line number of the first line equal to `question_line`, if any.
/// An unreadable file just means no jump target.
fn find_line_number(path: &Path, question_line: &str) -> Option<usize> {
    let content = std::fs::read_to_string(path).ok()?;
    content
        .lines()
        .position(|line| line == question_line)
        .map(|i| i + 1)
}
