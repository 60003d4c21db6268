//! mnemo — spaced repetition for plain-text notes, reviewed in vim.
//!
//! Note files hold question/answer chunks: a line starting with `?` opens a
//! question and the lines below it are the answer. Due chunks are presented
//! one at a time in vim, and the exit code of each visit decides the review
//! outcome. Schedule state lives in a small sqlite database keyed by a hash
//! of the question line, so cards need no markup beyond the marker itself.

pub mod cards;
pub mod config;
pub mod presenter;
pub mod schedule;
pub mod session;
pub mod vault;
