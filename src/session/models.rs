//! Session-local state types. Nothing in this module is ever persisted.

use crate::cards::{CardId, Chunk};
use crate::schedule::ScheduleRecord;

/// Snapshot taken before a review mutated the store — enough to reverse
/// exactly one mutation. `previous: None` means the card had no record, so
/// undoing restores "never seen" by deleting the row outright.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub card_id: CardId,
    pub previous: Option<ScheduleRecord>,
    pub chunk: Chunk,
}

/// Whether a session consults due dates and writes the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    /// Due cards only; outcomes persist.
    Scheduled,
    /// Every card regardless of schedule; the store is never written.
    Cram,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The queue drained and a re-parse found nothing further due.
    Completed,
    /// The human quit, or undid with an empty history.
    Quit,
}

/// What happened over one session, for the command layer to report.
#[derive(Debug, Clone, Copy)]
pub struct SessionSummary {
    /// Cards resolved this session (graded and not subsequently undone).
    pub reviewed: usize,
    pub end: SessionEnd,
}
