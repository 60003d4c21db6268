//! Data models for the schedule.

use chrono::NaiveDate;

use crate::cards::CardId;

/// Review intervals in days. A card's interval index points into this table;
/// each correct answer moves it one step right until it saturates at the
/// final interval.
pub const INTERVALS_DAYS: [u32; 7] = [0, 1, 3, 7, 14, 28, 56];

/// The human's graded response to a presented card, as fed to the scheduler.
/// Quit/edit/undo are session-control outcomes and never reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    /// Recalled: advance one interval.
    Correct,
    /// Forgotten: back to the first interval, due today.
    Wrong,
    /// Deferred: interval untouched, still due today.
    Skip,
}

/// Persistent schedule state for one card.
///
/// Absence of a record means "never seen", which counts as due; records are
/// created on the first recorded outcome and mutated in place afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub card_id: CardId,
    pub due_date: NaiveDate,
    /// 0-based index into [`INTERVALS_DAYS`].
    pub interval_index: usize,
}

impl ScheduleRecord {
    /// Whether this card should be shown on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date <= today
    }
}
