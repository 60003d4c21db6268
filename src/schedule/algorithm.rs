//! Fixed-interval scheduling.
//!
//! No ease factors, no per-card statistics: the schedule is a fixed table
//! of day offsets. A correct answer advances the card one step (saturating
//! at the last interval), a wrong answer resets it to the first, and a skip
//! leaves it in place while keeping the card due today.

use chrono::{Duration, NaiveDate};

use super::models::{Grade, ScheduleRecord, INTERVALS_DAYS};
use crate::cards::CardId;

/// Compute the next schedule state for a card given a review grade.
///
/// `current` is the card's existing record, if any; a card never seen
/// before grades as if it sat at the head of the interval table.
pub fn next_record(
    card_id: CardId,
    current: Option<&ScheduleRecord>,
    grade: Grade,
    today: NaiveDate,
) -> ScheduleRecord {
    let index = current.map_or(0, |r| r.interval_index);

    let (interval_index, due_date) = match grade {
        Grade::Wrong => (0, today),
        Grade::Correct => {
            let next = (index + 1).min(INTERVALS_DAYS.len() - 1);
            (next, today + Duration::days(i64::from(INTERVALS_DAYS[next])))
        }
        Grade::Skip => (index, today),
    };

    ScheduleRecord {
        card_id,
        due_date,
        interval_index,
    }
}

/// Whether a card should be shown on `today`. A card with no record is
/// always due.
pub fn is_due(record: Option<&ScheduleRecord>, today: NaiveDate) -> bool {
    record.map_or(true, |r| r.is_due(today))
}
