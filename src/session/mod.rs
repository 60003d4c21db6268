//! The review session engine.
//!
//! Runs one note file until its due queue drains or the human quits. The
//! outer loop re-reads and re-parses the file, so a mid-session edit can
//! add, remove, or change cards without the engine ever operating on stale
//! text. Identity is content-derived, so a re-parse reconstructs the same
//! cards; the `reviewed` set is what keeps already-handled cards from
//! resurfacing, not object identity.

mod models;

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::cards::{parse_chunks, CardId, Chunk};
use crate::presenter::{Outcome, Present, PresenterError};
use crate::schedule::{self, Grade, ScheduleStore, StoreError};

pub use models::{HistoryEntry, SessionEnd, SessionSummary, StudyMode};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Schedule store error: {0}")]
    Store(#[from] StoreError),

    #[error("Presenter error: {0}")]
    Presenter(#[from] PresenterError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// One interactive review pass over a single note file.
///
/// The session owns its queue and history exclusively; both die with it.
/// Within one inner pass cards appear in file order, except for the
/// undo-driven reinsertion, which replays the previous card immediately.
pub struct ReviewSession<'a, P: Present> {
    file: &'a Path,
    store: &'a ScheduleStore,
    presenter: &'a mut P,
    today: NaiveDate,
    mode: StudyMode,
    reviewed: HashSet<CardId>,
    history: Vec<HistoryEntry>,
}

impl<'a, P: Present> ReviewSession<'a, P> {
    pub fn new(
        file: &'a Path,
        store: &'a ScheduleStore,
        presenter: &'a mut P,
        today: NaiveDate,
        mode: StudyMode,
    ) -> Self {
        Self {
            file,
            store,
            presenter,
            today,
            mode,
            reviewed: HashSet::new(),
            history: Vec::new(),
        }
    }

    /// Run the session to completion.
    pub fn run(mut self) -> Result<SessionSummary> {
        loop {
            let queue = self.load_due_queue()?;
            if queue.is_empty() {
                log::info!(
                    "Session over {} finished: {} card(s) reviewed",
                    self.file.display(),
                    self.reviewed.len()
                );
                return Ok(self.summary(SessionEnd::Completed));
            }
            if let Some(end) = self.present_queue(queue)? {
                return Ok(self.summary(end));
            }
        }
    }

    /// Re-read the file from disk and build the presentation queue in file
    /// order. File content must never be cached across outer iterations:
    /// the edit outcome exists precisely to change it.
    fn load_due_queue(&self) -> Result<VecDeque<Chunk>> {
        let text = std::fs::read_to_string(self.file).map_err(|source| SessionError::Read {
            path: self.file.to_path_buf(),
            source,
        })?;

        let mut queue = VecDeque::new();
        for chunk in parse_chunks(&text) {
            let id = chunk.id();
            if self.reviewed.contains(&id) {
                continue;
            }
            if self.mode == StudyMode::Scheduled && !self.store.is_due(&id, self.today)? {
                continue;
            }
            queue.push_back(chunk);
        }
        Ok(queue)
    }

    /// Inner presentation loop. `Ok(Some(end))` terminates the session;
    /// `Ok(None)` falls through to the outer re-parse.
    fn present_queue(&mut self, mut queue: VecDeque<Chunk>) -> Result<Option<SessionEnd>> {
        while let Some(chunk) = queue.pop_front() {
            match self.presenter.present(&chunk)? {
                Outcome::Quit => return Ok(Some(SessionEnd::Quit)),
                Outcome::Edit => {
                    // The popped card is neither reviewed nor in history:
                    // the re-parse decides whether it is still due, or
                    // still exists at all.
                    self.presenter.edit_file(self.file, chunk.question())?;
                    return Ok(None);
                }
                Outcome::Undo => match self.history.pop() {
                    // Undo past the start of history ends the session.
                    None => return Ok(Some(SessionEnd::Quit)),
                    Some(entry) => {
                        self.rewind(&entry)?;
                        queue.push_front(chunk);
                        queue.push_front(entry.chunk);
                    }
                },
                Outcome::Graded(grade) => self.record(chunk, grade)?,
            }
        }
        Ok(None)
    }

    /// Apply a grade: snapshot the previous state, reschedule, mark the
    /// card resolved for this session.
    fn record(&mut self, chunk: Chunk, grade: Grade) -> Result<()> {
        let id = chunk.id();
        let previous = self.store.get(&id)?;
        let next = schedule::next_record(id, previous.as_ref(), grade, self.today);

        if self.mode == StudyMode::Scheduled {
            self.store.upsert(&next)?;
        }
        log::debug!(
            "{:?} on {}: index {} due {}",
            grade,
            id,
            next.interval_index,
            next.due_date
        );

        self.history.push(HistoryEntry {
            card_id: id,
            previous,
            chunk,
        });
        self.reviewed.insert(id);
        Ok(())
    }

    /// Reverse exactly one recorded review, restoring the store snapshot
    /// and un-resolving the card so it can be shown again.
    fn rewind(&mut self, entry: &HistoryEntry) -> Result<()> {
        if self.mode == StudyMode::Scheduled {
            match &entry.previous {
                Some(record) => self.store.upsert(record)?,
                None => {
                    self.store.delete(&entry.card_id)?;
                }
            }
        }
        self.reviewed.remove(&entry.card_id);
        Ok(())
    }

    fn summary(&self, end: SessionEnd) -> SessionSummary {
        SessionSummary {
            reviewed: self.reviewed.len(),
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter;
    use crate::schedule::ScheduleRecord;
    use chrono::Duration;
    use tempfile::TempDir;

    /// Presenter that replays a fixed script of outcomes and can rewrite
    /// the note file when the edit outcome fires.
    struct ScriptedPresenter {
        outcomes: VecDeque<Outcome>,
        rewrite_on_edit: Option<String>,
        edited: Vec<String>,
    }

    impl ScriptedPresenter {
        fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                rewrite_on_edit: None,
                edited: Vec::new(),
            }
        }

        fn rewriting_to(mut self, content: &str) -> Self {
            self.rewrite_on_edit = Some(content.to_string());
            self
        }
    }

    impl Present for ScriptedPresenter {
        fn present(&mut self, _chunk: &Chunk) -> presenter::Result<Outcome> {
            Ok(self.outcomes.pop_front().expect("presenter script exhausted"))
        }

        fn edit_file(&mut self, path: &Path, question_line: &str) -> presenter::Result<()> {
            self.edited.push(question_line.to_string());
            if let Some(content) = self.rewrite_on_edit.take() {
                std::fs::write(path, content).unwrap();
            }
            Ok(())
        }
    }

    fn day0() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn note_file(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("notes.txt");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn id(line: &str) -> CardId {
        CardId::of_line(line)
    }

    const TWO_CARDS: &str = "? A\nanswer a\n\n? B\nanswer b\n";

    #[test]
    fn test_correct_then_wrong_end_to_end() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Correct),
            Outcome::Graded(Grade::Wrong),
        ]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 2);

        let a = store.get(&id("? A")).unwrap().unwrap();
        assert_eq!(a.interval_index, 1);
        assert_eq!(a.due_date, day0() + Duration::days(1));

        let b = store.get(&id("? B")).unwrap().unwrap();
        assert_eq!(b.interval_index, 0);
        assert_eq!(b.due_date, day0());

        // Same-day rerun: only B is due again.
        let mut p = ScriptedPresenter::new([Outcome::Graded(Grade::Wrong)]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();
        assert_eq!(summary.reviewed, 1);
        assert_eq!(
            store.get(&id("? A")).unwrap().unwrap().due_date,
            day0() + Duration::days(1)
        );
    }

    #[test]
    fn test_nothing_due_completes_without_presenting() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();
        for line in ["? A", "? B"] {
            store
                .upsert(&ScheduleRecord {
                    card_id: id(line),
                    due_date: day0() + Duration::days(1),
                    interval_index: 2,
                })
                .unwrap();
        }

        // An empty script panics on any present() call, so completion here
        // proves nothing was shown.
        let mut p = ScriptedPresenter::new([]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();
        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 0);
    }

    #[test]
    fn test_quit_ends_immediately() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        let mut p = ScriptedPresenter::new([Outcome::Quit]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();
        assert_eq!(summary.end, SessionEnd::Quit);
        assert_eq!(summary.reviewed, 0);
        assert_eq!(store.get(&id("? A")).unwrap(), None);
    }

    #[test]
    fn test_undo_restores_store_exactly() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();
        let seeded = ScheduleRecord {
            card_id: id("? A"),
            due_date: day0() - Duration::days(2),
            interval_index: 3,
        };
        store.upsert(&seeded).unwrap();

        // Wrong on A, undo while B is up, then quit.
        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Wrong),
            Outcome::Undo,
            Outcome::Quit,
        ]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        assert_eq!(summary.end, SessionEnd::Quit);
        assert_eq!(summary.reviewed, 0);
        assert_eq!(store.get(&id("? A")).unwrap(), Some(seeded));
    }

    #[test]
    fn test_undo_of_new_card_deletes_record() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Correct),
            Outcome::Undo,
            Outcome::Quit,
        ]);
        ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
            .run()
            .unwrap();

        // Not an index-0 due-today record: the row is gone entirely.
        assert_eq!(store.get(&id("? A")).unwrap(), None);
    }

    #[test]
    fn test_undo_replays_previous_card_then_current() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        // Correct on A; undo while B is up; A replays first (wrong this
        // time), then B (correct). Queue drains, re-parse finds nothing.
        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Correct),
            Outcome::Undo,
            Outcome::Graded(Grade::Wrong),
            Outcome::Graded(Grade::Correct),
        ]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 2);
        assert_eq!(store.get(&id("? A")).unwrap().unwrap().interval_index, 0);
        assert_eq!(store.get(&id("? B")).unwrap().unwrap().interval_index, 1);
    }

    #[test]
    fn test_undo_with_empty_history_ends_session() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        let mut p = ScriptedPresenter::new([Outcome::Undo]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        assert_eq!(summary.end, SessionEnd::Quit);
        assert_eq!(store.get(&id("? A")).unwrap(), None);
        assert_eq!(store.get(&id("? B")).unwrap(), None);
    }

    #[test]
    fn test_skip_stays_due_and_never_advances() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, "? A\nanswer a\n");
        let store = ScheduleStore::open_in_memory().unwrap();

        for _ in 0..3 {
            let mut p = ScriptedPresenter::new([Outcome::Graded(Grade::Skip)]);
            let summary =
                ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                    .run()
                    .unwrap();
            assert_eq!(summary.reviewed, 1);
        }

        let a = store.get(&id("? A")).unwrap().unwrap();
        assert_eq!(a.interval_index, 0);
        assert_eq!(a.due_date, day0());
    }

    #[test]
    fn test_edit_triggers_reparse_of_fresh_content() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        // Edit while A is up; the edit deletes A from the file. The session
        // must continue with B rather than erroring on the vanished card.
        let mut p = ScriptedPresenter::new([Outcome::Edit, Outcome::Graded(Grade::Correct)])
            .rewriting_to("? B\nanswer b\n");
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        assert_eq!(p.edited, ["? A"]);
        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 1);
        assert_eq!(store.get(&id("? A")).unwrap(), None);
        assert_eq!(store.get(&id("? B")).unwrap().unwrap().interval_index, 1);
    }

    #[test]
    fn test_edited_card_is_not_marked_reviewed() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, "? A\nanswer a\n");
        let store = ScheduleStore::open_in_memory().unwrap();

        // Edit leaves the file unchanged, so A comes straight back.
        let mut p = ScriptedPresenter::new([Outcome::Edit, Outcome::Graded(Grade::Correct)]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        assert_eq!(summary.reviewed, 1);
        assert_eq!(store.get(&id("? A")).unwrap().unwrap().interval_index, 1);
    }

    #[test]
    fn test_reviewed_cards_stay_resolved_across_reparse() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        // Grade A, then edit while B is up (file unchanged). The re-parse
        // must surface only B again, never A.
        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Wrong),
            Outcome::Edit,
            Outcome::Graded(Grade::Correct),
        ]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Scheduled)
                .run()
                .unwrap();

        // Wrong leaves A due today; if the re-parse re-showed it, the
        // script would run out of outcomes and panic.
        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 2);
    }

    #[test]
    fn test_cram_shows_undue_cards_and_leaves_store_alone() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();
        let seeded = ScheduleRecord {
            card_id: id("? A"),
            due_date: day0() + Duration::days(30),
            interval_index: 5,
        };
        store.upsert(&seeded).unwrap();

        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Wrong),
            Outcome::Graded(Grade::Correct),
        ]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Cram)
                .run()
                .unwrap();

        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 2);
        // A's real schedule survives the wrong answer; B never got a record.
        assert_eq!(store.get(&id("? A")).unwrap(), Some(seeded));
        assert_eq!(store.get(&id("? B")).unwrap(), None);
    }

    #[test]
    fn test_cram_undo_rewinds_session_bookkeeping() {
        let temp = TempDir::new().unwrap();
        let file = note_file(&temp, TWO_CARDS);
        let store = ScheduleStore::open_in_memory().unwrap();

        let mut p = ScriptedPresenter::new([
            Outcome::Graded(Grade::Correct),
            Outcome::Undo,
            Outcome::Graded(Grade::Correct),
            Outcome::Graded(Grade::Correct),
        ]);
        let summary =
            ReviewSession::new(&file, &store, &mut p, day0(), StudyMode::Cram)
                .run()
                .unwrap();

        assert_eq!(summary.end, SessionEnd::Completed);
        assert_eq!(summary.reviewed, 2);
        assert_eq!(store.get(&id("? A")).unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let store = ScheduleStore::open_in_memory().unwrap();
        let mut p = ScriptedPresenter::new([]);
        let result = ReviewSession::new(
            Path::new("/no/such/file.txt"),
            &store,
            &mut p,
            day0(),
            StudyMode::Scheduled,
        )
        .run();
        assert!(matches!(result, Err(SessionError::Read { .. })));
    }
}
