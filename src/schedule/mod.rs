//! Scheduling: the fixed interval table, the pure transition function, and
//! the sqlite-backed store that persists per-card state.

pub mod algorithm;
pub mod models;
pub mod storage;

pub use algorithm::{is_due, next_record};
pub use models::{Grade, ScheduleRecord, INTERVALS_DAYS};
pub use storage::{ScheduleStore, StoreError};
