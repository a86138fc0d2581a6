//! `ats-output` — CSV activity-diary recording.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`row`]      | `EpisodeRow` — one diary line                         |
//! | [`diary`]    | `DiaryWriter` — the CSV backend                       |
//! | [`observer`] | `DiaryObserver` — bridges `EngineObserver` to a writer|
//! | [`error`]    | `OutputError`, `OutputResult<T>`                      |
//!
//! The observer coalesces per-tick statuses into *episodes*: one row per
//! contiguous run of (activity, occupancy, node) per agent per day.  A
//! 1,440-tick day therefore produces a handful of rows per agent, matching
//! the activity-diary format used in travel-behavior research.

pub mod diary;
pub mod error;
pub mod observer;
pub mod row;

#[cfg(test)]
mod tests;

pub use diary::DiaryWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DiaryObserver;
pub use row::EpisodeRow;
