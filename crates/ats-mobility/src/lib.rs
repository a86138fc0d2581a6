//! `ats-mobility` — geometric agent movement along path edges.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`state`]  | `TravelState`, `EdgeTraversal`, `Progress`                    |
//! | [`engine`] | `MovementEngine` — begin travel, per-tick stepping            |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                          |
//!
//! # Movement model
//!
//! Each tick an agent in transit advances a fixed distance along its current
//! edge's length-indexed polyline.  When the advance overshoots the edge's
//! bound in the direction of travel, the remainder carries into the next
//! edge — possibly crossing several short edges within one tick.  On
//! exhausting the last edge the agent snaps to the terminal vertex *exactly*
//! and the engine reports arrival; downstream logic compares coordinates,
//! not distances, to detect it.

pub mod engine;
pub mod error;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::MovementEngine;
pub use error::{MobilityError, MobilityResult};
pub use state::{EdgeTraversal, Progress, TravelState};
