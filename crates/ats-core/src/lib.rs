//! `ats-core` — foundational types for the `rust_ats` activity-travel simulator.
//!
//! This crate is a dependency of every other `ats-*` crate.  It intentionally
//! has no `ats-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `NodeId`, `EdgeId`, `ActivityId`               |
//! | [`geo`]     | `Point`, Euclidean distance                               |
//! | [`time`]    | `Tick`, `Interval`, `Weekday`, `SimClock`, `SimConfig`    |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`needs`]   | `Need`, `NeedTimeSplit`, `NeedLedger`                     |
//! | [`network`] | `NetworkKind` (household / work / friends)                |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod error;
pub mod geo;
pub mod ids;
pub mod needs;
pub mod network;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{ActivityId, AgentId, EdgeId, NodeId};
pub use needs::{Need, NeedLedger, NeedTimeSplit};
pub use network::NetworkKind;
pub use rng::{AgentRng, SimRng};
pub use time::{Interval, SimClock, SimConfig, Tick, Weekday, MINUTES_PER_DAY};
