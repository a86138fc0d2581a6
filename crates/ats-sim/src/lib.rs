//! `ats-sim` — day-phase driver and tick executor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`engine`]   | `Engine` — phases, tick loop, `AgentStatus`, `Occupancy`  |
//! | [`observer`] | `EngineObserver` trait, `NoopObserver`                    |
//! | [`builder`]  | `EngineBuilder`                                           |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Phase ordering (per simulated day)
//!
//! ```text
//! begin_day                      reset joint/working agendas, counters, ledgers
//! plan_joint_activities          all agents × all networks, fixed order
//! carry_over_joint_activities    working := joint copy, planned ledger rebuilt
//! plan_individual_activities     K candidates per agent
//! choose_best_agenda             augment → score → commit winner (pre-travel)
//! execute_tick × 1440            movement + need crediting, clock advances
//! ```
//!
//! Each phase runs over *all* agents before the next phase starts.  This
//! barrier is load-bearing: negotiation writes into peers' joint agendas, so
//! carrying over before every agent finished negotiating would read stale
//! agendas.  Everything is single-threaded; the arena is the only holder of
//! agent state.

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;


pub use builder::EngineBuilder;
pub use engine::{AgentStatus, Engine, Occupancy};
pub use error::{SimError, SimResult};
pub use observer::{EngineObserver, NoopObserver};
