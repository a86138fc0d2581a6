//! `ats-plan` — the per-agent daily planning pipeline.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`config`]      | `PlanConfig`, `DurationParams`                          |
//! | [`context`]     | `PlanContext` — read-only planning inputs               |
//! | [`negotiation`] | `NegotiationCoordinator` — joint-activity scheduling    |
//! | [`generator`]   | `DayPlanGenerator` — stochastic gap filling             |
//! | [`travel`]      | `TravelAugmenter` — insert travel episodes              |
//! | [`selector`]    | `PlanSelector` — MSE scoring and argmin selection       |
//! | [`error`]       | `PlanError`, `PlanResult<T>`                            |
//!
//! # Pipeline (once per agent per day)
//!
//! ```text
//! negotiate joint activities   (mutates peers' joint agendas via the arena)
//!   → carry over into a working agenda
//!   → generate K candidate day plans          (DayPlanGenerator)
//!   → augment each with travel episodes       (TravelAugmenter)
//!   → score vs. the target need split, argmin (PlanSelector)
//!   → commit the winner's pre-travel agenda
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod negotiation;
pub mod selector;
pub mod travel;

#[cfg(test)]
mod tests;

pub use config::{DurationParams, PlanConfig};
pub use context::PlanContext;
pub use error::{PlanError, PlanResult};
pub use generator::DayPlanGenerator;
pub use negotiation::NegotiationCoordinator;
pub use selector::PlanSelector;
pub use travel::TravelAugmenter;
