//! `ats-agent` — the population arena for the rust_ats framework.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`membership`] | `Membership` (per-network peers + daily counter), `PlaceSet` |
//! | [`store`]      | `PopulationStore` (SoA arena), `AgentRngs`               |
//! | [`builder`]    | `PopulationBuilder` (validated construction)             |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                           |
//!
//! # Arena model
//!
//! All agent state lives in [`PopulationStore`], indexed by `AgentId`.  No
//! agent holds a reference into another agent's state; cross-agent effects
//! (a peer committing a joint activity into this agent's joint agenda) are
//! writes through `&mut PopulationStore` performed by whichever phase owns
//! the store at that moment.  Combined with the engine's strict phase
//! ordering this makes the single-threaded sharing model explicit and safe.

pub mod builder;
pub mod error;
pub mod membership;
pub mod store;


pub use builder::{AgentSpec, PopulationBuilder};
pub use error::{AgentError, AgentResult};
pub use membership::{Membership, PlaceSet};
pub use store::{AgentRngs, PopulationStore};
