//! Engine observer trait for progress reporting and data collection.

use ats_core::{AgentId, Tick, Weekday};
use ats_agent::PopulationStore;
use ats_schedule::Agenda;

use crate::engine::AgentStatus;

/// Callbacks invoked by [`Engine::run_day`][crate::Engine::run_day] at key
/// points of the day cycle.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl EngineObserver for ProgressPrinter {
///     fn on_day_start(&mut self, day: u64, weekday: Weekday) {
///         println!("planning day {day} ({weekday})");
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after the day reset, before any planning phase.
    fn on_day_start(&mut self, _day: u64, _weekday: Weekday) {}

    /// Called once per agent after plan selection committed its agenda.
    fn on_agenda_committed(&mut self, _agent: AgentId, _agenda: &Agenda) {}

    /// Called after every execution tick with all agents' statuses,
    /// indexed by `AgentId`.
    fn on_tick(&mut self, _tick: Tick, _statuses: &[AgentStatus]) {}

    /// Called after the last tick of a day.
    fn on_day_end(&mut self, _day: u64, _pop: &PopulationStore) {}

    /// Called once after the final configured day completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// An [`EngineObserver`] that does nothing.  Use when you need to call
/// `run` but don't want callbacks.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
