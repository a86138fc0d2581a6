//! Read-only planning inputs shared by all pipeline stages.

use ats_core::Weekday;
use ats_schedule::ActivityCatalog;

use crate::PlanConfig;

/// A read-only bundle of everything the planning stages consult.
///
/// Built once per planning phase and shared immutably; the agent-specific
/// mutable state (agendas, RNGs) is passed separately so borrows stay
/// disjoint.
pub struct PlanContext<'a> {
    pub catalog: &'a ActivityCatalog,
    pub config: &'a PlanConfig,
    /// Weekday of the day being planned.
    pub weekday: Weekday,
}

impl<'a> PlanContext<'a> {
    #[inline]
    pub fn new(catalog: &'a ActivityCatalog, config: &'a PlanConfig, weekday: Weekday) -> Self {
        Self { catalog, config, weekday }
    }
}
