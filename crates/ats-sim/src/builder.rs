//! Fluent builder for constructing an [`Engine`].

use ats_core::{AgentId, SimConfig};
use ats_agent::{AgentRngs, PopulationStore};
use ats_mobility::MovementEngine;
use ats_plan::PlanConfig;
use ats_schedule::{ActivityCatalog, LocationKind};
use ats_spatial::{PathNetwork, Router};

use crate::{Engine, SimError, SimResult};

/// Fluent builder for [`Engine<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — days, seed, start weekday
/// - [`ActivityCatalog`] — validated activity definitions
/// - [`PathNetwork`] — the routable path graph
/// - [`PopulationStore`] + [`AgentRngs`] — from
///   [`ats_agent::PopulationBuilder`]
/// - `R: Router` — the routing algorithm (e.g. [`ats_spatial::AStarRouter`])
///
/// # Optional inputs
///
/// | Method           | Default            |
/// |------------------|--------------------|
/// | `.plan_config(c)`| `PlanConfig::new()`|
///
/// # Example
///
/// ```rust,ignore
/// let (pop, rngs) = population_builder.build()?;
/// let mut engine = EngineBuilder::new(config, catalog, network, pop, rngs, AStarRouter)
///     .plan_config(plan_config)
///     .build()?;
/// engine.run(&mut NoopObserver)?;
/// ```
pub struct EngineBuilder<R: Router> {
    config: SimConfig,
    catalog: ActivityCatalog,
    network: PathNetwork,
    pop: PopulationStore,
    rngs: AgentRngs,
    router: R,
    plan_config: Option<PlanConfig>,
}

impl<R: Router> EngineBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(
        config: SimConfig,
        catalog: ActivityCatalog,
        network: PathNetwork,
        pop: PopulationStore,
        rngs: AgentRngs,
        router: R,
    ) -> Self {
        Self {
            config,
            catalog,
            network,
            pop,
            rngs,
            router,
            plan_config: None,
        }
    }

    /// Override the default planning configuration.
    pub fn plan_config(mut self, plan_config: PlanConfig) -> Self {
        self.plan_config = Some(plan_config);
        self
    }

    /// Validate inputs, place every agent at its home anchor, and return a
    /// ready-to-run [`Engine`].
    pub fn build(self) -> SimResult<Engine<R>> {
        let agent_count = self.pop.count;

        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got: self.rngs.len(),
                what: "agent RNGs",
            });
        }

        let plan_config = match self.plan_config {
            Some(c) => c,
            None => PlanConfig::new()?,
        };

        // Every anchor and alternate must exist in the network — a dangling
        // node would only surface mid-simulation otherwise.
        let node_count = self.network.node_count();
        for (i, places) in self.pop.places.iter().enumerate() {
            for kind in LocationKind::ALL {
                let anchor = places.anchor(kind);
                if anchor.index() >= node_count {
                    return Err(SimError::Config(format!(
                        "agent {i}: {kind} anchor {anchor} not in network"
                    )));
                }
                if let Some(&node) = places
                    .alternates(kind)
                    .iter()
                    .find(|n| n.index() >= node_count)
                {
                    return Err(SimError::Config(format!(
                        "agent {i}: {kind} alternate {node} not in network"
                    )));
                }
            }
        }

        // Initial placement: everyone starts the first day at home.
        let mut movement = MovementEngine::new(plan_config.speed_m_per_min, agent_count);
        for agent in 0..agent_count {
            let home = self.pop.places[agent].anchor(LocationKind::Household);
            movement.place(AgentId(agent as u32), home, &self.network);
        }

        Ok(Engine::new(
            self.config,
            plan_config,
            self.catalog,
            self.network,
            self.pop,
            self.rngs,
            movement,
            self.router,
        ))
    }
}
