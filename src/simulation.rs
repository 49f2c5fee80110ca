//! Simulation Driver
//!
//! Owns the canonical run state: the ECS world (agent arena, interaction
//! log, applicant pool, RNG) and the fixed per-step schedule. The driver is
//! the sole sequencing point; systems run strictly in order each step:
//! tenure, roster, interactions, satisfaction, attrition, hiring, metrics.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;

use crate::components::agent::{Active, Employment, IdAllocator};
use crate::components::applicant::ApplicantPool;
use crate::components::interaction::InteractionLog;
use crate::config::{ConfigError, SimulationConfig};
use crate::output::metrics::{record_metrics, MetricsHistory, StepMetrics};
use crate::output::table::{agent_table, AgentRow};
use crate::setup::population::{generate_applicants, spawn_organization};
use crate::systems::{
    accrue_tenure, build_active_roster, process_attrition, run_hiring_cycle,
    sample_interactions, update_satisfaction, ActiveRoster,
};
use crate::SimRng;

/// Current simulation time, in steps (0 before the first step)
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimState {
    pub current_step: u64,
}

/// Observable per-step hire and departure counts.
///
/// Cleared by the driver at the start of each step and populated by the
/// attrition and hiring systems; callers read it after stepping.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct StepEvents {
    pub hires: u32,
    pub departures: u32,
}

/// Run lifecycle: initialized, stepping, done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Running,
    Completed,
}

/// Summary returned when a run finishes
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub steps_run: u64,
    pub final_active_size: usize,
    pub total_hires: u32,
    pub total_departures: u32,
}

/// A single simulation run: one organization, one seeded RNG, one schedule
pub struct Simulation {
    world: World,
    schedule: Schedule,
    n_steps: u64,
    state: RunState,
    /// Entities observed inactive; used to catch illegal reactivation
    inactive_seen: HashSet<Entity>,
}

impl Simulation {
    /// Validate the configuration, seed the organization and applicant
    /// pool, and assemble the per-step schedule.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut allocator = IdAllocator::new();

        // Seeding draw order: organization first, then the initial pool
        spawn_organization(
            &mut world,
            &mut rng,
            &mut allocator,
            config.initial_size,
            config.n_categories(),
        );
        let mut pool = ApplicantPool::new();
        pool.applicants = generate_applicants(
            &mut rng,
            &mut allocator,
            config.n_new_applicants,
            config.n_categories(),
        );

        let n_steps = config.n_steps;
        world.insert_resource(config);
        world.insert_resource(SimRng(rng));
        world.insert_resource(allocator);
        world.insert_resource(pool);
        world.insert_resource(SimState::default());
        world.insert_resource(StepEvents::default());
        world.insert_resource(ActiveRoster::new());
        world.insert_resource(InteractionLog::new());
        world.insert_resource(MetricsHistory::new());

        // Fixed per-step order; later systems depend on earlier mutations
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                accrue_tenure,
                build_active_roster,
                sample_interactions,
                update_satisfaction,
                process_attrition,
                run_hiring_cycle,
                record_metrics,
            )
                .chain(),
        );

        Ok(Self {
            world,
            schedule,
            n_steps,
            state: RunState::Initialized,
            inactive_seen: HashSet::new(),
        })
    }

    /// Advance the simulation by one step
    pub fn step(&mut self) {
        assert!(
            self.state != RunState::Completed,
            "step called on a completed simulation"
        );
        self.state = RunState::Running;

        let step = {
            let mut state = self.world.resource_mut::<SimState>();
            state.current_step += 1;
            state.current_step
        };
        *self.world.resource_mut::<StepEvents>() = StepEvents::default();

        self.schedule.run(&mut self.world);

        let events = *self.world.resource::<StepEvents>();
        if events.hires > 0 || events.departures > 0 {
            tracing::info!(
                step,
                hires = events.hires,
                departures = events.departures,
                "population changed"
            );
        } else {
            tracing::debug!(step, "step complete");
        }

        self.audit_invariants(step);

        if step >= self.n_steps {
            self.state = RunState::Completed;
        }
    }

    /// Run all remaining steps and summarize
    pub fn run(&mut self) -> RunReport {
        while self.state != RunState::Completed {
            self.step();
        }
        self.report()
    }

    /// Summary of the steps run so far
    pub fn report(&self) -> RunReport {
        let history = self.world.resource::<MetricsHistory>();
        let total_hires = history.rows.iter().map(|r| r.hires).sum();
        let total_departures = history.rows.iter().map(|r| r.departures).sum();
        let final_active_size = history.rows.last().map(|r| r.active_size).unwrap_or(0);

        RunReport {
            steps_run: self.current_step(),
            final_active_size,
            total_hires,
            total_departures,
        }
    }

    /// Cross-step state machine checks; violations indicate a broken
    /// implementation and abort the run.
    fn audit_invariants(&mut self, current_step: u64) {
        let mut query = self.world.query::<(Entity, &Active, &Employment)>();
        for (entity, active, employment) in query.iter(&self.world) {
            if active.is_active() {
                assert!(
                    !self.inactive_seen.contains(&entity),
                    "agent {:?} was reactivated after departing",
                    entity
                );
                assert!(
                    employment.hire_step <= current_step,
                    "active agent {:?} hired in the future (hire_step {}, step {})",
                    entity,
                    employment.hire_step,
                    current_step
                );
            } else {
                self.inactive_seen.insert(entity);
            }
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn current_step(&self) -> u64 {
        self.world.resource::<SimState>().current_step
    }

    /// Per-step metrics recorded so far
    pub fn metrics(&self) -> &[StepMetrics] {
        &self.world.resource::<MetricsHistory>().rows
    }

    /// Hire/departure counts from the most recent step
    pub fn last_step_events(&self) -> StepEvents {
        *self.world.resource::<StepEvents>()
    }

    /// Full agent table: every agent ever created, active and departed
    pub fn agent_table(&mut self) -> Vec<AgentRow> {
        agent_table(&mut self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurnoverType;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            n_steps: 12,
            initial_size: 30,
            n_new_applicants: 10,
            hiring_frequency: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_completes_all_steps() {
        let mut sim = Simulation::new(small_config(), 42).unwrap();
        assert_eq!(sim.run_state(), RunState::Initialized);

        let report = sim.run();

        assert_eq!(sim.run_state(), RunState::Completed);
        assert_eq!(report.steps_run, 12);
        assert_eq!(sim.metrics().len(), 12);
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let config = SimulationConfig {
            growth_rate: -0.5,
            ..small_config()
        };
        assert!(Simulation::new(config, 42).is_err());
    }

    #[test]
    #[should_panic(expected = "completed simulation")]
    fn test_step_after_completion_panics() {
        let mut sim = Simulation::new(small_config(), 42).unwrap();
        sim.run();
        sim.step();
    }

    #[test]
    fn test_step_events_match_metrics_row() {
        let config = SimulationConfig {
            turnover_type: TurnoverType::Probabilistic,
            base_turnover_rate: 1.0,
            ..small_config()
        };
        let mut sim = Simulation::new(config, 42).unwrap();

        sim.step();

        let events = sim.last_step_events();
        let row = &sim.metrics()[0];
        assert_eq!(row.hires, events.hires);
        assert_eq!(row.departures, events.departures);
    }

    #[test]
    fn test_agent_table_grows_only_by_hires() {
        let mut sim = Simulation::new(small_config(), 7).unwrap();
        let report = sim.run();

        let table = sim.agent_table();
        // Seeded employees plus everyone ever hired; departures never shrink it
        assert_eq!(table.len(), 30 + report.total_hires as usize);
        let active_rows = table.iter().filter(|r| r.is_active).count();
        assert_eq!(active_rows, report.final_active_size);
    }

    #[test]
    fn test_tenure_advances_with_steps() {
        let mut sim = Simulation::new(small_config(), 1).unwrap();
        sim.step();
        sim.step();
        sim.step();

        let table = sim.agent_table();
        for row in table.iter().filter(|r| r.is_active && r.hire_step == 0) {
            assert_eq!(row.tenure, 3);
        }
    }
}
