//! ASA Organizational Simulation Library
//!
//! Simulates Attraction-Selection-Attrition dynamics: agents with personality
//! and identity attributes join an organization, interact, accumulate
//! satisfaction, and leave, while the organization periodically recruits and
//! hires from an applicant pool.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, DiversityMetric, SelectionCriteria, SimulationConfig, TurnoverType};
pub use simulation::{RunReport, RunState, SimState, Simulation, StepEvents};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
