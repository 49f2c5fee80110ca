//! Attrition Engine
//!
//! One-way state machine over each agent's active flag. Either every active
//! agent below the satisfaction threshold departs (deterministic), or each
//! takes an independent Bernoulli draw with a satisfaction-dependent
//! probability. Departures are counted into `StepEvents`; nothing is ever
//! reactivated here.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::agent::{Active, Employment, Satisfaction};
use crate::config::{SimulationConfig, TurnoverType};
use crate::simulation::StepEvents;
use crate::SimRng;

/// Tenure below which the leave probability gets a 1.5x multiplier
const SHORT_TENURE_STEPS: u32 = 12;
/// Multiplier applied to short-tenure agents
const SHORT_TENURE_MULTIPLIER: f64 = 1.5;
/// Bounds on the per-step leave probability
const MIN_LEAVE_PROBABILITY: f64 = 0.001;
const MAX_LEAVE_PROBABILITY: f64 = 0.5;

/// Per-step leave probability under the probabilistic policy.
///
/// `base_rate / (1 + exp(satisfaction * weight))`, multiplied by 1.5 for
/// agents with tenure under 12 steps, then clamped to [0.001, 0.5].
pub fn leave_probability(satisfaction: f64, tenure: u32, base_rate: f64, weight: f64) -> f64 {
    let mut p = base_rate / (1.0 + (satisfaction * weight).exp());
    if tenure < SHORT_TENURE_STEPS {
        p *= SHORT_TENURE_MULTIPLIER;
    }
    p.clamp(MIN_LEAVE_PROBABILITY, MAX_LEAVE_PROBABILITY)
}

/// System applying the configured attrition policy to all active agents
pub fn process_attrition(
    config: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<StepEvents>,
    mut agents: Query<(&Satisfaction, &Employment, &mut Active)>,
) {
    let mut departures = 0u32;

    match config.turnover_type {
        TurnoverType::Threshold => {
            for (satisfaction, _, mut active) in agents.iter_mut() {
                if active.is_active() && satisfaction.0 < config.turnover_threshold {
                    active.0 = false;
                    departures += 1;
                }
            }
        }
        TurnoverType::Probabilistic => {
            // One draw per active agent, in query (spawn) order
            for (satisfaction, employment, mut active) in agents.iter_mut() {
                if !active.is_active() {
                    continue;
                }
                let p = leave_probability(
                    satisfaction.0,
                    employment.tenure,
                    config.base_turnover_rate,
                    config.turnover_satisfaction_weight,
                );
                if rng.0.gen::<f64>() < p {
                    active.0 = false;
                    departures += 1;
                }
            }
        }
    }

    events.departures += departures;
}
