//! Satisfaction Engine
//!
//! Recomputes every active agent's satisfaction from the trailing window of
//! its interactions as focal agent plus structural composition terms. Draws
//! no randomness: calling it twice on an unchanged log gives identical
//! values.

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::components::agent::{
    Active, Attraction, IdentityCategory, Personality, Preferences, Satisfaction,
};
use crate::components::interaction::InteractionLog;
use crate::config::SimulationConfig;
use crate::simulation::SimState;

use super::composition::{category_proportions, diversity_index};

/// System updating satisfaction for all active agents; inactive agents are
/// untouched.
pub fn update_satisfaction(
    config: Res<SimulationConfig>,
    state: Res<SimState>,
    log: Res<InteractionLog>,
    mut agents: Query<(
        Entity,
        &Personality,
        &Preferences,
        &IdentityCategory,
        &Attraction,
        &Active,
        &mut Satisfaction,
    )>,
) {
    // Composition of the active population, computed once per call
    let mut counts = vec![0usize; config.n_categories()];
    for (_, _, _, category, _, active, _) in agents.iter() {
        if active.is_active() {
            counts[category.0] += 1;
        }
    }
    let proportions = category_proportions(&counts);
    let diversity = diversity_index(config.diversity_metric, &proportions);

    // Mean windowed valence per focal agent
    let mut valence_sums: HashMap<Entity, (f64, u32)> = HashMap::new();
    for record in log.window(state.current_step, config.interaction_window) {
        let entry = valence_sums.entry(record.focal).or_insert((0.0, 0));
        entry.0 += record.valence;
        entry.1 += 1;
    }

    for (entity, personality, prefs, category, attraction, active, mut satisfaction) in
        agents.iter_mut()
    {
        if !active.is_active() {
            continue;
        }
        let interaction_component = valence_sums
            .get(&entity)
            .map(|&(sum, count)| sum / count as f64)
            .unwrap_or(0.0);

        satisfaction.0 = attraction.0
            + interaction_component
            + prefs.homophily * proportions[category.0]
            + prefs.diversity * diversity
            + personality.emotional_stability;
    }
}
