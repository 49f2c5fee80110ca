//! Agent Table
//!
//! Serializable rows for the final full agent table: every agent ever
//! created, active and departed alike.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::agent::{
    Active, AgentId, Attraction, Employment, IdentityCategory, Personality, Preferences,
    Satisfaction,
};
use crate::config::SimulationConfig;

/// One agent's full record
#[derive(Debug, Clone, Serialize)]
pub struct AgentRow {
    pub id: String,
    pub identity_category: String,
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub emotional_stability: f64,
    pub homophily_preference: f64,
    pub diversity_preference: f64,
    pub attraction: f64,
    pub satisfaction: f64,
    pub tenure: u32,
    pub hire_step: u64,
    pub is_active: bool,
}

/// Extract the full agent table, in spawn order
pub fn agent_table(world: &mut World) -> Vec<AgentRow> {
    let labels = world.resource::<SimulationConfig>().identity_categories.clone();
    let mut query = world.query::<(
        &AgentId,
        &IdentityCategory,
        &Personality,
        &Preferences,
        &Attraction,
        &Satisfaction,
        &Employment,
        &Active,
    )>();

    query
        .iter(world)
        .map(
            |(id, category, personality, prefs, attraction, satisfaction, employment, active)| {
                AgentRow {
                    id: id.0.clone(),
                    identity_category: labels[category.0].clone(),
                    openness: personality.openness,
                    conscientiousness: personality.conscientiousness,
                    extraversion: personality.extraversion,
                    agreeableness: personality.agreeableness,
                    emotional_stability: personality.emotional_stability,
                    homophily_preference: prefs.homophily,
                    diversity_preference: prefs.diversity,
                    attraction: attraction.0,
                    satisfaction: satisfaction.0,
                    tenure: employment.tenure,
                    hire_step: employment.hire_step,
                    is_active: active.is_active(),
                }
            },
        )
        .collect()
}
