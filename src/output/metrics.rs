//! Step Metrics
//!
//! One row of aggregate statistics per simulation step, computed over the
//! active population after all other systems have run.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::agent::{
    Active, Employment, IdentityCategory, Personality, Preferences, Satisfaction,
};
use crate::config::SimulationConfig;
use crate::simulation::{SimState, StepEvents};
use crate::systems::composition::{blau, category_proportions, shannon};

/// Aggregate statistics for a single step
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepMetrics {
    pub step: u64,
    pub active_size: usize,
    pub hires: u32,
    pub departures: u32,
    pub blau_index: f64,
    pub shannon_index: f64,
    pub satisfaction_mean: f64,
    pub satisfaction_sd: f64,
    pub openness_mean: f64,
    pub openness_sd: f64,
    pub conscientiousness_mean: f64,
    pub conscientiousness_sd: f64,
    pub extraversion_mean: f64,
    pub extraversion_sd: f64,
    pub agreeableness_mean: f64,
    pub agreeableness_sd: f64,
    pub emotional_stability_mean: f64,
    pub emotional_stability_sd: f64,
    pub homophily_mean: f64,
    pub homophily_sd: f64,
    pub diversity_preference_mean: f64,
    pub diversity_preference_sd: f64,
    pub tenure_mean: f64,
}

/// Resource accumulating one metrics row per step
#[derive(Resource, Debug, Default)]
pub struct MetricsHistory {
    pub rows: Vec<StepMetrics>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean and population standard deviation; (0, 0) for an empty slice
pub fn mean_sd(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// System recording this step's metrics row
pub fn record_metrics(
    config: Res<SimulationConfig>,
    state: Res<SimState>,
    events: Res<StepEvents>,
    mut history: ResMut<MetricsHistory>,
    agents: Query<(
        &Personality,
        &Preferences,
        &IdentityCategory,
        &Satisfaction,
        &Employment,
        &Active,
    )>,
) {
    let mut counts = vec![0usize; config.n_categories()];
    let mut satisfaction = Vec::new();
    let mut openness = Vec::new();
    let mut conscientiousness = Vec::new();
    let mut extraversion = Vec::new();
    let mut agreeableness = Vec::new();
    let mut emotional_stability = Vec::new();
    let mut homophily = Vec::new();
    let mut diversity_preference = Vec::new();
    let mut tenure_total = 0u64;

    for (personality, prefs, category, sat, employment, active) in agents.iter() {
        if !active.is_active() {
            continue;
        }
        counts[category.0] += 1;
        satisfaction.push(sat.0);
        openness.push(personality.openness);
        conscientiousness.push(personality.conscientiousness);
        extraversion.push(personality.extraversion);
        agreeableness.push(personality.agreeableness);
        emotional_stability.push(personality.emotional_stability);
        homophily.push(prefs.homophily);
        diversity_preference.push(prefs.diversity);
        tenure_total += employment.tenure as u64;
    }

    let active_size = satisfaction.len();
    let proportions = category_proportions(&counts);
    let (satisfaction_mean, satisfaction_sd) = mean_sd(&satisfaction);
    let (openness_mean, openness_sd) = mean_sd(&openness);
    let (conscientiousness_mean, conscientiousness_sd) = mean_sd(&conscientiousness);
    let (extraversion_mean, extraversion_sd) = mean_sd(&extraversion);
    let (agreeableness_mean, agreeableness_sd) = mean_sd(&agreeableness);
    let (emotional_stability_mean, emotional_stability_sd) = mean_sd(&emotional_stability);
    let (homophily_mean, homophily_sd) = mean_sd(&homophily);
    let (diversity_preference_mean, diversity_preference_sd) = mean_sd(&diversity_preference);

    history.rows.push(StepMetrics {
        step: state.current_step,
        active_size,
        hires: events.hires,
        departures: events.departures,
        blau_index: blau(&proportions),
        shannon_index: shannon(&proportions),
        satisfaction_mean,
        satisfaction_sd,
        openness_mean,
        openness_sd,
        conscientiousness_mean,
        conscientiousness_sd,
        extraversion_mean,
        extraversion_sd,
        agreeableness_mean,
        agreeableness_sd,
        emotional_stability_mean,
        emotional_stability_sd,
        homophily_mean,
        homophily_sd,
        diversity_preference_mean,
        diversity_preference_sd,
        tenure_mean: if active_size > 0 {
            tenure_total as f64 / active_size as f64
        } else {
            0.0
        },
    });
}
