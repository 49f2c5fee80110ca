//! Recruitment & Hiring Engine
//!
//! Runs on a periodic cycle: ages the applicant pool, recruits fresh
//! applicants, scores everyone's attraction against the current active
//! composition, filters by threshold, and promotes the top-ranked
//! applicants into the organization.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::agent::{Active, IdAllocator, IdentityCategory, Personality, Preferences};
use crate::components::applicant::{Applicant, ApplicantPool};
use crate::config::{SelectionCriteria, SimulationConfig};
use crate::setup::population::{generate_applicants, promote_applicant};
use crate::simulation::{SimState, StepEvents};
use crate::SimRng;

use super::composition::{category_proportions, diversity_index};

/// Age every applicant by one cycle and drop those past the limit.
///
/// Fails open: stale applicants are silently removed.
pub fn age_pool(applicants: &mut Vec<Applicant>, max_application_time: u32) {
    for applicant in applicants.iter_mut() {
        applicant.application_time += 1;
    }
    applicants.retain(|a| a.application_time <= max_application_time);
}

/// Rescore every applicant's attraction against the organization.
///
/// `attraction = homophily * own_category_proportion + diversity * index`;
/// categories absent from the organization contribute a proportion of zero.
pub fn score_attraction(applicants: &mut [Applicant], proportions: &[f64], diversity: f64) {
    for applicant in applicants.iter_mut() {
        let own_proportion = proportions.get(applicant.category).copied().unwrap_or(0.0);
        applicant.attraction =
            applicant.preferences.homophily * own_proportion
                + applicant.preferences.diversity * diversity;
    }
}

/// Drop applicants whose attraction falls below the threshold
pub fn filter_pool(applicants: &mut Vec<Applicant>, min_attraction: f64) {
    applicants.retain(|a| a.attraction >= min_attraction);
}

/// Order the pool so the best hires come first
pub fn rank_pool(applicants: &mut [Applicant], criteria: SelectionCriteria, rng: &mut SmallRng) {
    match criteria {
        SelectionCriteria::Conscientiousness => {
            applicants.sort_by(|a, b| {
                b.personality
                    .conscientiousness
                    .partial_cmp(&a.personality.conscientiousness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SelectionCriteria::Fit => {
            applicants.sort_by(|a, b| {
                b.attraction
                    .partial_cmp(&a.attraction)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SelectionCriteria::Random => {
            applicants.shuffle(rng);
        }
    }
}

/// Hires this cycle: round(active_size * growth_rate), capped by pool size
pub fn number_to_hire(active_size: usize, growth_rate: f64, pool_size: usize) -> usize {
    let target = (active_size as f64 * growth_rate).round() as usize;
    target.min(pool_size)
}

/// Richer fit diagnostic: attraction minus personality and preference
/// distance from the organization's trait means.
///
/// Not part of the hiring ranking — the `fit` criterion ranks by plain
/// attraction. Exposed for external analysis of applicant/organization fit.
pub fn fit_score(
    applicant: &Applicant,
    personality_means: &Personality,
    preference_means: &Preferences,
) -> f64 {
    let p = &applicant.personality;
    let personality_distance = ((p.openness - personality_means.openness).powi(2)
        + (p.conscientiousness - personality_means.conscientiousness).powi(2)
        + (p.extraversion - personality_means.extraversion).powi(2)
        + (p.agreeableness - personality_means.agreeableness).powi(2)
        + (p.emotional_stability - personality_means.emotional_stability).powi(2))
    .sqrt();
    let preference_distance = ((applicant.preferences.homophily - preference_means.homophily)
        .powi(2)
        + (applicant.preferences.diversity - preference_means.diversity).powi(2))
    .sqrt();
    applicant.attraction - personality_distance - preference_distance
}

/// System running the full hiring cycle on steps where
/// `step % hiring_frequency == 0`.
pub fn run_hiring_cycle(
    config: Res<SimulationConfig>,
    state: Res<SimState>,
    mut rng: ResMut<SimRng>,
    mut allocator: ResMut<IdAllocator>,
    mut pool: ResMut<ApplicantPool>,
    mut events: ResMut<StepEvents>,
    mut commands: Commands,
    agents: Query<(&IdentityCategory, &Active)>,
) {
    if state.current_step % config.hiring_frequency != 0 {
        return;
    }

    age_pool(&mut pool.applicants, config.max_application_time);

    let fresh = generate_applicants(
        &mut rng.0,
        &mut allocator,
        config.n_new_applicants,
        config.n_categories(),
    );
    pool.applicants.extend(fresh);

    // Active composition the applicants are scored against
    let mut counts = vec![0usize; config.n_categories()];
    let mut active_size = 0usize;
    for (category, active) in agents.iter() {
        if active.is_active() {
            counts[category.0] += 1;
            active_size += 1;
        }
    }
    let proportions = category_proportions(&counts);
    let diversity = diversity_index(config.diversity_metric, &proportions);

    score_attraction(&mut pool.applicants, &proportions, diversity);
    filter_pool(&mut pool.applicants, config.applicant_attraction_threshold);

    let n_to_hire = number_to_hire(active_size, config.growth_rate, pool.len());
    if n_to_hire == 0 || pool.is_empty() {
        return;
    }

    rank_pool(&mut pool.applicants, config.selection_criteria, &mut rng.0);
    for applicant in pool.applicants.drain(0..n_to_hire) {
        commands.spawn(promote_applicant(applicant, state.current_step));
    }
    events.hires += n_to_hire as u32;
}
