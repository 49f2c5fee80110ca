//! Population Generation
//!
//! Creates employees and applicants with i.i.d. standard-normal attributes
//! and uniformly random identity categories. All randomness flows through
//! the caller-supplied RNG in a fixed draw order (category, five personality
//! traits, two preferences) so seeded runs are reproducible.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::components::agent::{
    Active, AgentId, Attraction, Employment, IdAllocator, IdentityCategory, Personality,
    Preferences, Satisfaction,
};
use crate::components::applicant::Applicant;

/// Everything an employee entity carries
#[derive(Bundle)]
pub struct EmployeeBundle {
    pub id: AgentId,
    pub category: IdentityCategory,
    pub personality: Personality,
    pub preferences: Preferences,
    pub satisfaction: Satisfaction,
    pub attraction: Attraction,
    pub employment: Employment,
    pub active: Active,
}

/// Summary of a seeded organization
#[derive(Debug)]
pub struct SpawnSummary {
    pub total_agents: usize,
    /// Agent count per category index
    pub by_category: Vec<usize>,
}

fn standard_normal(rng: &mut SmallRng) -> f64 {
    rng.sample(StandardNormal)
}

/// Generate Big-Five traits, each drawn standard-normal
pub fn generate_personality(rng: &mut SmallRng) -> Personality {
    Personality {
        openness: standard_normal(rng),
        conscientiousness: standard_normal(rng),
        extraversion: standard_normal(rng),
        agreeableness: standard_normal(rng),
        emotional_stability: standard_normal(rng),
    }
}

/// Generate homophily/diversity preferences, each drawn standard-normal
pub fn generate_preferences(rng: &mut SmallRng) -> Preferences {
    Preferences {
        homophily: standard_normal(rng),
        diversity: standard_normal(rng),
    }
}

/// Seed the organization with `n` active employees at step 0.
///
/// Callers guarantee `n > 0` and `n_categories > 0`; configuration
/// validation enforces both before any run starts.
pub fn spawn_organization(
    world: &mut World,
    rng: &mut SmallRng,
    allocator: &mut IdAllocator,
    n: usize,
    n_categories: usize,
) -> SpawnSummary {
    assert!(n > 0, "organization size must be positive");
    assert!(n_categories > 0, "category set must not be empty");

    let mut by_category = vec![0usize; n_categories];
    for _ in 0..n {
        let category = rng.gen_range(0..n_categories);
        by_category[category] += 1;
        world.spawn(EmployeeBundle {
            id: allocator.next_id(),
            category: IdentityCategory(category),
            personality: generate_personality(rng),
            preferences: generate_preferences(rng),
            satisfaction: Satisfaction(0.0),
            attraction: Attraction(0.0),
            employment: Employment::hired_at(0),
            active: Active::new(),
        });
    }

    SpawnSummary {
        total_agents: n,
        by_category,
    }
}

/// Generate `n` fresh applicants with the same attribute distribution as
/// employees but applicant lifecycle fields.
pub fn generate_applicants(
    rng: &mut SmallRng,
    allocator: &mut IdAllocator,
    n: usize,
    n_categories: usize,
) -> Vec<Applicant> {
    assert!(n_categories > 0, "category set must not be empty");

    (0..n)
        .map(|_| Applicant {
            id: allocator.next_id(),
            category: rng.gen_range(0..n_categories),
            personality: generate_personality(rng),
            preferences: generate_preferences(rng),
            attraction: 0.0,
            application_time: 0,
        })
        .collect()
}

/// Convert an applicant into an employee bundle at `hire_step`.
///
/// Pure field transformation: id, category, traits, preferences, and the
/// final attraction score carry over; applicant-only fields are dropped.
pub fn promote_applicant(applicant: Applicant, hire_step: u64) -> EmployeeBundle {
    EmployeeBundle {
        id: applicant.id,
        category: IdentityCategory(applicant.category),
        personality: applicant.personality,
        preferences: applicant.preferences,
        satisfaction: Satisfaction(0.0),
        attraction: Attraction(applicant.attraction),
        employment: Employment::hired_at(hire_step),
        active: Active::new(),
    }
}
