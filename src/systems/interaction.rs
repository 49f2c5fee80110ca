//! Interaction Sampler
//!
//! Each step, every active agent draws k random partners from the roster
//! (excluding itself; repeats across draws allowed) and records a valence
//! per directed pair. Valence is focal-centered and asymmetric: the partner
//! gets no mirrored record.

use bevy_ecs::prelude::*;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::components::agent::{IdentityCategory, Personality, Preferences};
use crate::components::interaction::{InteractionLog, InteractionRecord};
use crate::config::SimulationConfig;
use crate::simulation::SimState;
use crate::SimRng;

use super::roster::ActiveRoster;

/// Deterministic part of the valence formula.
///
/// `-|extra_F - extra_P| + (consc_F - extra_P) + agree_F + identity_bonus`
/// where the bonus is the focal agent's homophily preference when the pair
/// shares a category, its diversity preference otherwise.
pub fn base_valence(
    focal: &Personality,
    focal_prefs: &Preferences,
    partner: &Personality,
    same_category: bool,
) -> f64 {
    let identity_bonus = if same_category {
        focal_prefs.homophily
    } else {
        focal_prefs.diversity
    };
    -(focal.extraversion - partner.extraversion).abs()
        + (focal.conscientiousness - partner.extraversion)
        + focal.agreeableness
        + identity_bonus
}

/// System sampling this step's interactions and appending them to the log.
///
/// With fewer than 2 active agents this is a no-op: no records, no RNG
/// draws. Partner draws and noise draws happen in roster order, which fixes
/// the RNG consumption sequence for reproducibility.
pub fn sample_interactions(
    config: Res<SimulationConfig>,
    state: Res<SimState>,
    roster: Res<ActiveRoster>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<InteractionLog>,
    agents: Query<(&Personality, &Preferences, &IdentityCategory)>,
) {
    let entities = roster.entities();
    let n = entities.len();
    if n < 2 {
        return;
    }

    for (focal_index, &focal) in entities.iter().enumerate() {
        let (focal_personality, focal_prefs, focal_category) = agents
            .get(focal)
            .expect("roster entity missing agent components");
        // Lower emotional stability means noisier perception of the interaction
        let noise_sd = (-focal_personality.emotional_stability).exp();

        for _ in 0..config.n_interactions_per_step {
            // Uniform over the roster excluding the focal agent
            let mut partner_index = rng.0.gen_range(0..n - 1);
            if partner_index >= focal_index {
                partner_index += 1;
            }
            let partner = entities[partner_index];
            let (partner_personality, _, partner_category) = agents
                .get(partner)
                .expect("roster entity missing agent components");

            let base = base_valence(
                focal_personality,
                focal_prefs,
                partner_personality,
                focal_category.0 == partner_category.0,
            );
            let noise: f64 = rng.0.sample::<f64, _>(StandardNormal) * noise_sd;

            log.push(InteractionRecord {
                focal,
                partner,
                step: state.current_step,
                valence: base + noise,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::Active;
    use crate::systems::roster::build_active_roster;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn personality(conscientiousness: f64, extraversion: f64) -> Personality {
        Personality {
            openness: 0.0,
            conscientiousness,
            extraversion,
            agreeableness: 0.0,
            emotional_stability: 0.0,
        }
    }

    fn test_world(config: SimulationConfig) -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(SimState::default());
        world.insert_resource(ActiveRoster::new());
        world.insert_resource(InteractionLog::new());
        world.insert_resource(SimRng(SmallRng::seed_from_u64(42)));

        let mut schedule = Schedule::default();
        schedule.add_systems((build_active_roster, sample_interactions).chain());
        (world, schedule)
    }

    #[test]
    fn test_base_valence_analytic_value() {
        // conscientiousness [1, -1], extraversion [0, 1]:
        // -|0 - 1| + (1 - 1) + agreeableness + identity_bonus
        let focal = personality(1.0, 0.0);
        let partner = personality(-1.0, 1.0);
        let prefs = Preferences {
            homophily: 0.25,
            diversity: -0.5,
        };

        let same = base_valence(&focal, &prefs, &partner, true);
        assert!((same - (-1.0 + 0.0 + 0.0 + 0.25)).abs() < 1e-12);

        let different = base_valence(&focal, &prefs, &partner, false);
        assert!((different - (-1.0 + 0.0 + 0.0 - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_two_agents_one_interaction_each() {
        let config = SimulationConfig {
            n_interactions_per_step: 1,
            ..Default::default()
        };
        let (mut world, mut schedule) = test_world(config);

        let a = world
            .spawn((
                personality(1.0, 0.0),
                Preferences { homophily: 0.0, diversity: 0.0 },
                IdentityCategory(0),
                Active(true),
            ))
            .id();
        let b = world
            .spawn((
                personality(-1.0, 1.0),
                Preferences { homophily: 0.0, diversity: 0.0 },
                IdentityCategory(1),
                Active(true),
            ))
            .id();

        schedule.run(&mut world);

        let log = world.resource::<InteractionLog>();
        assert_eq!(log.len(), 2);
        // Each agent's only possible partner is the other one
        let records = log.records();
        assert_eq!(records[0].focal, a);
        assert_eq!(records[0].partner, b);
        assert_eq!(records[1].focal, b);
        assert_eq!(records[1].partner, a);
    }

    #[test]
    fn test_fewer_than_two_active_agents_is_noop() {
        let (mut world, mut schedule) = test_world(SimulationConfig::default());

        world.spawn((
            personality(0.0, 0.0),
            Preferences { homophily: 0.0, diversity: 0.0 },
            IdentityCategory(0),
            Active(true),
        ));
        world.spawn((
            personality(0.0, 0.0),
            Preferences { homophily: 0.0, diversity: 0.0 },
            IdentityCategory(0),
            Active(false),
        ));

        schedule.run(&mut world);
        assert!(world.resource::<InteractionLog>().is_empty());
    }

    #[test]
    fn test_k_records_per_active_agent() {
        let config = SimulationConfig {
            n_interactions_per_step: 3,
            ..Default::default()
        };
        let (mut world, mut schedule) = test_world(config);

        for i in 0..5 {
            world.spawn((
                personality(0.0, 0.0),
                Preferences { homophily: 0.0, diversity: 0.0 },
                IdentityCategory(i % 2),
                Active(true),
            ));
        }

        schedule.run(&mut world);
        assert_eq!(world.resource::<InteractionLog>().len(), 5 * 3);
    }

    #[test]
    fn test_no_self_pairing() {
        let config = SimulationConfig {
            n_interactions_per_step: 10,
            ..Default::default()
        };
        let (mut world, mut schedule) = test_world(config);

        for _ in 0..4 {
            world.spawn((
                personality(0.0, 0.0),
                Preferences { homophily: 0.0, diversity: 0.0 },
                IdentityCategory(0),
                Active(true),
            ));
        }

        schedule.run(&mut world);
        for record in world.resource::<InteractionLog>().records() {
            assert_ne!(record.focal, record.partner);
        }
    }
}
