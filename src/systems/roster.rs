//! Active Roster Index
//!
//! Rebuilds the list of active agent entities at the start of every step.
//! Downstream systems sample and iterate through this roster, so its order
//! is the iteration order that seeded runs must reproduce: query iteration
//! follows spawn order because agents are never despawned.

use bevy_ecs::prelude::*;

use crate::components::agent::Active;

/// Resource listing active agent entities in spawn order
#[derive(Resource, Debug, Default)]
pub struct ActiveRoster {
    entities: Vec<Entity>,
}

impl ActiveRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

/// System rebuilding the roster from the current active flags
pub fn build_active_roster(
    mut roster: ResMut<ActiveRoster>,
    query: Query<(Entity, &Active)>,
) {
    roster.entities.clear();
    roster
        .entities
        .extend(query.iter().filter(|(_, a)| a.is_active()).map(|(e, _)| e));
}
