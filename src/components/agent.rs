//! Agent Components
//!
//! Components for employees: identity, personality, preferences, and the
//! lifecycle fields the simulation updates each step. Personality and
//! preference values are fixed at creation; only satisfaction, tenure, and
//! the active flag change over an agent's life.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent, immutable once assigned
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Index into the configured identity category labels, assigned at creation
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCategory(pub usize);

/// Big-Five personality traits, drawn i.i.d. standard-normal at creation
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub emotional_stability: f64,
}

/// Social preferences, standard-normal at creation
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Affinity for similar others
    pub homophily: f64,
    /// Affinity for dissimilar others
    pub diversity: f64,
}

/// Current satisfaction, recomputed every step for active agents
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Satisfaction(pub f64);

/// Attraction to the organization, scored pre-hire and frozen at promotion
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Attraction(pub f64);

/// Employment lifecycle fields
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Employment {
    /// Steps spent active; 0 at hire
    pub tenure: u32,
    /// Step at which the agent was hired (0 for the seeded organization)
    pub hire_step: u64,
}

impl Employment {
    pub fn hired_at(step: u64) -> Self {
        Self {
            tenure: 0,
            hire_step: step,
        }
    }
}

/// Whether the agent is counted in the organization.
///
/// Soft-delete flag: departed agents stay in the world as historical
/// records and the flag never flips back to true.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Active(pub bool);

impl Active {
    pub fn new() -> Self {
        Self(true)
    }

    pub fn is_active(&self) -> bool {
        self.0
    }
}

impl Default for Active {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource handing out sequential agent ids.
///
/// Sequential rather than random ids keep fixed-seed runs bit-identical.
#[derive(Resource, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> AgentId {
        let id = AgentId(format!("agent_{:05}", self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_sequential() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.next_id().0, "agent_00000");
        assert_eq!(allocator.next_id().0, "agent_00001");
        assert_eq!(allocator.next_id().0, "agent_00002");
    }

    #[test]
    fn test_active_defaults_to_true() {
        assert!(Active::new().is_active());
        assert!(Active::default().is_active());
    }
}
