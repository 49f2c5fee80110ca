//! Applicant Pool
//!
//! Applicants are plain records, not entities: they only become part of the
//! ECS world when hired. The pool is reshaped every hiring cycle (aged,
//! extended, scored, filtered, drained by hiring).

use bevy_ecs::prelude::*;

use super::agent::{AgentId, Personality, Preferences};

/// One applicant awaiting a hiring decision
#[derive(Debug, Clone)]
pub struct Applicant {
    pub id: AgentId,
    pub category: usize,
    pub personality: Personality,
    pub preferences: Preferences,
    /// Attraction to the organization, rescored every hiring cycle
    pub attraction: f64,
    /// Hiring cycles spent in the pool without being hired
    pub application_time: u32,
}

/// Resource holding the current applicant pool
#[derive(Resource, Debug, Default)]
pub struct ApplicantPool {
    pub applicants: Vec<Applicant>,
}

impl ApplicantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }
}
