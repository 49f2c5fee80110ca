//! Tenure Accrual
//!
//! First system of every step: active agents gain one step of tenure.
//! Inactive agents keep the tenure they departed with.

use bevy_ecs::prelude::*;

use crate::components::agent::{Active, Employment};

/// System incrementing tenure for all active agents
pub fn accrue_tenure(mut query: Query<(&Active, &mut Employment)>) {
    for (active, mut employment) in query.iter_mut() {
        if active.is_active() {
            employment.tenure += 1;
        }
    }
}
