//! Interaction Log
//!
//! Append-only record of pairwise interactions, ordered by step. The sampler
//! only ever appends; windowing happens at read time in the satisfaction
//! engine.

use bevy_ecs::prelude::*;

/// One directed interaction: how the focal agent experienced a partner
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub focal: Entity,
    pub partner: Entity,
    pub step: u64,
    pub valence: f64,
}

/// Resource holding every interaction ever recorded, in step order
#[derive(Resource, Debug, Default)]
pub struct InteractionLog {
    records: Vec<InteractionRecord>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Records must arrive in non-decreasing step order;
    /// the window lookup relies on it.
    pub fn push(&mut self, record: InteractionRecord) {
        if let Some(last) = self.records.last() {
            assert!(
                record.step >= last.step,
                "interaction log must be appended in step order (got step {} after {})",
                record.step,
                last.step
            );
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// Records with step in `[max(0, current_step - window + 1), current_step]`
    pub fn window(&self, current_step: u64, window: u64) -> &[InteractionRecord] {
        let start_step = current_step.saturating_sub(window.saturating_sub(1));
        let start = self
            .records
            .partition_point(|r| r.step < start_step);
        let end = self
            .records
            .partition_point(|r| r.step <= current_step);
        &self.records[start..end]
    }
}
