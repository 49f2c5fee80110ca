//! ECS Systems
//!
//! All simulation systems: tenure accrual, roster indexing, interaction
//! sampling, composition/diversity, satisfaction, attrition, and hiring.

pub mod attrition;
pub mod composition;
pub mod hiring;
pub mod interaction;
pub mod roster;
pub mod satisfaction;
pub mod tenure;

// Re-export commonly used systems and helpers
pub use attrition::{leave_probability, process_attrition};
pub use composition::{blau, category_proportions, diversity_index, shannon};
pub use hiring::{fit_score, number_to_hire, run_hiring_cycle};
pub use interaction::{base_valence, sample_interactions};
pub use roster::{build_active_roster, ActiveRoster};
pub use satisfaction::update_satisfaction;
pub use tenure::accrue_tenure;
