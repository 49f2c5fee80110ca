//! Population Setup
//!
//! Organization seeding, applicant generation, and applicant promotion.

pub mod population;

pub use population::*;
