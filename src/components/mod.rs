//! ECS Components & Data Stores
//!
//! Agent components, the append-only interaction log, and the applicant pool.

pub mod agent;
pub mod applicant;
pub mod interaction;

pub use agent::*;
pub use applicant::*;
pub use interaction::*;
