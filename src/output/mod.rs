//! Output Generation
//!
//! Per-step metrics rows and the final full agent table. The core fills
//! these structures; persistence is the caller's concern.

pub mod metrics;
pub mod table;

pub use metrics::*;
pub use table::*;
