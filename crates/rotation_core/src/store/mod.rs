// Plan store: the sole durable artifact of the rotation engine.
// Versioned JSON documents with legacy row keys, plus CSV export.

pub mod error;
pub mod format;
pub mod manager;

pub use error::StoreError;
pub use format::{to_csv, InningRecord, PlanDocument, NO_BENCH};
pub use manager::PlanStore;

pub const PLAN_VERSION: u32 = 1;
