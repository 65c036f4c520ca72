//! # rotation_core - Defense Rotation Planning Engine
//!
//! Deterministic planning engine for youth baseball game days: decides,
//! inning by inning, who sits so bench time is distributed fairly, assigns
//! the nine defensive positions under per-player eligibility, validates the
//! finished plan, and persists it as a versioned JSON document.
//!
//! ## Guarantees
//! - Deterministic output for a given roster ordering (no RNG anywhere)
//! - Nobody sits two innings in a row; nobody sits twice before everyone
//!   has sat once (relaxations are explicit and flagged, never silent)
//! - Every violation is reported at once; saving is refused while any
//!   blocking violation remains

pub mod assigner;
pub mod error;
pub mod models;
pub mod roster;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod validator;

pub use assigner::{assign_defense, AssignmentOutcome};
pub use error::{Result, RotationError};
pub use models::{
    DefenseAssignment, EligiblePositions, Fielder, InningPlan, PlanState, Player, Position,
    RotationPlan,
};
pub use roster::Roster;
pub use scheduler::{schedule_bench, BenchInning};
pub use session::{PlanSession, UnfilledSlot};
pub use store::{PlanDocument, PlanStore, StoreError};
pub use validator::{validate, Severity, ValidationIssue, ViolationKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of defensive positions on the field.
pub const FIELD_SIZE: usize = 9;
/// Smallest roster that can field a plan (one pool placeholder at most).
pub const MIN_TEAM_SIZE: usize = 8;
/// Supported innings range for a planning session.
pub const MIN_INNINGS: usize = 4;
pub const MAX_INNINGS: usize = 9;
