//! Core data model: players, positions, and the rotation plan.

pub mod plan;
pub mod player;

pub use plan::{DefenseAssignment, InningPlan, PlanState, RotationPlan};
pub use player::{EligiblePositions, Fielder, Player, Position};
