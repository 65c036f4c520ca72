//! Position assigner.
//!
//! Ordered greedy constraint propagation: positions are processed in a
//! fixed priority order and each takes the first eligible unassigned
//! identity. The result is always internally consistent, but greedy order
//! can starve a later position even when a full assignment exists; unfilled
//! positions are reported, never silently dropped, so callers can resolve
//! them manually or apply a stricter matching fallback.

use crate::models::{DefenseAssignment, Fielder, Position};

/// Result of one inning's automatic assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentOutcome {
    pub defense: DefenseAssignment,
    /// Positions with zero eligible candidates, in assignment order.
    pub unfilled: Vec<Position>,
}

impl AssignmentOutcome {
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty() && self.defense.is_complete()
    }
}

/// Assign the nine defensive slots from the on-field identities.
///
/// Positions are processed in [`Position::ASSIGNMENT_ORDER`]; for each, the
/// candidates are the identities not yet assigned that are either pool
/// placeholders (universally eligible) or satisfy `eligibility`. The first
/// candidate in `on_field` iteration order wins, so callers may pre-sort
/// (e.g. scarcest eligibility first) to reduce starvation.
pub fn assign_defense<F>(on_field: &[Fielder], eligibility: F) -> AssignmentOutcome
where
    F: Fn(&Fielder, Position) -> bool,
{
    let mut defense = DefenseAssignment::new();
    let mut unfilled = Vec::new();
    let mut used = vec![false; on_field.len()];

    for position in Position::ASSIGNMENT_ORDER {
        let candidate = on_field.iter().enumerate().find(|(idx, fielder)| {
            !used[*idx] && (fielder.is_pool() || eligibility(fielder, position))
        });
        match candidate {
            Some((idx, fielder)) => {
                used[idx] = true;
                defense.set(position, fielder.clone());
            }
            None => {
                log::debug!("No eligible candidate for {}", position);
                unfilled.push(position);
            }
        }
    }

    AssignmentOutcome { defense, unfilled }
}
