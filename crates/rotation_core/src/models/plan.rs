use super::player::{Fielder, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from the nine position codes to on-field identities for one
/// inning.
///
/// The mapping is total and injective when the inning is complete: every
/// position resolves to exactly one identity and no identity appears twice.
/// During assembly it may be partial; [`DefenseAssignment::missing_positions`]
/// reports the gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DefenseAssignment {
    slots: BTreeMap<Position, Fielder>,
}

impl DefenseAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a fielder to a position, returning the previous occupant.
    pub fn set(&mut self, position: Position, fielder: Fielder) -> Option<Fielder> {
        self.slots.insert(position, fielder)
    }

    pub fn get(&self, position: Position) -> Option<&Fielder> {
        self.slots.get(&position)
    }

    pub fn clear_position(&mut self, position: Position) -> Option<Fielder> {
        self.slots.remove(&position)
    }

    /// True if the named identity already holds a slot.
    pub fn contains(&self, fielder: &Fielder) -> bool {
        self.slots.values().any(|f| f == fielder)
    }

    /// The position currently held by the given identity, if any.
    pub fn position_of(&self, fielder: &Fielder) -> Option<Position> {
        self.slots
            .iter()
            .find(|(_, f)| *f == fielder)
            .map(|(pos, _)| *pos)
    }

    /// Positions without an assignment, in canonical order.
    pub fn missing_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| !self.slots.contains_key(pos))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.len() == Position::ALL.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Fielder)> {
        self.slots.iter().map(|(pos, f)| (*pos, f))
    }

    pub fn fielders(&self) -> impl Iterator<Item = &Fielder> {
        self.slots.values()
    }
}

/// One inning of the plan: who sits, who fields where, and whether the
/// scheduler had to relax the fair-rotation rule to fill the bench.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InningPlan {
    /// 1-based inning ordinal.
    pub inning: u8,
    /// Real players sitting out, in roster order.
    pub bench: Vec<String>,
    pub defense: DefenseAssignment,
    /// Set when the bench was filled through the documented fallback path.
    #[serde(default)]
    pub fairness_relaxed: bool,
}

impl InningPlan {
    pub fn empty(inning: u8) -> Self {
        InningPlan {
            inning,
            bench: Vec::new(),
            defense: DefenseAssignment::new(),
            fairness_relaxed: false,
        }
    }

    pub fn is_benched(&self, player: &str) -> bool {
        self.bench.iter().any(|p| p == player)
    }
}

/// Lifecycle of a plan within one planning session.
///
/// `Draft → Generated → Edited → Validated → Saved`; edits after
/// `Validated` revert to `Edited`, and `Saved` is terminal for the game day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanState {
    Draft,
    Generated,
    Edited,
    Validated,
    Saved,
}

/// The full multi-inning rotation plan for one game day.
///
/// Owned exclusively by the active planning session and passed by reference
/// through the call chain; there is no global plan store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotationPlan {
    /// Present team players in roster order. This ordering is the
    /// deterministic tie-break for all scheduling decisions.
    pub team: Vec<String>,
    /// Pool placeholders needed to reach nine fielders.
    pub pool_count: usize,
    /// Required bench size, constant across all innings.
    pub required_bench: usize,
    pub innings: Vec<InningPlan>,
    pub state: PlanState,
}

impl RotationPlan {
    pub fn new(team: Vec<String>, pool_count: usize, required_bench: usize, innings: usize) -> Self {
        RotationPlan {
            team,
            pool_count,
            required_bench,
            innings: (1..=innings as u8).map(InningPlan::empty).collect(),
            state: PlanState::Draft,
        }
    }

    pub fn innings_count(&self) -> usize {
        self.innings.len()
    }

    /// Look up an inning by its 1-based ordinal.
    pub fn inning(&self, inning: u8) -> Option<&InningPlan> {
        self.innings.get(inning.checked_sub(1)? as usize)
    }

    pub fn inning_mut(&mut self, inning: u8) -> Option<&mut InningPlan> {
        self.innings.get_mut(inning.checked_sub(1)? as usize)
    }

    pub fn is_team_player(&self, name: &str) -> bool {
        self.team.iter().any(|p| p == name)
    }
}
