//! Durable plan artifact.
//!
//! One row per inning with the legacy row keys, wrapped in a versioned
//! document. Round-tripping a plan through the document preserves its
//! validation outcome.

use super::PLAN_VERSION;
use crate::models::{
    DefenseAssignment, Fielder, InningPlan, PlanState, Position, RotationPlan,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel written to the `Bench` column when nobody sits.
pub const NO_BENCH: &str = "—";

fn is_false(value: &bool) -> bool {
    !*value
}

/// One stored inning row.
///
/// Field names and ordering match the legacy rotation JSON so existing
/// consumers (card rendering, reports) keep working. `FairnessRelaxed` is
/// only written when set, so unflagged rows keep the legacy shape exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InningRecord {
    #[serde(rename = "Inning")]
    pub inning: u8,
    #[serde(rename = "Bench")]
    pub bench: String,
    #[serde(rename = "P")]
    pub pitcher: String,
    #[serde(rename = "C")]
    pub catcher: String,
    #[serde(rename = "1B")]
    pub first_base: String,
    #[serde(rename = "SS")]
    pub shortstop: String,
    #[serde(rename = "2B")]
    pub second_base: String,
    #[serde(rename = "CF")]
    pub center_field: String,
    #[serde(rename = "3B")]
    pub third_base: String,
    #[serde(rename = "LF")]
    pub left_field: String,
    #[serde(rename = "RF")]
    pub right_field: String,
    #[serde(rename = "FairnessRelaxed", default, skip_serializing_if = "is_false")]
    pub fairness_relaxed: bool,
}

impl InningRecord {
    pub fn from_inning(inning: &InningPlan) -> Self {
        let slot = |position: Position| {
            inning
                .defense
                .get(position)
                .map(Fielder::label)
                .unwrap_or_default()
        };
        InningRecord {
            inning: inning.inning,
            bench: if inning.bench.is_empty() {
                NO_BENCH.to_string()
            } else {
                inning.bench.join(", ")
            },
            pitcher: slot(Position::P),
            catcher: slot(Position::C),
            first_base: slot(Position::B1),
            shortstop: slot(Position::SS),
            second_base: slot(Position::B2),
            center_field: slot(Position::CF),
            third_base: slot(Position::B3),
            left_field: slot(Position::LF),
            right_field: slot(Position::RF),
            fairness_relaxed: inning.fairness_relaxed,
        }
    }

    pub fn to_inning(&self) -> InningPlan {
        let mut defense = DefenseAssignment::new();
        for (position, label) in [
            (Position::P, &self.pitcher),
            (Position::C, &self.catcher),
            (Position::B1, &self.first_base),
            (Position::SS, &self.shortstop),
            (Position::B2, &self.second_base),
            (Position::CF, &self.center_field),
            (Position::B3, &self.third_base),
            (Position::LF, &self.left_field),
            (Position::RF, &self.right_field),
        ] {
            if !label.is_empty() {
                defense.set(position, Fielder::from_label(label));
            }
        }
        let bench = if self.bench.is_empty() || self.bench == NO_BENCH {
            Vec::new()
        } else {
            self.bench
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        };
        InningPlan {
            inning: self.inning,
            bench,
            defense,
            fairness_relaxed: self.fairness_relaxed,
        }
    }
}

/// Versioned on-disk document: the inning rows plus the context needed to
/// rebuild and re-validate the plan after reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDocument {
    pub version: u32,
    pub game_date: NaiveDate,
    pub team: Vec<String>,
    pub pool_count: usize,
    pub required_bench: usize,
    pub innings: Vec<InningRecord>,
}

impl PlanDocument {
    pub fn from_plan(plan: &RotationPlan, game_date: NaiveDate) -> Self {
        PlanDocument {
            version: PLAN_VERSION,
            game_date,
            team: plan.team.clone(),
            pool_count: plan.pool_count,
            required_bench: plan.required_bench,
            innings: plan.innings.iter().map(InningRecord::from_inning).collect(),
        }
    }

    /// Rebuild the plan. A reloaded plan starts in the saved state; a new
    /// draft is required to revise it.
    pub fn to_plan(&self) -> RotationPlan {
        RotationPlan {
            team: self.team.clone(),
            pool_count: self.pool_count,
            required_bench: self.required_bench,
            innings: self.innings.iter().map(InningRecord::to_inning).collect(),
            state: PlanState::Saved,
        }
    }
}

/// Render the rows as the printable CSV export.
pub fn to_csv(records: &[InningRecord]) -> String {
    let mut out = String::from("Inning,Bench,P,C,1B,SS,2B,CF,3B,LF,RF\n");
    for record in records {
        out.push_str(&format!(
            "{},\"{}\",{},{},{},{},{},{},{},{},{}\n",
            record.inning,
            record.bench,
            record.pitcher,
            record.catcher,
            record.first_base,
            record.shortstop,
            record.second_base,
            record.center_field,
            record.third_base,
            record.left_field,
            record.right_field,
        ));
    }
    out
}
