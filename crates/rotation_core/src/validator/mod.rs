//! Plan validator.
//!
//! Checks a full multi-inning plan for structural and fairness correctness
//! and returns every violation found, so the caller can present all
//! problems at once instead of fixing them one save attempt at a time.

use crate::models::{Fielder, Position, RotationPlan};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Whether a finding blocks saving the plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single rule violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ViolationKind {
    BenchSize { expected: usize, found: usize },
    ConsecutiveBench { player: String },
    EarlyRepeatBench { player: String },
    MissingPosition { position: Position },
    DuplicateFielder { fielder: Fielder },
    BenchedWhileFielding { player: String },
    UnknownBenchPlayer { player: String },
    FairnessRelaxed,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::BenchSize { expected, found } => {
                write!(f, "bench has {} players, exactly {} required", found, expected)
            }
            ViolationKind::ConsecutiveBench { player } => {
                write!(f, "{} is benched in two consecutive innings", player)
            }
            ViolationKind::EarlyRepeatBench { player } => {
                write!(f, "{} is benched a second time before everyone has sat once", player)
            }
            ViolationKind::MissingPosition { position } => {
                write!(f, "no player assigned to {}", position)
            }
            ViolationKind::DuplicateFielder { fielder } => {
                write!(f, "{} is assigned to more than one position", fielder)
            }
            ViolationKind::BenchedWhileFielding { player } => {
                write!(f, "{} is both benched and assigned a position", player)
            }
            ViolationKind::UnknownBenchPlayer { player } => {
                write!(f, "benched player {} is not on the team", player)
            }
            ViolationKind::FairnessRelaxed => {
                write!(f, "bench was filled through the relaxed fairness fallback")
            }
        }
    }
}

/// A violation located at an inning, with its severity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    pub inning: u8,
    pub kind: ViolationKind,
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(inning: u8, kind: ViolationKind) -> Self {
        ValidationIssue { inning, kind, severity: Severity::Error }
    }

    fn warning(inning: u8, kind: ViolationKind) -> Self {
        ValidationIssue { inning, kind, severity: Severity::Warning }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inning {}: {}", self.inning, self.kind)
    }
}

/// True if any issue in the list blocks saving.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Check the whole plan against the structural and fairness invariants.
///
/// Per inning: bench size, nine distinct non-empty defense entries, and no
/// player both benched and fielding. Across innings: no consecutive bench,
/// and no second sit before everyone has sat once — downgraded to a warning
/// for innings that carry the scheduler's relaxation flag. Aggregates every
/// finding; never fails fast.
pub fn validate(plan: &RotationPlan, required_bench: usize) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut sit_count: HashMap<&str, u32> =
        plan.team.iter().map(|name| (name.as_str(), 0)).collect();

    for (idx, inning_plan) in plan.innings.iter().enumerate() {
        let inning = inning_plan.inning;

        if inning_plan.fairness_relaxed {
            issues.push(ValidationIssue::warning(inning, ViolationKind::FairnessRelaxed));
        }

        if inning_plan.bench.len() != required_bench {
            issues.push(ValidationIssue::error(
                inning,
                ViolationKind::BenchSize {
                    expected: required_bench,
                    found: inning_plan.bench.len(),
                },
            ));
        }

        for player in &inning_plan.bench {
            if !plan.is_team_player(player) {
                issues.push(ValidationIssue::error(
                    inning,
                    ViolationKind::UnknownBenchPlayer { player: player.clone() },
                ));
            }
        }

        // No consecutive bench. This rule holds even for relaxed innings.
        if idx > 0 {
            let previous = &plan.innings[idx - 1];
            for player in &inning_plan.bench {
                if previous.is_benched(player) {
                    issues.push(ValidationIssue::error(
                        inning,
                        ViolationKind::ConsecutiveBench { player: player.clone() },
                    ));
                }
            }
        }

        // Fair rotation: count this inning's sits, then flag anyone on a
        // repeat turn while a teammate is still waiting for a first one.
        for player in &inning_plan.bench {
            if let Some(count) = sit_count.get_mut(player.as_str()) {
                *count += 1;
            }
        }
        let anyone_unsat = sit_count.values().any(|&c| c == 0);
        if anyone_unsat {
            for player in &inning_plan.bench {
                if sit_count.get(player.as_str()).copied().unwrap_or(0) >= 2 {
                    let kind = ViolationKind::EarlyRepeatBench { player: player.clone() };
                    issues.push(if inning_plan.fairness_relaxed {
                        ValidationIssue::warning(inning, kind)
                    } else {
                        ValidationIssue::error(inning, kind)
                    });
                }
            }
        }

        for position in inning_plan.defense.missing_positions() {
            issues.push(ValidationIssue::error(
                inning,
                ViolationKind::MissingPosition { position },
            ));
        }

        let mut seen: Vec<&Fielder> = Vec::new();
        for fielder in inning_plan.defense.fielders() {
            if seen.contains(&fielder) {
                issues.push(ValidationIssue::error(
                    inning,
                    ViolationKind::DuplicateFielder { fielder: fielder.clone() },
                ));
            } else {
                seen.push(fielder);
            }
        }

        for fielder in inning_plan.defense.fielders() {
            if let Some(name) = fielder.player_name() {
                if inning_plan.is_benched(name) {
                    issues.push(ValidationIssue::error(
                        inning,
                        ViolationKind::BenchedWhileFielding { player: name.to_string() },
                    ));
                }
            }
        }
    }

    log::debug!(
        "Validated {}-inning plan: {} issues ({} blocking)",
        plan.innings_count(),
        issues.len(),
        issues.iter().filter(|i| i.severity == Severity::Error).count()
    );
    issues
}
