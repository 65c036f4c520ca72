//! Planning session.
//!
//! One session owns one [`RotationPlan`] for one game day and drives its
//! whole lifecycle: generation, manual edits, validation, and the gated
//! save. The plan is an explicitly owned value passed through the session's
//! call chain; there is no global store, and concurrent sessions must each
//! hold their own instance.

use crate::assigner::assign_defense;
use crate::error::{Result, RotationError};
use crate::models::{DefenseAssignment, Fielder, PlanState, Player, Position, RotationPlan};
use crate::scheduler::schedule_bench;
use crate::store::{PlanDocument, PlanStore};
use crate::validator::{self, ValidationIssue};
use crate::{FIELD_SIZE, MAX_INNINGS, MIN_INNINGS, MIN_TEAM_SIZE};
use chrono::NaiveDate;
use std::path::PathBuf;

/// A position left without an eligible candidate during generation.
///
/// Non-fatal: the slot stays open in the plan and is resolved by a manual
/// override (or reported by the validator if left open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnfilledSlot {
    pub inning: u8,
    pub position: Position,
}

#[derive(Debug)]
pub struct PlanSession {
    roster: Vec<Player>,
    plan: RotationPlan,
}

impl PlanSession {
    /// Start a draft plan for the players present today.
    ///
    /// The order of `players` is the roster order used for every
    /// deterministic tie-break. Fails below the minimum fieldable roster of
    /// eight and outside the supported innings range.
    pub fn new(players: Vec<Player>, innings: usize) -> Result<Self> {
        if players.len() < MIN_TEAM_SIZE {
            return Err(RotationError::InsufficientPlayers {
                found: players.len(),
            });
        }
        if !(MIN_INNINGS..=MAX_INNINGS).contains(&innings) {
            return Err(RotationError::InvalidInnings {
                innings,
                min: MIN_INNINGS,
                max: MAX_INNINGS,
            });
        }

        let team: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
        let pool_count = FIELD_SIZE.saturating_sub(players.len());
        let required_bench = players.len().saturating_sub(FIELD_SIZE);
        log::info!(
            "New planning session: {} players, {} innings, bench of {}, {} pool player(s)",
            players.len(),
            innings,
            required_bench,
            pool_count
        );
        Ok(PlanSession {
            roster: players,
            plan: RotationPlan::new(team, pool_count, required_bench, innings),
        })
    }

    pub fn plan(&self) -> &RotationPlan {
        &self.plan
    }

    pub fn state(&self) -> PlanState {
        self.plan.state
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// Run the scheduler and the per-inning assigner over the whole game.
    ///
    /// Replaces any previous contents of the plan. Positions with no
    /// eligible candidate are returned for manual resolution.
    pub fn generate(&mut self) -> Result<Vec<UnfilledSlot>> {
        if self.plan.state == PlanState::Saved {
            return Err(RotationError::PlanSaved);
        }

        let schedule = schedule_bench(
            &self.roster,
            self.plan.innings_count(),
            self.plan.required_bench,
        )?;

        let innings = self.plan.innings_count();
        let mut unfilled = Vec::new();
        for (idx, bench_inning) in schedule.into_iter().enumerate() {
            let inning_no = (idx + 1) as u8;
            let on_field = self.on_field(&bench_inning.bench);
            let outcome = {
                let roster = &self.roster;
                assign_defense(&on_field, |fielder, position| {
                    Self::player_allows(roster, fielder, position)
                })
            };
            for position in &outcome.unfilled {
                log::warn!("Inning {}: no eligible candidate for {}", inning_no, position);
                unfilled.push(UnfilledSlot { inning: inning_no, position: *position });
            }

            let inning_plan = self
                .plan
                .inning_mut(inning_no)
                .ok_or(RotationError::InningOutOfRange { inning: inning_no, innings })?;
            inning_plan.bench = bench_inning.bench;
            inning_plan.defense = outcome.defense;
            inning_plan.fairness_relaxed = bench_inning.relaxed;
        }

        self.plan.state = PlanState::Generated;
        log::info!(
            "Generated {}-inning plan ({} unfilled positions)",
            self.plan.innings_count(),
            unfilled.len()
        );
        Ok(unfilled)
    }

    /// Accept a manual override of one inning's bench and defense.
    ///
    /// Clears the inning's relaxation flag: a hand-built inning stands on
    /// its own and is judged by the strict rules.
    pub fn override_inning(
        &mut self,
        inning: u8,
        bench: Vec<String>,
        defense: DefenseAssignment,
    ) -> Result<()> {
        if self.plan.state == PlanState::Saved {
            return Err(RotationError::PlanSaved);
        }
        let innings = self.plan.innings_count();
        let inning_plan = self
            .plan
            .inning_mut(inning)
            .ok_or(RotationError::InningOutOfRange { inning, innings })?;
        inning_plan.bench = bench;
        inning_plan.defense = defense;
        inning_plan.fairness_relaxed = false;
        self.plan.state = PlanState::Edited;
        log::debug!("Inning {} overridden", inning);
        Ok(())
    }

    /// Clear one inning back to empty.
    pub fn clear_inning(&mut self, inning: u8) -> Result<()> {
        self.override_inning(inning, Vec::new(), DefenseAssignment::new())
    }

    /// Discard everything and return to an empty draft.
    ///
    /// This is how a saved game day is revised: the old artifact stays in
    /// the store and a fresh draft starts here.
    pub fn reset(&mut self) {
        let innings = self.plan.innings_count();
        self.plan = RotationPlan::new(
            self.plan.team.clone(),
            self.plan.pool_count,
            self.plan.required_bench,
            innings,
        );
        log::info!("Planning session reset to draft");
    }

    /// Bench candidates for an inning under the fairness rules, given the
    /// plan's current contents. Mirrors what the scheduler would allow, so
    /// a manual editor can stay inside the rules.
    pub fn eligible_bench(&self, inning: u8) -> Result<Vec<String>> {
        let innings = self.plan.innings_count();
        if self.plan.inning(inning).is_none() {
            return Err(RotationError::InningOutOfRange { inning, innings });
        }

        let mut sit_count = vec![0u32; self.roster.len()];
        for prior in self.plan.innings.iter().take(inning as usize - 1) {
            for name in &prior.bench {
                if let Some(idx) = self.roster.iter().position(|p| &p.name == name) {
                    sit_count[idx] += 1;
                }
            }
        }
        let all_sat_once = sit_count.iter().all(|&c| c >= 1);
        let benched_last: &[String] = if inning > 1 {
            self.plan
                .inning(inning - 1)
                .map(|ip| ip.bench.as_slice())
                .unwrap_or(&[])
        } else {
            &[]
        };

        Ok(self
            .roster
            .iter()
            .enumerate()
            .filter(|(idx, player)| {
                !benched_last.contains(&player.name) && (sit_count[*idx] == 0 || all_sat_once)
            })
            .map(|(_, player)| player.name.clone())
            .collect())
    }

    /// On-field identities that could take the given position in an
    /// inning: not benched, not already holding a different slot, and
    /// eligible (pool placeholders always qualify).
    pub fn position_candidates(&self, inning: u8, position: Position) -> Result<Vec<Fielder>> {
        let innings = self.plan.innings_count();
        let inning_plan = self
            .plan
            .inning(inning)
            .ok_or(RotationError::InningOutOfRange { inning, innings })?;

        let mut candidates = Vec::new();
        for player in &self.roster {
            if inning_plan.is_benched(&player.name) || !player.eligible.allows(position) {
                continue;
            }
            let fielder = Fielder::Player(player.name.clone());
            match inning_plan.defense.position_of(&fielder) {
                Some(held) if held != position => continue,
                _ => candidates.push(fielder),
            }
        }
        for index in 1..=self.plan.pool_count as u8 {
            let fielder = Fielder::Pool(index);
            match inning_plan.defense.position_of(&fielder) {
                Some(held) if held != position => continue,
                _ => candidates.push(fielder),
            }
        }
        Ok(candidates)
    }

    /// Run the validator over the whole plan. With no blocking errors the
    /// plan becomes `Validated`; warnings alone do not prevent that.
    pub fn validate(&mut self) -> Vec<ValidationIssue> {
        let issues = validator::validate(&self.plan, self.plan.required_bench);
        if !validator::has_errors(&issues) && self.plan.state != PlanState::Saved {
            self.plan.state = PlanState::Validated;
        }
        for issue in &issues {
            log::debug!("Validation: {}", issue);
        }
        issues
    }

    /// Validate and persist the plan for the game day.
    ///
    /// Refuses to persist while any blocking violation remains; warnings
    /// (the relaxed-fairness fallback) do not block. After a successful
    /// save the plan is terminal for this session.
    pub fn save(&mut self, store: &PlanStore, game_date: NaiveDate) -> Result<PathBuf> {
        if self.plan.state == PlanState::Saved {
            return Err(RotationError::PlanSaved);
        }
        let issues = validator::validate(&self.plan, self.plan.required_bench);
        let errors = issues
            .iter()
            .filter(|i| i.severity == crate::validator::Severity::Error)
            .count();
        if errors > 0 {
            log::warn!("Refusing to save plan with {} blocking violations", errors);
            return Err(RotationError::UnresolvedViolations { errors });
        }

        let document = PlanDocument::from_plan(&self.plan, game_date);
        let path = store.save(&document)?;
        self.plan.state = PlanState::Saved;
        Ok(path)
    }

    fn player_allows(roster: &[Player], fielder: &Fielder, position: Position) -> bool {
        match fielder.player_name() {
            Some(name) => roster
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.eligible.allows(position))
                .unwrap_or(false),
            None => true,
        }
    }

    /// On-field identities for one inning, scarcest eligibility first so
    /// the greedy assigner spends flexible players last, then the pool
    /// placeholders.
    fn on_field(&self, bench: &[String]) -> Vec<Fielder> {
        let mut players: Vec<(usize, &Player)> = self
            .roster
            .iter()
            .enumerate()
            .filter(|(_, p)| !bench.contains(&p.name))
            .collect();
        players.sort_by_key(|(idx, p)| (p.eligible.len(), *idx));

        let mut on_field: Vec<Fielder> = players
            .into_iter()
            .map(|(_, p)| Fielder::Player(p.name.clone()))
            .collect();
        on_field.extend((1..=self.plan.pool_count as u8).map(Fielder::Pool));
        on_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::has_errors;

    fn flexible_team(size: usize) -> Vec<Player> {
        (1..=size)
            .map(|i| Player::new(format!("P{}", i), "P, C, 1B, INF, OF"))
            .collect()
    }

    #[test]
    fn test_session_rejects_short_roster() {
        let err = PlanSession::new(flexible_team(7), 6).unwrap_err();
        assert!(matches!(err, RotationError::InsufficientPlayers { found: 7 }));
    }

    #[test]
    fn test_session_rejects_out_of_range_innings() {
        assert!(matches!(
            PlanSession::new(flexible_team(10), 3).unwrap_err(),
            RotationError::InvalidInnings { innings: 3, .. }
        ));
        assert!(matches!(
            PlanSession::new(flexible_team(10), 10).unwrap_err(),
            RotationError::InvalidInnings { innings: 10, .. }
        ));
    }

    #[test]
    fn test_generate_produces_valid_plan_with_bench_rotation() {
        let mut session = PlanSession::new(flexible_team(10), 6).unwrap();
        assert_eq!(session.state(), PlanState::Draft);

        let unfilled = session.generate().unwrap();
        assert!(unfilled.is_empty());
        assert_eq!(session.state(), PlanState::Generated);

        let benched: Vec<&str> = session
            .plan()
            .innings
            .iter()
            .map(|ip| ip.bench[0].as_str())
            .collect();
        assert_eq!(benched, ["P1", "P2", "P3", "P4", "P5", "P6"]);

        let issues = session.validate();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
        assert_eq!(session.state(), PlanState::Validated);
    }

    #[test]
    fn test_nine_players_means_empty_benches() {
        let mut session = PlanSession::new(flexible_team(9), 6).unwrap();
        session.generate().unwrap();
        assert!(session.plan().innings.iter().all(|ip| ip.bench.is_empty()));
        assert!(!has_errors(&session.validate()));
    }

    #[test]
    fn test_eight_players_get_a_pool_fielder() {
        let mut session = PlanSession::new(flexible_team(8), 6).unwrap();
        session.generate().unwrap();
        for inning_plan in &session.plan().innings {
            assert!(inning_plan.defense.contains(&Fielder::Pool(1)));
            assert!(inning_plan.defense.is_complete());
        }
        assert!(!has_errors(&session.validate()));
    }

    #[test]
    fn test_generate_reports_unfilled_positions() {
        // Nine players, none of whom pitch: every inning's mound is open.
        let players: Vec<Player> = (1..=9)
            .map(|i| Player::new(format!("P{}", i), "C, 1B, INF, OF"))
            .collect();
        let mut session = PlanSession::new(players, 6).unwrap();
        let unfilled = session.generate().unwrap();
        assert_eq!(unfilled.len(), 6);
        assert!(unfilled.iter().all(|slot| slot.position == Position::P));

        let issues = session.validate();
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_override_reverts_validated_state() {
        let mut session = PlanSession::new(flexible_team(10), 6).unwrap();
        session.generate().unwrap();
        session.validate();
        assert_eq!(session.state(), PlanState::Validated);

        let inning_one = session.plan().inning(1).unwrap().clone();
        session
            .override_inning(1, inning_one.bench, inning_one.defense)
            .unwrap();
        assert_eq!(session.state(), PlanState::Edited);
    }

    #[test]
    fn test_cleared_inning_fails_validation_until_refilled() {
        let mut session = PlanSession::new(flexible_team(10), 6).unwrap();
        session.generate().unwrap();
        session.clear_inning(4).unwrap();
        let issues = session.validate();
        assert!(has_errors(&issues));
        assert!(issues.iter().all(|i| i.inning == 4));
    }

    #[test]
    fn test_reset_returns_to_draft() {
        let mut session = PlanSession::new(flexible_team(10), 6).unwrap();
        session.generate().unwrap();
        session.reset();
        assert_eq!(session.state(), PlanState::Draft);
        assert!(session.plan().innings.iter().all(|ip| ip.bench.is_empty()));
    }

    #[test]
    fn test_eligible_bench_follows_fairness_rules() {
        let mut session = PlanSession::new(flexible_team(10), 6).unwrap();
        session.generate().unwrap();
        // Inning 2: P1 sat the inning before, so the no-consecutive rule
        // excludes them; everyone else is still waiting for a first sit.
        let eligible = session.eligible_bench(2).unwrap();
        assert!(!eligible.contains(&"P1".to_string()));
        assert!(
            eligible.contains(&"P3".to_string()) && eligible.contains(&"P10".to_string())
        );
    }

    #[test]
    fn test_position_candidates_respect_bench_and_assignments() {
        let mut session = PlanSession::new(flexible_team(10), 6).unwrap();
        session.generate().unwrap();
        let candidates = session.position_candidates(1, Position::SS).unwrap();
        // The benched player never appears.
        assert!(candidates
            .iter()
            .all(|f| f.player_name() != Some("P1")));
        // The current shortstop is offered for their own slot.
        let holder = session
            .plan()
            .inning(1)
            .unwrap()
            .defense
            .get(Position::SS)
            .cloned()
            .unwrap();
        assert!(candidates.contains(&holder));
        // Everyone holding a different slot is filtered out.
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_inning_out_of_range() {
        let session = PlanSession::new(flexible_team(10), 6).unwrap();
        assert!(matches!(
            session.eligible_bench(7).unwrap_err(),
            RotationError::InningOutOfRange { inning: 7, innings: 6 }
        ));
    }
}
