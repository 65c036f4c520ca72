//! Bench rotation scheduler.
//!
//! Computes, inning by inning, which players sit out so that bench time is
//! distributed fairly: nobody sits twice in a row, and nobody sits a second
//! time until everyone has sat once. Pure and deterministic for a given
//! roster ordering.

use crate::error::RotationError;
use crate::models::Player;
use crate::MIN_TEAM_SIZE;

/// Bench selection for one inning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchInning {
    /// Players sitting out, in roster order.
    pub bench: Vec<String>,
    /// Set when the fair-rotation rule had to be relaxed to fill the bench.
    ///
    /// The no-consecutive rule is never relaxed. The validator reports
    /// fairness findings on flagged innings as warnings instead of errors.
    pub relaxed: bool,
}

/// Compute the bench for every inning of the game.
///
/// For each inning, candidates are the players who did not sit the previous
/// inning and either have not sat yet or — once everyone has sat at least
/// once — anyone. Candidates are ordered by `(sit count, roster order)` and
/// the first `required_bench` are taken. If the candidate pool runs short,
/// the remaining slots are filled from any player who did not sit the
/// previous inning, in the same ordering, and the inning is flagged as
/// relaxed rather than silently violating the fairness rule.
///
/// Fails with [`RotationError::InsufficientPlayers`] below the minimum
/// fieldable roster and [`RotationError::InvalidBenchSize`] when asked to
/// bench more players than exist (negative sizes are unrepresentable).
pub fn schedule_bench(
    players: &[Player],
    innings: usize,
    required_bench: usize,
) -> Result<Vec<BenchInning>, RotationError> {
    if players.len() < MIN_TEAM_SIZE {
        return Err(RotationError::InsufficientPlayers {
            found: players.len(),
        });
    }
    if required_bench > players.len() {
        return Err(RotationError::InvalidBenchSize {
            requested: required_bench,
            team_size: players.len(),
        });
    }

    let team_size = players.len();
    let mut sit_count = vec![0u32; team_size];
    let mut benched_last: Vec<usize> = Vec::new();
    let mut schedule = Vec::with_capacity(innings);

    for inning in 1..=innings {
        let all_sat_once = sit_count.iter().all(|&c| c >= 1);

        let mut candidates: Vec<usize> = (0..team_size)
            .filter(|i| !benched_last.contains(i) && (sit_count[*i] == 0 || all_sat_once))
            .collect();
        candidates.sort_by_key(|&i| (sit_count[i], i));

        let mut bench: Vec<usize> = candidates.into_iter().take(required_bench).collect();

        let mut relaxed = false;
        if bench.len() < required_bench {
            // Documented fallback: fill from any player who did not sit
            // last inning, still ordered by (sit count, roster order). The
            // inning is flagged so the validator downgrades fairness
            // findings to warnings. Invariant: the no-consecutive rule
            // still holds on this path.
            relaxed = true;
            let mut fallback: Vec<usize> = (0..team_size)
                .filter(|i| !benched_last.contains(i) && !bench.contains(i))
                .collect();
            fallback.sort_by_key(|&i| (sit_count[i], i));
            for idx in fallback {
                if bench.len() == required_bench {
                    break;
                }
                bench.push(idx);
            }
            log::warn!(
                "Inning {}: fair rotation relaxed to fill {} bench slots",
                inning,
                required_bench
            );
        }

        for &idx in &bench {
            sit_count[idx] += 1;
        }
        bench.sort_unstable();
        log::debug!(
            "Inning {}: bench {:?}",
            inning,
            bench.iter().map(|&i| players[i].name.as_str()).collect::<Vec<_>>()
        );

        benched_last = bench.clone();
        schedule.push(BenchInning {
            bench: bench.iter().map(|&i| players[i].name.clone()).collect(),
            relaxed,
        });
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(size: usize) -> Vec<Player> {
        (1..=size).map(|i| Player::new(format!("P{}", i), "INF, OF")).collect()
    }

    #[test]
    fn test_roster_order_breaks_ties() {
        // 10 players, one bench slot, six innings: all sit counts start
        // equal, so the bench walks the roster in order.
        let schedule = schedule_bench(&team(10), 6, 1).unwrap();
        let benched: Vec<&str> =
            schedule.iter().map(|b| b.bench[0].as_str()).collect();
        assert_eq!(benched, ["P1", "P2", "P3", "P4", "P5", "P6"]);
        assert!(schedule.iter().all(|b| !b.relaxed));
    }

    #[test]
    fn test_empty_bench_when_nine_present() {
        let schedule = schedule_bench(&team(9), 6, 0).unwrap();
        assert!(schedule.iter().all(|b| b.bench.is_empty() && !b.relaxed));
    }

    #[test]
    fn test_rejects_short_roster() {
        let err = schedule_bench(&team(7), 6, 0).unwrap_err();
        assert!(matches!(err, RotationError::InsufficientPlayers { found: 7 }));
    }

    #[test]
    fn test_rejects_oversized_bench() {
        let err = schedule_bench(&team(10), 6, 11).unwrap_err();
        assert!(matches!(
            err,
            RotationError::InvalidBenchSize { requested: 11, team_size: 10 }
        ));
    }

    #[test]
    fn test_no_consecutive_bench() {
        let schedule = schedule_bench(&team(12), 9, 3).unwrap();
        for pair in schedule.windows(2) {
            for player in &pair[1].bench {
                assert!(
                    !pair[0].bench.contains(player),
                    "{} sat twice in a row",
                    player
                );
            }
        }
    }

    #[test]
    fn test_second_turns_wait_for_everyone() {
        let players = team(10);
        let schedule = schedule_bench(&players, 12, 1).unwrap();
        let mut sits = vec![0u32; players.len()];
        for inning in &schedule {
            assert!(!inning.relaxed);
            for name in &inning.bench {
                let idx = players.iter().position(|p| &p.name == name).unwrap();
                sits[idx] += 1;
            }
            let max = *sits.iter().max().unwrap();
            let min = *sits.iter().min().unwrap();
            assert!(max - min <= 1, "sit counts diverged: {:?}", sits);
        }
        // Twelve innings of ten players: everyone sat once, two sat twice.
        assert_eq!(sits.iter().sum::<u32>(), 12);
    }

    #[test]
    fn test_fallback_flags_inning_and_keeps_consecutive_rule() {
        // 10 players with a 4-player bench: by inning 3 only two players
        // are both rested and unsat, so the fallback must top up the bench
        // with repeat sitters.
        let schedule = schedule_bench(&team(10), 3, 4).unwrap();
        assert!(!schedule[0].relaxed);
        assert!(!schedule[1].relaxed);
        assert!(schedule[2].relaxed);
        assert_eq!(schedule[2].bench.len(), 4);
        assert_eq!(schedule[0].bench, ["P1", "P2", "P3", "P4"]);
        assert_eq!(schedule[1].bench, ["P5", "P6", "P7", "P8"]);
        // P9 and P10 have not sat; the rest of the bench comes from the
        // inning-1 sitters, never from the inning-2 bench.
        assert_eq!(schedule[2].bench, ["P1", "P2", "P9", "P10"]);
        for player in &schedule[2].bench {
            assert!(!schedule[1].bench.contains(player));
        }
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every bench has the required size for any
            /// fieldable roster with the derived bench size.
            #[test]
            fn prop_bench_size_constant(
                team_size in 8usize..=18,
                innings in 1usize..=12
            ) {
                let players = team(team_size);
                let required = team_size.saturating_sub(9);
                let schedule = schedule_bench(&players, innings, required).unwrap();
                for inning in &schedule {
                    prop_assert_eq!(inning.bench.len(), required);
                }
            }

            /// Property: nobody ever sits two innings in a row.
            #[test]
            fn prop_no_consecutive_bench(
                team_size in 8usize..=18,
                innings in 2usize..=12
            ) {
                let players = team(team_size);
                let required = team_size.saturating_sub(9);
                let schedule = schedule_bench(&players, innings, required).unwrap();
                for pair in schedule.windows(2) {
                    for player in &pair[1].bench {
                        prop_assert!(!pair[0].bench.contains(player));
                    }
                }
            }

            /// Property: without the fallback, nobody reaches two sits
            /// while anyone is still at zero.
            #[test]
            fn prop_fair_rotation_unless_relaxed(
                team_size in 8usize..=18,
                innings in 1usize..=12
            ) {
                let players = team(team_size);
                let required = team_size.saturating_sub(9);
                let schedule = schedule_bench(&players, innings, required).unwrap();
                prop_assume!(schedule.iter().all(|b| !b.relaxed));
                let mut sits = vec![0u32; team_size];
                for inning in &schedule {
                    for name in &inning.bench {
                        let idx = players.iter().position(|p| &p.name == name).unwrap();
                        sits[idx] += 1;
                    }
                    let max = *sits.iter().max().unwrap();
                    let min = *sits.iter().min().unwrap();
                    prop_assert!(max - min <= 1);
                }
            }
        }
    }
}
