//! Adapters for the two external inputs: the player directory and the
//! day-of-game availability filter.

use crate::models::Player;
use crate::{FIELD_SIZE, MIN_TEAM_SIZE};
use serde::{Deserialize, Serialize};

/// Ordered player directory for the team.
///
/// Entries come from the external roster sheet as `(name, preference
/// string)` pairs; preference strings are parsed once at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Roster { players }
    }

    /// Build from directory entries of `(name, preference string)`.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Roster {
            players: entries
                .into_iter()
                .map(|(name, prefs)| Player::new(name.as_ref(), prefs.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Apply the availability filter, preserving the availability order.
    ///
    /// The returned ordering becomes the roster order for the plan and thus
    /// the deterministic tie-break for scheduling. Names missing from the
    /// directory become players with an empty eligibility set, matching the
    /// legacy tool's behavior for unrecognized roster rows.
    pub fn present<S: AsRef<str>>(&self, names: &[S]) -> Vec<Player> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                match self.get(name) {
                    Some(player) => player.clone(),
                    None => {
                        log::warn!("Present player '{}' is not in the directory", name);
                        Player::new(name, "")
                    }
                }
            })
            .collect()
    }
}

/// Pool placeholders needed to reach nine fielders.
pub fn pool_needed(present_count: usize) -> usize {
    FIELD_SIZE.saturating_sub(present_count)
}

/// Players that must sit each inning once the field is full.
pub fn required_bench(present_count: usize) -> usize {
    present_count.saturating_sub(FIELD_SIZE)
}

/// True if enough team players are present to field a plan at all.
pub fn is_fieldable(present_count: usize) -> bool {
    present_count >= MIN_TEAM_SIZE
}
