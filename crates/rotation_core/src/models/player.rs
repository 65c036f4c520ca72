use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine defensive positions.
///
/// Codes that start with a digit use a letter prefix for the variant name
/// and carry the canonical code through serde, so `B1` serializes as `"1B"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    P,
    C,
    #[serde(rename = "1B")]
    B1,
    #[serde(rename = "2B")]
    B2,
    #[serde(rename = "3B")]
    B3,
    SS,
    LF,
    CF,
    RF,
}

impl Position {
    /// All nine positions in canonical scorecard order.
    pub const ALL: [Position; 9] = [
        Position::P,
        Position::C,
        Position::B1,
        Position::B2,
        Position::B3,
        Position::SS,
        Position::LF,
        Position::CF,
        Position::RF,
    ];

    /// Fixed priority order for automatic assignment.
    ///
    /// Pitcher and catcher first (narrowest eligibility in practice), then
    /// alternating infield/outfield spots by scarcity of typical candidates.
    pub const ASSIGNMENT_ORDER: [Position; 9] = [
        Position::P,
        Position::C,
        Position::B1,
        Position::SS,
        Position::B2,
        Position::CF,
        Position::B3,
        Position::LF,
        Position::RF,
    ];

    /// Canonical position code string (e.g., "1B").
    pub fn code(&self) -> &'static str {
        match self {
            Position::P => "P",
            Position::C => "C",
            Position::B1 => "1B",
            Position::B2 => "2B",
            Position::B3 => "3B",
            Position::SS => "SS",
            Position::LF => "LF",
            Position::CF => "CF",
            Position::RF => "RF",
        }
    }

    /// Decode from a canonical code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(Position::P),
            "C" => Some(Position::C),
            "1B" => Some(Position::B1),
            "2B" => Some(Position::B2),
            "3B" => Some(Position::B3),
            "SS" => Some(Position::SS),
            "LF" => Some(Position::LF),
            "CF" => Some(Position::CF),
            "RF" => Some(Position::RF),
            _ => None,
        }
    }

    /// Middle-infield spots covered by the `INF` preference token.
    pub fn is_infield(&self) -> bool {
        matches!(self, Position::B2 | Position::B3 | Position::SS)
    }

    /// Outfield spots covered by the `OF` preference token.
    pub fn is_outfield(&self) -> bool {
        matches!(self, Position::LF | Position::CF | Position::RF)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The set of positions a player may be assigned to.
///
/// Parsed once from the roster preference string at player construction;
/// broad tokens (`INF`, `OF`) expand to their position group, so runtime
/// checks are plain set membership with no string handling.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EligiblePositions {
    positions: Vec<Position>,
}

impl EligiblePositions {
    /// Parse a comma-separated preference string.
    ///
    /// Recognized tokens: `P`/`PITCHER`, `C`/`CATCHER`, `1B`, `INF`
    /// (expands to 2B/3B/SS), `OF` (expands to LF/CF/RF), and the exact
    /// codes `2B`, `3B`, `SS`, `LF`, `CF`, `RF`. Unknown tokens are skipped.
    pub fn parse(prefs: &str) -> Self {
        let mut eligible = EligiblePositions::default();
        for token in prefs.split(',') {
            let token = token.trim().to_uppercase();
            if token.is_empty() {
                continue;
            }
            match token.as_str() {
                "P" | "PITCHER" => eligible.add(Position::P),
                "C" | "CATCHER" => eligible.add(Position::C),
                "INF" => {
                    eligible.add(Position::B2);
                    eligible.add(Position::B3);
                    eligible.add(Position::SS);
                }
                "OF" => {
                    eligible.add(Position::LF);
                    eligible.add(Position::CF);
                    eligible.add(Position::RF);
                }
                other => match Position::from_code(other) {
                    Some(pos) => eligible.add(pos),
                    None => log::warn!("Skipping unknown position token '{}'", other),
                },
            }
        }
        eligible
    }

    fn add(&mut self, position: Position) {
        if !self.positions.contains(&position) {
            self.positions.push(position);
        }
    }

    pub fn allows(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of distinct positions this player can fill.
    ///
    /// Used by callers to order scarce players first during assignment.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }
}

/// Roster entry: stable name identity plus the parsed eligibility set.
///
/// Immutable for the duration of a plan build. The jersey number is carried
/// for external card rendering and plays no part in scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey: Option<String>,
    pub eligible: EligiblePositions,
}

impl Player {
    pub fn new(name: impl Into<String>, prefs: &str) -> Self {
        Player {
            name: name.into(),
            jersey: None,
            eligible: EligiblePositions::parse(prefs),
        }
    }

    pub fn with_jersey(mut self, jersey: impl Into<String>) -> Self {
        self.jersey = Some(jersey.into());
        self
    }
}

/// Identity occupying a defensive slot: a real roster player, or a pool
/// placeholder used when fewer than nine players are present.
///
/// Pool placeholders are eligible for every position, never benched, and
/// excluded from fairness accounting. Each carries a 1-based index so that
/// multiple placeholders remain pairwise distinct identities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Fielder {
    Player(String),
    Pool(u8),
}

impl Fielder {
    pub const POOL_LABEL: &'static str = "Pool Player";

    pub fn is_pool(&self) -> bool {
        matches!(self, Fielder::Pool(_))
    }

    /// The real player's name, if this is not a placeholder.
    pub fn player_name(&self) -> Option<&str> {
        match self {
            Fielder::Player(name) => Some(name),
            Fielder::Pool(_) => None,
        }
    }

    /// Display label used in stored plan records.
    ///
    /// The first placeholder is labeled exactly "Pool Player"; further ones
    /// are numbered to keep identities distinct in the artifact.
    pub fn label(&self) -> String {
        match self {
            Fielder::Player(name) => name.clone(),
            Fielder::Pool(1) => Self::POOL_LABEL.to_string(),
            Fielder::Pool(n) => format!("{} {}", Self::POOL_LABEL, n),
        }
    }

    /// Inverse of [`Fielder::label`].
    pub fn from_label(label: &str) -> Self {
        if label == Self::POOL_LABEL {
            return Fielder::Pool(1);
        }
        if let Some(rest) = label.strip_prefix(Self::POOL_LABEL) {
            if let Ok(index) = rest.trim().parse::<u8>() {
                return Fielder::Pool(index);
            }
        }
        Fielder::Player(label.to_string())
    }
}

impl fmt::Display for Fielder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_codes_round_trip() {
        for pos in Position::ALL {
            assert_eq!(Position::from_code(pos.code()), Some(pos));
        }
        assert_eq!(Position::from_code("DH"), None);
    }

    #[test]
    fn test_position_serde_uses_codes() {
        let json = serde_json::to_string(&Position::B1).unwrap();
        assert_eq!(json, "\"1B\"");
        let pos: Position = serde_json::from_str("\"SS\"").unwrap();
        assert_eq!(pos, Position::SS);
    }

    #[test]
    fn test_parse_broad_tokens() {
        let eligible = EligiblePositions::parse("INF, OF");
        assert!(eligible.allows(Position::B2));
        assert!(eligible.allows(Position::B3));
        assert!(eligible.allows(Position::SS));
        assert!(eligible.allows(Position::LF));
        assert!(eligible.allows(Position::CF));
        assert!(eligible.allows(Position::RF));
        assert!(!eligible.allows(Position::P));
        assert!(!eligible.allows(Position::C));
        // INF does not grant first base
        assert!(!eligible.allows(Position::B1));
    }

    #[test]
    fn test_parse_aliases_and_exact_codes() {
        let eligible = EligiblePositions::parse("pitcher, catcher, 1b, ss");
        assert!(eligible.allows(Position::P));
        assert!(eligible.allows(Position::C));
        assert!(eligible.allows(Position::B1));
        assert!(eligible.allows(Position::SS));
        assert_eq!(eligible.len(), 4);
    }

    #[test]
    fn test_parse_skips_unknown_tokens() {
        let eligible = EligiblePositions::parse("anywhere, OF");
        assert_eq!(eligible.len(), 3);
        assert!(eligible.allows(Position::CF));
    }

    #[test]
    fn test_parse_empty_string() {
        let eligible = EligiblePositions::parse("");
        assert!(eligible.is_empty());
    }

    #[test]
    fn test_fielder_labels() {
        assert_eq!(Fielder::Player("Ada".into()).label(), "Ada");
        assert_eq!(Fielder::Pool(1).label(), "Pool Player");
        assert_eq!(Fielder::Pool(2).label(), "Pool Player 2");
    }

    #[test]
    fn test_fielder_label_round_trip() {
        for fielder in [
            Fielder::Player("Sam Park".into()),
            Fielder::Pool(1),
            Fielder::Pool(3),
        ] {
            assert_eq!(Fielder::from_label(&fielder.label()), fielder);
        }
    }
}
