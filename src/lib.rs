use serde::{Deserialize, Serialize};
use std::fmt;

pub mod advisor;
pub mod api;
pub mod config;
pub mod groups;
pub mod index;
pub mod runs;
pub mod solver;
pub mod timing;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use config::{ConfigError, ScoringRule, SolverConfig};
pub use solver::{SolverResult, solve, solve_game};

/// Number of suits in the tile palette
pub const PALETTE_SIZE: usize = 4;

/// Face number reserved for wildcards/jokers
pub const WILDCARD_NUMBER: u8 = 0;

/// Tile colour. The palette is fixed; `SolverConfig::suit_count` may use a prefix of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(alias = "red", alias = "r")]
    Red,
    #[serde(alias = "blue", alias = "b")]
    Blue,
    #[serde(alias = "yellow", alias = "y")]
    Yellow,
    #[serde(alias = "black", alias = "k")]
    Black,
}

impl Suit {
    pub const ALL: [Suit; PALETTE_SIZE] = [Suit::Red, Suit::Blue, Suit::Yellow, Suit::Black];

    /// Position in the palette (0-3)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Suit> {
        Self::ALL.get(index).copied()
    }

    /// Single-letter code used by the compact notation
    pub fn code(self) -> char {
        match self {
            Suit::Red => 'r',
            Suit::Blue => 'b',
            Suit::Yellow => 'y',
            Suit::Black => 'k',
        }
    }

    pub fn from_code(code: &str) -> Option<Suit> {
        match code {
            "r" => Some(Suit::Red),
            "b" => Some(Suit::Blue),
            "y" => Some(Suit::Yellow),
            "k" => Some(Suit::Black),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Red => "Red",
            Suit::Blue => "Blue",
            Suit::Yellow => "Yellow",
            Suit::Black => "Black",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single physical tile.
///
/// Tiles are immutable value objects. Two copies of the same face (e.g. both red
/// 7s) differ only by `id`. A `number` of 0 marks a wildcard, whose suit is
/// meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub suit: Suit,
    pub number: u8,
    #[serde(default)]
    pub label: String,
}

impl Tile {
    /// Create a numbered tile with a default label such as "Red 5"
    pub fn new(id: impl Into<String>, suit: Suit, number: u8) -> Self {
        let label = if number == WILDCARD_NUMBER {
            "Joker".to_string()
        } else {
            format!("{} {}", suit, number)
        };
        Tile {
            id: id.into(),
            suit,
            number,
            label,
        }
    }

    /// Create a wildcard/joker tile
    pub fn wild(id: impl Into<String>) -> Self {
        Tile::new(id, Suit::Red, WILDCARD_NUMBER)
    }

    pub fn is_wild(&self) -> bool {
        self.number == WILDCARD_NUMBER
    }

    /// Face value counted toward scores (0 for wildcards)
    pub fn face_value(&self) -> u32 {
        self.number as u32
    }

    /// Parse a tile from compact notation.
    /// Format: "r13" (red 13), "b1" (blue 1), "y7" (yellow 7), "k9" (black 9), "w" (wild).
    /// The notation doubles as the tile id.
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s == "w" {
            return Ok(Tile::wild(s));
        }
        if s.len() < 2 || !s.is_char_boundary(1) {
            return Err(format!("Invalid tile string: {}", s));
        }

        let suit = Suit::from_code(&s[0..1])
            .ok_or_else(|| format!("Invalid color: {}", &s[0..1]))?;

        let number: u8 = s[1..]
            .parse()
            .map_err(|_| format!("Invalid number: {}", &s[1..]))?;

        if number == WILDCARD_NUMBER {
            return Err(format!("Number must be at least 1, got {} (use \"w\" for a joker)", number));
        }

        Ok(Tile::new(s, suit, number))
    }

    /// Compact notation for this tile ("r13", "w")
    pub fn notation(&self) -> String {
        if self.is_wild() {
            "w".to_string()
        } else {
            format!("{}{}", self.suit.code(), self.number)
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            f.write_str(&self.notation())
        } else {
            f.write_str(&self.label)
        }
    }
}

/// The two tile collections a solve considers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub hand_tiles: Vec<Tile>,
    pub table_tiles: Vec<Tile>,
}

impl GameState {
    pub fn new(hand_tiles: Vec<Tile>, table_tiles: Vec<Tile>) -> Self {
        GameState {
            hand_tiles,
            table_tiles,
        }
    }

    /// Hand and table merged into the working set the engine scores
    pub fn all_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.hand_tiles.iter().chain(self.table_tiles.iter())
    }
}

/// Parse a whitespace- or comma-separated list of compact tiles ("r5 r6, r7 w")
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>, String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(Tile::from_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_from_string() {
        assert_eq!(Tile::from_string("r13").unwrap(), Tile::new("r13", Suit::Red, 13));
        assert_eq!(Tile::from_string("b1").unwrap(), Tile::new("b1", Suit::Blue, 1));
        assert_eq!(Tile::from_string("y7").unwrap().suit, Suit::Yellow);
        assert_eq!(Tile::from_string("k9").unwrap().suit, Suit::Black);
        assert!(Tile::from_string("w").unwrap().is_wild());

        assert!(Tile::from_string("x5").is_err());
        assert!(Tile::from_string("r0").is_err());
        assert!(Tile::from_string("r").is_err());
        assert!(Tile::from_string("").is_err());
        assert!(Tile::from_string("rx").is_err());
    }

    #[test]
    fn test_tile_labels() {
        assert_eq!(Tile::from_string("k6").unwrap().label, "Black 6");
        assert_eq!(Tile::from_string("w").unwrap().label, "Joker");
        assert_eq!(Tile::from_string("y12").unwrap().to_string(), "Yellow 12");
    }

    #[test]
    fn test_notation_matches_parsed_string() {
        for s in ["r1", "b13", "y7", "k3", "w"] {
            assert_eq!(Tile::from_string(s).unwrap().notation(), s);
        }
    }

    #[test]
    fn test_wild_has_no_face_value() {
        assert_eq!(Tile::wild("j1").face_value(), 0);
        assert_eq!(Tile::new("r9", Suit::Red, 9).face_value(), 9);
    }

    #[test]
    fn test_parse_tiles_list() {
        let tiles = parse_tiles("r5 r6,r7  w").unwrap();
        assert_eq!(tiles.len(), 4);
        assert!(tiles[3].is_wild());
        assert!(parse_tiles("r5 q6").is_err());
        assert!(parse_tiles("").unwrap().is_empty());
    }

    #[test]
    fn test_suit_round_trips_through_index() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_index(suit.index()), Some(suit));
            assert_eq!(Suit::from_code(&suit.code().to_string()), Some(suit));
        }
        assert_eq!(Suit::from_index(PALETTE_SIZE), None);
    }

    #[test]
    fn test_game_state_merges_hand_and_table() {
        let state = GameState::new(parse_tiles("r1 r2").unwrap(), parse_tiles("r3").unwrap());
        let ids: Vec<&str> = state.all_tiles().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
    }
}
