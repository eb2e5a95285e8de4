use crate::config::SolverConfig;
use crate::{PALETTE_SIZE, Suit, Tile};

/// Tile counts indexed by (number, suit).
///
/// Built in one pass over the merged hand and table; read-only afterward.
/// Wildcards, tiles outside the configured face range or suit prefix, and
/// copies beyond `copies` of one tile are not indexed, but still count toward
/// `total_face_value`.
#[derive(Debug, Clone)]
pub struct TileIndex {
    max_value: u8,
    suit_count: usize,
    /// counts[number * PALETTE_SIZE + suit]
    counts: Vec<u8>,
    total_face_value: u32,
    wildcards: usize,
    out_of_range: usize,
    surplus: usize,
}

impl TileIndex {
    pub fn build<'a>(tiles: impl IntoIterator<Item = &'a Tile>, config: &SolverConfig) -> Self {
        let mut index = TileIndex {
            max_value: config.max_value,
            suit_count: config.suit_count,
            counts: vec![0; (config.max_value as usize + 1) * PALETTE_SIZE],
            total_face_value: 0,
            wildcards: 0,
            out_of_range: 0,
            surplus: 0,
        };

        for tile in tiles {
            index.total_face_value += tile.face_value();

            if tile.is_wild() {
                index.wildcards += 1;
            } else if tile.number > index.max_value || tile.suit.index() >= index.suit_count {
                index.out_of_range += 1;
            } else {
                let slot = Self::slot(tile.number, tile.suit);
                if index.counts[slot] < config.copies {
                    index.counts[slot] += 1;
                } else {
                    index.surplus += 1;
                }
            }
        }

        index
    }

    fn slot(number: u8, suit: Suit) -> usize {
        number as usize * PALETTE_SIZE + suit.index()
    }

    /// How many tiles of this number and suit are available (0 when absent)
    pub fn count(&self, number: u8, suit: Suit) -> u8 {
        if number > self.max_value {
            return 0;
        }
        self.counts[Self::slot(number, suit)]
    }

    /// Per-suit counts at one number, for the configured suits
    pub fn counts_at(&self, number: u8) -> [u8; PALETTE_SIZE] {
        let mut counts = [0; PALETTE_SIZE];
        for suit in Suit::ALL.iter().take(self.suit_count) {
            counts[suit.index()] = self.count(number, *suit);
        }
        counts
    }

    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    pub fn suit_count(&self) -> usize {
        self.suit_count
    }

    /// Sum of face values over every input tile, indexed or not
    pub fn total_face_value(&self) -> u32 {
        self.total_face_value
    }

    pub fn wildcards(&self) -> usize {
        self.wildcards
    }

    /// Non-wild tiles whose number or suit the configuration excludes
    pub fn out_of_range(&self) -> usize {
        self.out_of_range
    }

    /// Tiles beyond the configured number of copies of their (number, suit)
    pub fn surplus(&self) -> usize {
        self.surplus
    }
}
