//! Human-readable run and group suggestions.
//!
//! This is a best-effort scan over the raw tiles, independent of the scoring
//! walk: suggestions may overlap each other or disagree with the arrangement
//! behind `best_score`. It never affects the verdict.

use crate::config::SolverConfig;
use crate::groups::MIN_GROUP_SIZE;
use crate::{Suit, Tile};
use std::collections::{BTreeMap, BTreeSet};

/// Most suggestions returned by one scan
pub const MAX_SUGGESTIONS: usize = 5;

const MIN_RUN_LENGTH: usize = 3;

/// A suggested meld, as (suit, number) faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Run(Vec<(Suit, u8)>),
    Group(Vec<(Suit, u8)>),
}

impl Suggestion {
    /// "Run: Red 5, Red 6, Red 7" / "Group: Red 6, Blue 6, Yellow 6"
    pub fn describe(&self) -> String {
        let (kind, faces) = match self {
            Suggestion::Run(faces) => ("Run", faces),
            Suggestion::Group(faces) => ("Group", faces),
        };
        let tiles: Vec<String> = faces
            .iter()
            .map(|(suit, number)| format!("{} {}", suit, number))
            .collect();
        format!("{}: {}", kind, tiles.join(", "))
    }
}

/// Maximal same-suit runs of consecutive numbers, length three or more.
/// Duplicate copies are collapsed.
pub fn find_runs<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Vec<Suggestion> {
    let mut by_suit: BTreeMap<Suit, BTreeSet<u8>> = BTreeMap::new();
    for tile in tiles.into_iter().filter(|t| !t.is_wild()) {
        by_suit.entry(tile.suit).or_default().insert(tile.number);
    }

    let mut runs = Vec::new();
    for (suit, numbers) in by_suit {
        let mut current: Vec<u8> = Vec::new();
        for number in numbers {
            if current.last().is_some_and(|&last| last.checked_add(1) != Some(number)) {
                push_run(suit, &current, &mut runs);
                current.clear();
            }
            current.push(number);
        }
        push_run(suit, &current, &mut runs);
    }
    runs
}

fn push_run(suit: Suit, numbers: &[u8], runs: &mut Vec<Suggestion>) {
    if numbers.len() >= MIN_RUN_LENGTH {
        runs.push(Suggestion::Run(numbers.iter().map(|&n| (suit, n)).collect()));
    }
}

/// Every distinct-suit subset of size three or more at each number, largest first
pub fn find_groups<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Vec<Suggestion> {
    let mut by_number: BTreeMap<u8, BTreeSet<Suit>> = BTreeMap::new();
    for tile in tiles.into_iter().filter(|t| !t.is_wild()) {
        by_number.entry(tile.number).or_default().insert(tile.suit);
    }

    let mut groups = Vec::new();
    for (number, suits) in by_number {
        let suits: Vec<Suit> = suits.into_iter().collect();
        for size in (MIN_GROUP_SIZE as usize..=suits.len()).rev() {
            let mut combination = Vec::with_capacity(size);
            suit_combinations(&suits, size, 0, &mut combination, &mut |chosen: &[Suit]| {
                groups.push(Suggestion::Group(chosen.iter().map(|&s| (s, number)).collect()));
            });
        }
    }
    groups
}

/// Calls `emit` with each `size`-element combination of `suits`, in order
fn suit_combinations(
    suits: &[Suit],
    size: usize,
    start: usize,
    combination: &mut Vec<Suit>,
    emit: &mut dyn FnMut(&[Suit]),
) {
    if combination.len() == size {
        emit(combination);
        return;
    }
    for i in start..suits.len() {
        combination.push(suits[i]);
        suit_combinations(suits, size, i + 1, combination, emit);
        combination.pop();
    }
}

/// Runs first, then groups, capped at `MAX_SUGGESTIONS`.
///
/// Only tiles inside the configured suits and face range are considered.
pub fn suggest_moves<'a>(
    tiles: impl IntoIterator<Item = &'a Tile>,
    config: &SolverConfig,
) -> Vec<String> {
    let in_play: Vec<&Tile> = tiles
        .into_iter()
        .filter(|t| t.suit.index() < config.suit_count && t.number <= config.max_value)
        .collect();

    find_runs(in_play.iter().copied())
        .into_iter()
        .chain(find_groups(in_play.iter().copied()))
        .take(MAX_SUGGESTIONS)
        .map(|s| s.describe())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_tiles;

    fn suggest(s: &str) -> Vec<String> {
        let tiles = parse_tiles(s).unwrap();
        suggest_moves(&tiles, &SolverConfig::default())
    }

    #[test]
    fn test_run_detection() {
        assert_eq!(suggest("r1 r2 r3 r4"), vec!["Run: Red 1, Red 2, Red 3, Red 4"]);
    }

    #[test]
    fn test_runs_split_on_gaps_and_ignore_duplicates() {
        let tiles = parse_tiles("b1 b2 b3 b5 b6 b7 b7 b9 b10").unwrap();
        let runs = find_runs(&tiles);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].describe(), "Run: Blue 5, Blue 6, Blue 7");
    }

    #[test]
    fn test_duplicate_colour_listed_once() {
        let moves = suggest("k6 r6 y6 k6");
        assert_eq!(moves, vec!["Group: Red 6, Yellow 6, Black 6"]);
    }

    #[test]
    fn test_four_colours_give_every_subset() {
        let tiles = parse_tiles("k6 r6 y6 b6").unwrap();
        let groups = find_groups(&tiles);
        assert_eq!(groups.len(), 5);
        assert_eq!(
            groups[0].describe(),
            "Group: Red 6, Blue 6, Yellow 6, Black 6"
        );
        assert_eq!(groups[1].describe(), "Group: Red 6, Blue 6, Yellow 6");
    }

    #[test]
    fn test_runs_come_before_groups_and_cap_applies() {
        let moves = suggest("r5 b5 y5 k5 r6 r7");
        assert_eq!(moves.len(), MAX_SUGGESTIONS);
        assert_eq!(moves[0], "Run: Red 5, Red 6, Red 7");
        assert!(moves[1..].iter().all(|m| m.starts_with("Group:")));
    }

    #[test]
    fn test_wildcards_are_not_suggested() {
        assert!(suggest("w w w r1 r2").is_empty());
    }

    #[test]
    fn test_suits_and_numbers_outside_config_are_skipped() {
        let tiles = parse_tiles("k1 k2 k3 r5 b5 k5 y5 r11 r12 r13").unwrap();
        let config = SolverConfig {
            suit_count: 3,
            max_value: 10,
            ..SolverConfig::default()
        };
        let moves = suggest_moves(&tiles, &config);
        assert_eq!(moves, vec!["Group: Red 5, Blue 5, Yellow 5"]);
        assert!(moves.iter().all(|m| !m.contains("Black")));
    }
}
