use crate::advisor;
use crate::config::{ConfigError, ScoringRule, SolverConfig};
use crate::groups::group_score;
use crate::index::TileIndex;
use crate::runs::{RunVector, enumerate_transitions, run_lanes};
use crate::{GameState, PALETTE_SIZE, Tile};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Outcome of one solve. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Whether the best score reaches the configured fraction of the total face value
    pub solvable: bool,
    pub best_score: u32,
    /// Sum of face values over every hand and table tile
    pub total_face_value: u32,
    pub explanation: String,
    /// Run/group suggestions from an independent scan, not from the walk
    pub suggestions: Vec<String>,
    /// Wildcards set aside (they are not placed by the walk)
    pub wildcards: usize,
    /// Distinct (number, run vector) states the walk evaluated
    pub states_explored: usize,
}

/// Memo table key: the number being processed and the runs carried into it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    value: u8,
    runs: RunVector,
}

/// Memoized walk over face values, carrying each suit's runs.
///
/// The memo table belongs to one walker, and a walker to one solve, so
/// repeated or concurrent solves never share entries.
pub struct SolvabilityWalker<'a> {
    index: &'a TileIndex,
    config: &'a SolverConfig,
    lanes: usize,
    memo: FxHashMap<MemoKey, u32>,
    /// Group points keyed by (value, leftover counts)
    group_cache: FxHashMap<(u8, [u8; PALETTE_SIZE]), u32>,
    /// remaining[v]: face value of every indexed tile numbered v or higher
    remaining: Vec<u32>,
    evaluations: usize,
}

impl<'a> SolvabilityWalker<'a> {
    pub fn new(index: &'a TileIndex, config: &'a SolverConfig) -> Self {
        let top = index.max_value() as usize;
        let mut remaining = vec![0; top + 2];
        for value in (1..=top).rev() {
            let tiles: u32 = index.counts_at(value as u8).iter().map(|&n| n as u32).sum();
            remaining[value] = remaining[value + 1] + value as u32 * tiles;
        }

        SolvabilityWalker {
            index,
            config,
            lanes: run_lanes(config.scoring, config.copies),
            memo: FxHashMap::default(),
            group_cache: FxHashMap::default(),
            remaining,
            evaluations: 0,
        }
    }

    /// Best score from the lowest face value with no runs in progress
    pub fn run(&mut self) -> u32 {
        self.best_from(1, RunVector::empty())
    }

    /// Best score achievable from `value` onward, given the runs carried into it
    pub fn best_from(&mut self, value: u8, runs: RunVector) -> u32 {
        if value > self.index.max_value() {
            return 0;
        }

        let key = MemoKey { value, runs };
        if let Some(&score) = self.memo.get(&key) {
            return score;
        }
        self.evaluations += 1;

        let counts = self.index.counts_at(value);
        let suit_count = self.index.suit_count();
        let ceiling = self.ceiling(value, runs);
        let mut best = 0;

        for config in enumerate_transitions(
            self.config.scoring,
            value,
            runs,
            &counts,
            suit_count,
            self.lanes,
        ) {
            let groups = self.groups_at(value, config.leftovers(&counts));
            let future = self.best_from(value + 1, config.runs);
            best = best.max(config.score + groups + future);
            if Some(best) == ceiling {
                break;
            }
        }

        let previous = self.memo.insert(key, best);
        debug_assert!(previous.is_none(), "memo key {:?} evaluated twice", key);
        best
    }

    /// Most the strict rule could still credit from `value`: every remaining
    /// tile plus the faces already laid in unfinished runs. `None` under the
    /// incremental rule, which can credit a tile more than once.
    fn ceiling(&self, value: u8, runs: RunVector) -> Option<u32> {
        if self.config.scoring != ScoringRule::Strict {
            return None;
        }
        let pending: u32 = (0..self.index.suit_count())
            .flat_map(|suit| runs.lanes(suit))
            .map(|lane| lane.uncredited(value))
            .sum();
        Some(self.remaining[value as usize] + pending)
    }

    fn groups_at(&mut self, value: u8, leftovers: [u8; PALETTE_SIZE]) -> u32 {
        let suit_count = self.index.suit_count();
        *self
            .group_cache
            .entry((value, leftovers))
            .or_insert_with(|| group_score(value, &leftovers, suit_count))
    }

    /// Number of memo entries written
    pub fn states_explored(&self) -> usize {
        self.memo.len()
    }

    /// Number of times a state was evaluated rather than read from the memo
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

/// Combine the walk's best score with the tile totals into the final verdict
pub fn assemble_result(
    best_score: u32,
    index: &TileIndex,
    config: &SolverConfig,
    suggestions: Vec<String>,
    states_explored: usize,
) -> SolverResult {
    let total = index.total_face_value();
    let solvable = best_score as f64 >= config.threshold * total as f64;
    let percent = config.threshold * 100.0;

    let mut explanation = if solvable {
        format!(
            "Found solution with score {} out of {} possible ({:.0}% needed)",
            best_score, total, percent
        )
    } else {
        format!(
            "No valid solution found. Max score: {} of {} ({:.0}% needed)",
            best_score, total, percent
        )
    };
    if index.wildcards() > 0 {
        explanation.push_str(&format!(
            "; {} joker(s) set aside",
            index.wildcards()
        ));
    }

    SolverResult {
        solvable,
        best_score,
        total_face_value: total,
        explanation,
        suggestions,
        wildcards: index.wildcards(),
        states_explored,
    }
}

/// Decide whether hand and table tiles can be arranged into runs and groups,
/// and how many points the best arrangement places
pub fn solve(hand: &[Tile], table: &[Tile], config: &SolverConfig) -> Result<SolverResult, ConfigError> {
    config.validate()?;

    let index = TileIndex::build(hand.iter().chain(table.iter()), config);
    if index.out_of_range() > 0 {
        eprintln!(
            "warning: {} tile(s) outside numbers 1-{} or the first {} suits were not placed",
            index.out_of_range(),
            config.max_value,
            config.suit_count
        );
    }
    if index.surplus() > 0 {
        eprintln!(
            "warning: {} tile(s) beyond {} copies of the same face were not placed",
            index.surplus(),
            config.copies
        );
    }

    let mut walker = SolvabilityWalker::new(&index, config);
    let best_score = walker.run();

    let suggestions = advisor::suggest_moves(hand.iter().chain(table.iter()), config);

    Ok(assemble_result(
        best_score,
        &index,
        config,
        suggestions,
        walker.states_explored(),
    ))
}

/// Solve a game state with the default configuration
pub fn solve_game(state: &GameState) -> Result<SolverResult, ConfigError> {
    solve(&state.hand_tiles, &state.table_tiles, &SolverConfig::default())
}
