use crate::PALETTE_SIZE;
use crate::config::ScoringRule;
use std::fmt;

/// Most runs one suit can build side by side (one per copy of a tile, up to
/// this cap)
pub const MAX_RUN_LANES: usize = 2;

/// Length of the run a suit is building, saturating at three.
///
/// Once a run holds three tiles it is valid and further extension needs no
/// distinct state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RunState {
    NoRun = 0,
    One = 1,
    Two = 2,
    ThreePlus = 3,
}

impl RunState {
    fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => RunState::NoRun,
            1 => RunState::One,
            2 => RunState::Two,
            _ => RunState::ThreePlus,
        }
    }

    pub fn length(self) -> u8 {
        self as u8
    }

    pub fn is_live(self) -> bool {
        self != RunState::NoRun
    }

    /// State after consuming `tiles` tiles at the next number. Zero ends the run.
    pub fn extend(self, tiles: u8) -> RunState {
        if tiles == 0 {
            return RunState::NoRun;
        }
        RunState::from_bits(self.length().saturating_add(tiles).min(3) as u16)
    }

    /// Faces already laid in this run that the strict rule has not credited
    /// yet, seen from face value `value`
    pub fn uncredited(self, value: u8) -> u32 {
        match self {
            RunState::One | RunState::Two => descending_sum(value.saturating_sub(1), self.length()),
            _ => 0,
        }
    }
}

/// The runs of one suit, longest first; unused lanes hold `NoRun`
pub type Lanes = [RunState; MAX_RUN_LANES];

/// Every lane of every suit, packed as a u16.
/// - Suit `s`, lane `l`: bits `2 * (s * MAX_RUN_LANES + l)` and the next one
///
/// Lanes are stored sorted so equal multisets of runs share one key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RunVector(u16);

impl RunVector {
    const BITS_PER_LANE: usize = 2;

    /// Every suit with no run in progress
    pub fn empty() -> Self {
        RunVector(0)
    }

    fn shift(suit: usize, lane: usize) -> usize {
        debug_assert!(suit < PALETTE_SIZE && lane < MAX_RUN_LANES);
        (suit * MAX_RUN_LANES + lane) * Self::BITS_PER_LANE
    }

    /// The suit's longest run
    pub fn get(&self, suit: usize) -> RunState {
        self.lanes(suit)[0]
    }

    pub fn lanes(&self, suit: usize) -> Lanes {
        let mut lanes = [RunState::NoRun; MAX_RUN_LANES];
        for (lane, state) in lanes.iter_mut().enumerate() {
            *state = RunState::from_bits(self.0 >> Self::shift(suit, lane));
        }
        lanes
    }

    /// Make `state` the suit's only run
    pub fn set(&mut self, suit: usize, state: RunState) {
        let mut lanes = [RunState::NoRun; MAX_RUN_LANES];
        lanes[0] = state;
        self.set_lanes(suit, lanes);
    }

    pub fn set_lanes(&mut self, suit: usize, mut lanes: Lanes) {
        lanes.sort_unstable_by(|a, b| b.cmp(a));
        for (lane, state) in lanes.into_iter().enumerate() {
            let shift = Self::shift(suit, lane);
            self.0 = (self.0 & !(0b11 << shift)) | ((state as u16) << shift);
        }
    }

    pub fn with(mut self, suit: usize, state: RunState) -> Self {
        self.set(suit, state);
        self
    }

    pub fn with_lanes(mut self, suit: usize, lanes: Lanes) -> Self {
        self.set_lanes(suit, lanes);
        self
    }

    pub fn bits(&self) -> u16 {
        self.0
    }
}

impl fmt::Debug for RunVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suits: Vec<Vec<u8>> = (0..PALETTE_SIZE)
            .map(|s| self.lanes(s).iter().map(|l| l.length()).collect())
            .collect();
        write!(f, "RunVector({:?})", suits)
    }
}

/// One way of carrying runs through a number, with the run score it earns there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfiguration {
    pub runs: RunVector,
    /// Tiles of each suit withheld from groups at this number
    pub reserved: [u8; PALETTE_SIZE],
    pub score: u32,
}

impl RunConfiguration {
    /// Tiles of each suit left for groups once runs have taken theirs
    pub fn leftovers(&self, counts: &[u8; PALETTE_SIZE]) -> [u8; PALETTE_SIZE] {
        let mut left = [0; PALETTE_SIZE];
        for suit in 0..PALETTE_SIZE {
            assert!(
                counts[suit] >= self.reserved[suit],
                "runs in suit {} reserve {} tiles but only {} exist",
                suit,
                self.reserved[suit],
                counts[suit]
            );
            left[suit] = counts[suit] - self.reserved[suit];
        }
        left
    }
}

/// How many runs a suit may carry at once under `rule`.
///
/// Strict gives every copy of a tile its own lane (capped at
/// `MAX_RUN_LANES`); incremental follows a single run per suit.
pub fn run_lanes(rule: ScoringRule, copies: u8) -> usize {
    match rule {
        ScoringRule::Strict => (copies as usize).clamp(1, MAX_RUN_LANES),
        ScoringRule::Incremental => 1,
    }
}

/// Face values `end, end-1, ...` summed over `len` terms
fn descending_sum(end: u8, len: u8) -> u32 {
    (0..len).map(|i| end.saturating_sub(i) as u32).sum()
}

/// Score one run earns moving from `old` to `new` at face value `value`
pub fn transition_score(rule: ScoringRule, old: RunState, new: RunState, value: u8) -> u32 {
    match rule {
        ScoringRule::Incremental => {
            if new == RunState::NoRun && old == RunState::ThreePlus {
                // The run ended on the previous number
                descending_sum(value.saturating_sub(1), 3)
            } else if new > old {
                value as u32 * (new.length() - old.length()) as u32
            } else {
                0
            }
        }
        ScoringRule::Strict => match (old, new) {
            (RunState::Two, RunState::ThreePlus) => descending_sum(value, 3),
            (RunState::ThreePlus, RunState::ThreePlus) => value as u32,
            _ => 0,
        },
    }
}

/// One suit's decision at a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SuitMove {
    lanes: Lanes,
    reserved: u8,
    score: u32,
}

/// Distinct decisions for one suit holding `available` tiles at `value`.
///
/// Decisions that leave the same lanes behind are merged, keeping the best
/// score; they also reserve the same tiles. Moves placing more tiles, then
/// scoring more, then keeping longer runs come first.
fn suit_moves(
    rule: ScoringRule,
    value: u8,
    old: Lanes,
    available: u8,
    lane_count: usize,
) -> Vec<SuitMove> {
    let mut moves: Vec<SuitMove> = Vec::new();
    let mut offer = |lanes: Lanes, reserved: u8, score: u32| {
        let mut lanes = lanes;
        lanes.sort_unstable_by(|a, b| b.cmp(a));
        match moves.iter_mut().find(|m| m.lanes == lanes) {
            Some(existing) => existing.score = existing.score.max(score),
            None => moves.push(SuitMove { lanes, reserved, score }),
        }
    };

    match rule {
        ScoringRule::Incremental => {
            // Taking more tiles than the run can still grow by leaves the same state
            for tiles in 0..=available {
                let new = old[0].extend(tiles);
                let mut lanes = [RunState::NoRun; MAX_RUN_LANES];
                lanes[0] = new;
                offer(lanes, u8::from(new.is_live()), transition_score(rule, old[0], new, value));
            }
        }
        ScoringRule::Strict => {
            // Each placed tile extends a distinct live lane or opens a new one
            let placeable = (available as usize).min(lane_count);
            for extended in 0u32..(1 << lane_count) {
                let picks = (0..lane_count).filter(|lane| extended & (1 << lane) != 0);
                if picks.clone().any(|lane| !old[lane].is_live()) {
                    continue;
                }
                let grown = extended.count_ones() as usize;
                if grown > placeable {
                    continue;
                }

                let mut lanes = [RunState::NoRun; MAX_RUN_LANES];
                let mut score = 0;
                for (slot, lane) in picks.enumerate() {
                    lanes[slot] = old[lane].extend(1);
                    score += transition_score(rule, old[lane], lanes[slot], value);
                }
                for opened in 0..=(placeable - grown) {
                    let mut with_new = lanes;
                    for slot in with_new.iter_mut().skip(grown).take(opened) {
                        *slot = RunState::One;
                    }
                    offer(with_new, (grown + opened) as u8, score);
                }
            }
        }
    }

    moves.sort_by(|a, b| {
        b.reserved
            .cmp(&a.reserved)
            .then(b.score.cmp(&a.score))
            .then(b.lanes.cmp(&a.lanes))
    });
    moves
}

/// Every combination of per-suit run decisions at `value`.
///
/// Each suit independently places between 0 and `counts[suit]` tiles into
/// at most `lane_count` runs; a run that takes no tile ends. The result is the
/// Cartesian product across the first `suit_count` suits and is never empty.
pub fn enumerate_transitions(
    rule: ScoringRule,
    value: u8,
    incoming: RunVector,
    counts: &[u8; PALETTE_SIZE],
    suit_count: usize,
    lane_count: usize,
) -> Vec<RunConfiguration> {
    let per_suit: Vec<Vec<SuitMove>> = (0..suit_count)
        .map(|suit| suit_moves(rule, value, incoming.lanes(suit), counts[suit], lane_count))
        .collect();

    let mut configurations = Vec::new();
    let mut current = RunConfiguration {
        runs: RunVector::empty(),
        reserved: [0; PALETTE_SIZE],
        score: 0,
    };
    enumerate_helper(&per_suit, 0, &mut current, &mut configurations);
    configurations
}

fn enumerate_helper(
    per_suit: &[Vec<SuitMove>],
    suit: usize,
    current: &mut RunConfiguration,
    configurations: &mut Vec<RunConfiguration>,
) {
    if suit == per_suit.len() {
        configurations.push(*current);
        return;
    }

    let base_score = current.score;
    for choice in &per_suit[suit] {
        current.runs.set_lanes(suit, choice.lanes);
        current.reserved[suit] = choice.reserved;
        current.score = base_score + choice.score;
        enumerate_helper(per_suit, suit + 1, current, configurations);
    }

    current.runs.set(suit, RunState::NoRun);
    current.reserved[suit] = 0;
    current.score = base_score;
}
