use crate::PALETTE_SIZE;

/// Smallest legal group
pub const MIN_GROUP_SIZE: u32 = 3;

/// Suit subsets (as bitmasks over the first `suit_count` suits) large enough
/// to form a group, largest first. Suits past the palette are ignored.
pub(crate) fn group_masks(suit_count: usize) -> Vec<u8> {
    let suits = suit_count.min(PALETTE_SIZE);
    let mut masks: Vec<u8> = (0u8..(1 << suits))
        .filter(|mask| mask.count_ones() >= MIN_GROUP_SIZE)
        .collect();
    masks.sort_by(|a, b| b.count_ones().cmp(&a.count_ones()).then(b.cmp(a)));
    masks
}

fn mask_fits(mask: u8, leftovers: &[u8; PALETTE_SIZE]) -> bool {
    suits_in(mask).all(|suit| leftovers[suit] > 0)
}

fn suits_in(mask: u8) -> impl Iterator<Item = usize> {
    (0..PALETTE_SIZE).filter(move |suit| mask & (1 << suit) != 0)
}

/// Disjoint groups covering as many leftover tiles as possible.
///
/// Each group is a suit bitmask; the same mask appears once per copy used.
/// Searches exhaustively (in non-increasing mask order, so each multiset of
/// groups is tried once): greedily grabbing every suit can lose tiles, e.g.
/// counts 2,2,1,1 split into two groups of three.
pub(crate) fn find_groups(leftovers: &[u8; PALETTE_SIZE], suit_count: usize) -> Vec<u8> {
    let masks = group_masks(suit_count);
    let mut work = *leftovers;
    let mut current = Vec::new();
    let mut best = (0u32, Vec::new());
    search(&masks, 0, &mut work, &mut current, 0, &mut best);
    best.1
}

fn search(
    masks: &[u8],
    start: usize,
    leftovers: &mut [u8; PALETTE_SIZE],
    current: &mut Vec<u8>,
    covered: u32,
    best: &mut (u32, Vec<u8>),
) {
    if covered > best.0 {
        *best = (covered, current.clone());
    }

    for (i, &mask) in masks.iter().enumerate().skip(start) {
        if !mask_fits(mask, leftovers) {
            continue;
        }
        suits_in(mask).for_each(|suit| leftovers[suit] -= 1);
        current.push(mask);
        search(masks, i, leftovers, current, covered + mask.count_ones(), best);
        current.pop();
        suits_in(mask).for_each(|suit| leftovers[suit] += 1);
    }
}

/// Points for the groups formable from tiles of face value `value` that runs
/// did not take: `value × size` per group
pub fn group_score(value: u8, leftovers: &[u8; PALETTE_SIZE], suit_count: usize) -> u32 {
    // Fewer than three suits with tiles left can never form a group
    let present = leftovers.iter().take(suit_count).filter(|&&n| n > 0).count();
    if (present as u32) < MIN_GROUP_SIZE {
        return 0;
    }

    find_groups(leftovers, suit_count)
        .iter()
        .map(|mask| value as u32 * mask.count_ones())
        .sum()
}
