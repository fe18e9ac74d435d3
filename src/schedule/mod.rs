use crate::domain::Pair;

/// One scheduled meeting. `index` is the permanent address of its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub index: usize,
    pub first_slot: usize,
    pub second_slot: usize,
    pub first: &'a Pair,
    pub second: &'a Pair,
}

pub fn match_count(group_size: usize) -> usize {
    group_size * group_size.saturating_sub(1) / 2
}

/// Every `(i, j)` slot pair with `i < j`, in the fixed addressing order
pub fn slot_pairs(group_size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..group_size).flat_map(move |i| (i + 1..group_size).map(move |j| (i, j)))
}

/// Round-robin schedule of a group. Depends only on the group's order.
pub fn schedule(group: &[Pair]) -> Vec<Match<'_>> {
    slot_pairs(group.len())
        .enumerate()
        .map(|(index, (i, j))| Match {
            index,
            first_slot: i,
            second_slot: j,
            first: &group[i],
            second: &group[j],
        })
        .collect()
}
