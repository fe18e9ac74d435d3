use std::cmp::Ordering;

use super::types::PairStanding;

/// Orders a group's table best first.
///
/// Points, then head-to-head (only when exactly two pairs of the group share
/// those points), then score differential, then average scored per match.
/// Anything still equal keeps its group order.
pub fn rank(mut table: Vec<PairStanding>) -> Vec<PairStanding> {
    let points: Vec<u32> = table.iter().map(|s| s.points).collect();
    table.sort_by(|a, b| compare(a, b, &points));
    table
}

pub fn compare(a: &PairStanding, b: &PairStanding, group_points: &[u32]) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| head_to_head(a, b, group_points))
        .then_with(|| b.differential().cmp(&a.differential()))
        .then_with(|| b.cmp_average(a))
}

fn head_to_head(a: &PairStanding, b: &PairStanding, group_points: &[u32]) -> Ordering {
    let sharing = group_points.iter().filter(|&&p| p == a.points).count();
    if sharing != 2 {
        return Ordering::Equal;
    }

    if a.direct_against(&b.key).is_net_positive() {
        Ordering::Less
    } else if b.direct_against(&a.key).is_net_positive() {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}
