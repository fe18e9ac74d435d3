use super::types::PairStanding;

/// How many pairs of a ranked table advance, and whether ties extended the set.
///
/// The top `min_advancing` always go through. After that each next pair joins
/// only while its record is identical to the last pair that joined.
pub fn select_advancing(ranked: &[PairStanding], min_advancing: usize) -> (usize, bool) {
    let mut count = min_advancing.min(ranked.len());
    if count == 0 {
        return (0, false);
    }

    while count < ranked.len() && ranked[count].same_record(&ranked[count - 1]) {
        count += 1;
    }

    (count, count > min_advancing)
}
