use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{Group, Pair};
use crate::errors::TournamentError;

/// Shuffles the pairs and deals them into `num_groups` groups round-robin.
/// Group sizes differ by at most one.
pub fn assign_groups<R: Rng + ?Sized>(
    pairs: &[Pair],
    num_groups: usize,
    rng: &mut R,
) -> Result<Vec<Group>, TournamentError> {
    if num_groups < 1 || num_groups > pairs.len() {
        return Err(TournamentError::InvalidArgument(format!(
            "number of groups must be between 1 and {}, got {}",
            pairs.len(),
            num_groups
        )));
    }

    let mut shuffled = pairs.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Vec<Group> = vec![Vec::new(); num_groups];
    for (index, pair) in shuffled.into_iter().enumerate() {
        groups[index % num_groups].push(pair);
    }

    debug!("Dealt {} pairs into {} groups", pairs.len(), num_groups);
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Player;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pairs(n: usize) -> Vec<Pair> {
        (0..n)
            .map(|i| Pair::new(Player::new(format!("A{}", i), 3), Player::new(format!("B{}", i), 7)))
            .collect()
    }

    #[test]
    fn test_groups_partition_pairs() {
        let mut rng = StdRng::seed_from_u64(2);
        let input = pairs(11);

        for g in 1..=11 {
            let groups = assign_groups(&input, g, &mut rng).unwrap();

            assert_eq!(groups.len(), g);
            let mut keys: Vec<String> = groups.iter().flatten().map(Pair::key).collect();
            let mut expected: Vec<String> = input.iter().map(Pair::key).collect();
            keys.sort();
            expected.sort();
            assert_eq!(keys, expected);

            for group in &groups {
                assert!(group.len() == 11 / g || group.len() == 11_usize.div_ceil(g));
            }
        }
    }

    #[test]
    fn test_group_count_out_of_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let input = pairs(4);

        assert!(matches!(
            assign_groups(&input, 0, &mut rng),
            Err(TournamentError::InvalidArgument(_))
        ));
        assert!(matches!(
            assign_groups(&input, 5, &mut rng),
            Err(TournamentError::InvalidArgument(_))
        ));
        assert!(assign_groups(&[], 1, &mut rng).is_err());
    }

    #[test]
    fn test_rerun_reshuffles() {
        let mut rng = StdRng::seed_from_u64(8);
        let input = pairs(10);

        let first = assign_groups(&input, 2, &mut rng).unwrap();
        let reruns: Vec<Vec<Group>> = (0..10)
            .map(|_| assign_groups(&input, 2, &mut rng).unwrap())
            .collect();

        assert!(reruns.iter().any(|r| *r != first));
    }
}
