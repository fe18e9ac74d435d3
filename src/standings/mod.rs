//! Group standings: fold scores into per-pair records, rank, pick who advances.
//!
//! Everything here is recomputed from the group and its scores on each call.

pub mod advancement;
pub mod ranking;
pub mod types;

pub use advancement::select_advancing;
pub use ranking::rank;
pub use types::{DirectRecord, PairKey, PairStanding, RankedStandings};

use log::debug;

use crate::config::StandingsSettings;
use crate::domain::{MatchResult, Pair, Tournament};
use crate::schedule::schedule;

/// Standings of one group. Scores are addressed by schedule match index;
/// a missing score counts as 0-0.
pub fn compute_standings(
    group: &[Pair],
    results: &[Option<MatchResult>],
    settings: &StandingsSettings,
) -> RankedStandings {
    let ranked = rank(tally(group, results, settings));
    let (advancing_count, tied) = select_advancing(&ranked, settings.min_advancing);

    debug!(
        "Group of {} pairs: {} advancing{}",
        group.len(),
        advancing_count,
        if tied { " (tied)" } else { "" }
    );

    RankedStandings {
        ranked,
        advancing_count,
        tied,
    }
}

/// Standings for every group of a tournament, in group order
pub fn tournament_standings(tournament: &Tournament, settings: &StandingsSettings) -> Vec<RankedStandings> {
    tournament
        .groups
        .iter()
        .enumerate()
        .map(|(index, group)| compute_standings(group, tournament.group_scores(index), settings))
        .collect()
}

/// One record per pair, in group order. Pairs are looked up by key, so keys
/// must be unique within the group.
fn tally(group: &[Pair], results: &[Option<MatchResult>], settings: &StandingsSettings) -> Vec<PairStanding> {
    let initial: Vec<PairStanding> = group.iter().map(PairStanding::new).collect();

    schedule(group).iter().fold(initial, |table, scheduled| {
        let result = results.get(scheduled.index).copied().flatten().unwrap_or_default();
        let first_key = scheduled.first.key();
        let second_key = scheduled.second.key();

        table
            .into_iter()
            .map(|standing| {
                if standing.key == first_key {
                    standing.with_result(&second_key, result, settings)
                } else if standing.key == second_key {
                    standing.with_result(&first_key, result.reversed(), settings)
                } else {
                    standing
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Player;

    fn pair(tag: &str) -> Pair {
        Pair::new(Player::new(format!("{}x", tag), 5), Player::new(format!("{}y", tag), 5))
    }

    fn group(tags: &[&str]) -> Vec<Pair> {
        tags.iter().map(|t| pair(t)).collect()
    }

    fn scores(results: &[(u32, u32)]) -> Vec<Option<MatchResult>> {
        results.iter().map(|&(a, b)| Some(MatchResult::new(a, b))).collect()
    }

    fn order(standings: &RankedStandings) -> Vec<String> {
        standings.ranked.iter().map(|s| s.pair.first.name.clone()).collect()
    }

    #[test]
    fn test_three_pair_example() {
        let g = group(&["A", "B", "C"]);
        let results = scores(&[(21, 15), (21, 10), (21, 18)]);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        assert_eq!(order(&standings), vec!["Ax", "Bx", "Cx"]);
        let [a, b, c] = [&standings.ranked[0], &standings.ranked[1], &standings.ranked[2]];
        assert_eq!((a.points, a.differential()), (6, 17));
        assert_eq!((b.points, b.differential()), (3, -3));
        assert_eq!((c.points, c.differential()), (0, -14));
        assert_eq!(a.matches_won, 2);
        assert_eq!(c.matches_played, 2);
        assert_eq!(standings.advancing_count, 2);
        assert!(!standings.tied);
        assert_eq!(standings.advancing_names(), vec!["Ax & Ay", "Bx & By"]);
    }

    #[test]
    fn test_huge_scores_accumulate_without_overflow() {
        let g = group(&["A", "B", "C"]);
        let mut results = scores(&[(4_000_000_000, 0), (4_000_000_000, 0)]);
        results.push(None);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        let a = &standings.ranked[0];
        assert_eq!(a.pair.first.name, "Ax");
        assert_eq!(a.total_scored, 8_000_000_000);
        assert_eq!(a.differential(), 8_000_000_000);
        assert_eq!(a.direct_against("Bx_By").scored, 4_000_000_000);
        let b = &standings.ranked[1];
        assert_eq!(b.differential(), -4_000_000_000);
        assert_eq!(b.matches_drawn, 1);
        assert_eq!(standings.advancing_count, 3);
        assert!(standings.tied);
    }

    #[test]
    fn test_direct_matches_recorded() {
        let g = group(&["A", "B", "C"]);
        let results = scores(&[(21, 15), (21, 10), (21, 18)]);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        let a = &standings.ranked[0];
        assert_eq!(a.direct_against("Bx_By"), DirectRecord { scored: 21, conceded: 15 });
        assert_eq!(a.direct_against("Cx_Cy"), DirectRecord { scored: 21, conceded: 10 });
        let c = &standings.ranked[2];
        assert_eq!(c.direct_against("Ax_Ay"), DirectRecord { scored: 10, conceded: 21 });
    }

    #[test]
    fn test_missing_scores_count_as_draws() {
        let g = group(&["A", "B", "C", "D"]);

        let standings = compute_standings(&g, &[], &StandingsSettings::default());

        assert!(standings.ranked.iter().all(|s| s.points == 3 && s.matches_played == 3));
        assert_eq!(order(&standings), vec!["Ax", "Bx", "Cx", "Dx"]);
        assert_eq!(standings.advancing_count, 4);
        assert!(standings.tied);
        assert!(standings.advancing_names().iter().all(|n| n.ends_with(" [TIE]")));
    }

    #[test]
    fn test_head_to_head_between_two_pairs() {
        // (A,B) (A,C) (A,D) (B,C) (B,D) (C,D)
        let g = group(&["A", "B", "C", "D"]);
        let results = scores(&[(11, 10), (0, 21), (11, 10), (21, 0), (21, 0), (0, 5)]);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        // B has the far better differential but lost to A; D beat C directly
        assert_eq!(order(&standings), vec!["Ax", "Bx", "Dx", "Cx"]);
        assert_eq!(standings.advancing_count, 2);
        assert!(!standings.tied);
    }

    #[test]
    fn test_head_to_head_skipped_for_three_way_tie() {
        // A beats B, B beats C, C beats A
        let g = group(&["A", "B", "C"]);
        let results = scores(&[(11, 10), (10, 15), (21, 0)]);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        assert!(standings.ranked.iter().all(|s| s.points == 3));
        assert_eq!(order(&standings), vec!["Bx", "Ax", "Cx"]);
        assert_eq!(standings.advancing_count, 2);
    }

    #[test]
    fn test_average_breaks_equal_differential() {
        let g = group(&["A", "B", "C"]);
        // B and C both lose to A by 10 and draw each other; C scores more overall
        let results = scores(&[(20, 10), (30, 20), (15, 15)]);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        assert_eq!(order(&standings), vec!["Ax", "Cx", "Bx"]);
        assert_eq!(standings.advancing_count, 2);
    }

    #[test]
    fn test_tie_extends_advancing_set() {
        // (A,B) (A,C) (A,D) (B,C) (B,D) (C,D)
        let g = group(&["A", "B", "C", "D"]);
        let results = scores(&[(21, 0), (21, 0), (21, 0), (10, 10), (10, 10), (12, 12)]);

        let standings = compute_standings(&g, &results, &StandingsSettings::default());

        assert_eq!(order(&standings), vec!["Ax", "Cx", "Dx", "Bx"]);
        assert_eq!(standings.advancing_count, 3);
        assert!(standings.tied);
        assert_eq!(
            standings.advancing_names(),
            vec!["Ax & Ay [TIE]", "Cx & Cy [TIE]", "Dx & Dy [TIE]"]
        );
    }

    #[test]
    fn test_small_groups() {
        let settings = StandingsSettings::default();

        let single = compute_standings(&group(&["A"]), &[], &settings);
        assert_eq!(single.advancing_count, 1);
        assert!(!single.tied);
        assert_eq!(single.ranked[0].matches_played, 0);
        assert_eq!(single.ranked[0].average(), 0.0);

        let empty = compute_standings(&[], &[], &settings);
        assert!(empty.advancing().is_empty());
    }

    #[test]
    fn test_standings_are_idempotent() {
        let g = group(&["A", "B", "C", "D", "E"]);
        let results = vec![
            Some(MatchResult::new(3, 1)),
            None,
            Some(MatchResult::new(2, 2)),
            Some(MatchResult::new(0, 4)),
            None,
            Some(MatchResult::new(5, 5)),
            Some(MatchResult::new(1, 0)),
        ];
        let settings = StandingsSettings::default();

        let first = compute_standings(&g, &results, &settings);
        let second = compute_standings(&g, &results, &settings);

        assert_eq!(first, second);
    }

    #[test]
    fn test_tournament_standings_per_group() {
        let mut tournament = Tournament {
            groups: vec![group(&["A", "B"]), group(&["C", "D"])],
            ..Default::default()
        };
        tournament.scores.insert(1, scores(&[(0, 9)]));

        let all = tournament_standings(&tournament, &StandingsSettings::default());

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].advancing_count, 2);
        assert!(!all[0].tied);
        assert_eq!(order(&all[1]), vec!["Dx", "Cx"]);
    }
}
