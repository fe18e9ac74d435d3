use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::StandingsSettings;
use crate::domain::{MatchResult, Outcome, Pair};

pub type PairKey = String;

/// Points scored and conceded against one specific opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectRecord {
    pub scored: u64,
    pub conceded: u64,
}

impl DirectRecord {
    pub fn is_net_positive(&self) -> bool {
        self.scored > self.conceded
    }
}

/// A pair's group-stage record. Built fresh on every standings computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairStanding {
    pub pair: Pair,
    pub key: PairKey,
    pub points: u32,
    pub total_scored: u64,
    pub total_conceded: u64,
    pub matches_won: u32,
    pub matches_drawn: u32,
    pub matches_played: u32,
    pub direct_matches: BTreeMap<PairKey, DirectRecord>,
}

impl PairStanding {
    pub fn new(pair: &Pair) -> Self {
        Self {
            key: pair.key(),
            pair: pair.clone(),
            points: 0,
            total_scored: 0,
            total_conceded: 0,
            matches_won: 0,
            matches_drawn: 0,
            matches_played: 0,
            direct_matches: BTreeMap::new(),
        }
    }

    /// Returns this record with one more match against `opponent` folded in.
    /// `result` is from this pair's point of view.
    pub fn with_result(mut self, opponent: &str, result: MatchResult, settings: &StandingsSettings) -> Self {
        self.matches_played += 1;
        self.total_scored += u64::from(result.score_a);
        self.total_conceded += u64::from(result.score_b);

        let direct = self.direct_matches.entry(opponent.to_string()).or_default();
        direct.scored += u64::from(result.score_a);
        direct.conceded += u64::from(result.score_b);

        match result.outcome() {
            Outcome::Win => {
                self.points += settings.win_points;
                self.matches_won += 1;
            }
            Outcome::Draw => {
                self.points += settings.draw_points;
                self.matches_drawn += 1;
            }
            Outcome::Loss => self.points += settings.loss_points,
        }
        self
    }

    pub fn differential(&self) -> i64 {
        // Totals are sums of u32 scores over at most u32::MAX matches, well inside i64
        self.total_scored as i64 - self.total_conceded as i64
    }

    /// Scored per match, with an unplayed pair counted over one match
    pub fn average(&self) -> f64 {
        self.total_scored as f64 / f64::from(self.matches_played.max(1))
    }

    /// Exact comparison of per-match averages, avoiding float equality
    pub fn cmp_average(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.total_scored) * u128::from(other.matches_played.max(1));
        let rhs = u128::from(other.total_scored) * u128::from(self.matches_played.max(1));
        lhs.cmp(&rhs)
    }

    pub fn direct_against(&self, opponent: &str) -> DirectRecord {
        self.direct_matches.get(opponent).copied().unwrap_or_default()
    }

    /// Same points, wins, differential and average: indistinguishable for advancement
    pub fn same_record(&self, other: &Self) -> bool {
        self.points == other.points
            && self.matches_won == other.matches_won
            && self.differential() == other.differential()
            && self.cmp_average(other) == Ordering::Equal
    }
}

/// Ranked table of one group plus its advancing set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStandings {
    pub ranked: Vec<PairStanding>,
    pub advancing_count: usize,
    /// Set when ties pulled extra pairs into the advancing set
    pub tied: bool,
}

impl RankedStandings {
    pub fn advancing(&self) -> &[PairStanding] {
        &self.ranked[..self.advancing_count]
    }

    pub fn advancing_names(&self) -> Vec<String> {
        self.advancing()
            .iter()
            .map(|s| {
                let name = s.pair.display_name();
                if self.tied { format!("{} [TIE]", name) } else { name }
            })
            .collect()
    }
}
