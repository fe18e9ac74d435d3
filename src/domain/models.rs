use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the synthetic partner handed to an unpaired player
pub const BYE_NAME: &str = "Bye";

/// Joins the sorted member names of a pair into its canonical key
pub const KEY_SEPARATOR: &str = "_";

pub const MIN_SKILL: u8 = 1;
pub const MAX_SKILL: u8 = 10;

/// Roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub skill: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, skill: u8) -> Self {
        Self {
            name: name.into(),
            skill,
        }
    }

    /// Placeholder partner, always skill 0
    pub fn bye() -> Self {
        Self::new(BYE_NAME, 0)
    }

    pub fn is_bye(&self) -> bool {
        self.skill == 0 && self.name == BYE_NAME
    }
}

/// Two players, kept in the order they were formed.
/// Persisted as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[Player; 2]", into = "[Player; 2]")]
pub struct Pair {
    pub first: Player,
    pub second: Player,
}

impl Pair {
    pub fn new(first: Player, second: Player) -> Self {
        Self { first, second }
    }

    pub fn with_bye(player: Player) -> Self {
        Self::new(player, Player::bye())
    }

    pub fn members(&self) -> [&Player; 2] {
        [&self.first, &self.second]
    }

    /// Canonical identity: member names sorted and joined
    pub fn key(&self) -> String {
        let mut names = [self.first.name.as_str(), self.second.name.as_str()];
        names.sort_unstable();
        names.join(KEY_SEPARATOR)
    }

    pub fn skill_sum(&self) -> u32 {
        u32::from(self.first.skill) + u32::from(self.second.skill)
    }

    pub fn has_bye(&self) -> bool {
        self.first.is_bye() || self.second.is_bye()
    }

    pub fn display_name(&self) -> String {
        format!("{} & {}", self.first.name, self.second.name)
    }
}

impl From<[Player; 2]> for Pair {
    fn from([first, second]: [Player; 2]) -> Self {
        Self::new(first, second)
    }
}

impl From<Pair> for [Player; 2] {
    fn from(pair: Pair) -> Self {
        [pair.first, pair.second]
    }
}

/// Pairs in a fixed order; the order addresses the stored scores
pub type Group = Vec<Pair>;

/// Coerces raw score input: anything that is not a non-negative integer is 0
pub fn parse_score(raw: &str) -> u32 {
    raw.trim().parse::<i64>().map_or(0, clamp_score)
}

fn clamp_score(score: i64) -> u32 {
    u32::try_from(score.max(0)).unwrap_or(u32::MAX)
}

/// Stored scores get the same coercion as typed ones, so a stray `-3`,
/// `null` or `"7"` in a hand-edited document does not fail the load.
fn coerce_score(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_i64().map_or(0, clamp_score),
        Value::String(raw) => parse_score(raw),
        _ => 0,
    }
}

/// Recorded score of one scheduled match. Persisted as `[scoreA, scoreB]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[Value; 2]", into = "[u32; 2]")]
pub struct MatchResult {
    pub score_a: u32,
    pub score_b: u32,
}

impl MatchResult {
    pub fn new(score_a: u32, score_b: u32) -> Self {
        Self { score_a, score_b }
    }

    /// Score from the other side's point of view
    pub fn reversed(self) -> Self {
        Self::new(self.score_b, self.score_a)
    }

    pub fn outcome(self) -> Outcome {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl From<[Value; 2]> for MatchResult {
    fn from([score_a, score_b]: [Value; 2]) -> Self {
        Self::new(coerce_score(&score_a), coerce_score(&score_b))
    }
}

impl From<MatchResult> for [u32; 2] {
    fn from(result: MatchResult) -> Self {
        [result.score_a, result.score_b]
    }
}

/// Match outcome from the first side's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Scores of one group, indexed by match index. Missing entries count as 0-0.
pub type GroupScores = Vec<Option<MatchResult>>;

/// Root persisted aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(default)]
    pub players: Vec<Player>,
    /// Optional second roster for cross-list pairing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partners: Vec<Player>,
    #[serde(default)]
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub scores: BTreeMap<usize, GroupScores>,
}

impl Tournament {
    pub fn group_scores(&self, group_index: usize) -> &[Option<MatchResult>] {
        self.scores
            .get(&group_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn result(&self, group_index: usize, match_index: usize) -> MatchResult {
        self.group_scores(group_index)
            .get(match_index)
            .copied()
            .flatten()
            .unwrap_or_default()
    }

    pub fn has_scores(&self) -> bool {
        self.scores
            .values()
            .any(|results| results.iter().any(Option::is_some))
    }

    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .chain(self.partners.iter())
            .find(|p| p.name == name)
    }
}

/// Every tournament keyed by name
pub type Document = BTreeMap<String, Tournament>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        let ab = Pair::new(Player::new("Bruno", 4), Player::new("Ana", 7));
        let ba = Pair::new(Player::new("Ana", 7), Player::new("Bruno", 4));

        assert_eq!(ab.key(), "Ana_Bruno");
        assert_eq!(ab.key(), ba.key());
        assert_eq!(ab.display_name(), "Bruno & Ana");
    }

    #[test]
    fn test_tournament_json_shape() {
        let pair = Pair::new(Player::new("Ana", 7), Player::bye());
        let mut tournament = Tournament {
            players: vec![Player::new("Ana", 7)],
            pairs: vec![pair.clone()],
            groups: vec![vec![pair]],
            ..Default::default()
        };
        tournament
            .scores
            .insert(0, vec![None, Some(MatchResult::new(21, 15))]);

        let json = serde_json::to_value(&tournament).unwrap();

        assert_eq!(json["pairs"][0][1]["name"], "Bye");
        assert_eq!(json["pairs"][0][1]["skill"], 0);
        assert_eq!(json["scores"]["0"][0], serde_json::Value::Null);
        assert_eq!(json["scores"]["0"][1], serde_json::json!([21, 15]));
        assert!(json.get("partners").is_none());

        let back: Tournament = serde_json::from_str(&json.to_string()).unwrap();
        assert_eq!(back, tournament);
    }

    #[test]
    fn test_parse_score_coerces() {
        assert_eq!(parse_score("21"), 21);
        assert_eq!(parse_score(" 7 "), 7);
        assert_eq!(parse_score("-4"), 0);
        assert_eq!(parse_score("3.5"), 0);
        assert_eq!(parse_score("abc"), 0);
        assert_eq!(parse_score(""), 0);
        assert_eq!(parse_score("5000000000"), u32::MAX);
    }

    #[test]
    fn test_stored_scores_are_coerced_on_load() {
        let json = r#"{"scores": {"0": [[21, -3], [null, 5], ["7", 2.5], null, [true, {}]]}}"#;

        let tournament: Tournament = serde_json::from_str(json).unwrap();

        assert_eq!(
            tournament.scores[&0],
            vec![
                Some(MatchResult::new(21, 0)),
                Some(MatchResult::new(0, 5)),
                Some(MatchResult::new(7, 0)),
                None,
                Some(MatchResult::new(0, 0)),
            ]
        );
    }

    #[test]
    fn test_missing_result_defaults_to_nil_nil() {
        let mut tournament = Tournament::default();
        tournament.scores.insert(1, vec![None]);

        assert_eq!(tournament.result(1, 0), MatchResult::default());
        assert_eq!(tournament.result(3, 7), MatchResult::default());
        assert!(!tournament.has_scores());
    }
}
