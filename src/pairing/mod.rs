//! Skill-balanced pair formation
//!
//! Players are ordered by skill with a fresh random tiebreak, then paired from
//! both ends of the ordering toward the middle so that every pair's skill sum
//! stays close to the others.

use log::debug;
use rand::Rng;

use crate::config::PairingSettings;
use crate::domain::{BYE_NAME, Pair, Player};
use crate::errors::TournamentError;
use crate::roster;

/// Pairs a single roster. Yields `ceil(n / 2)` pairs; with an odd count the
/// middle player partners the Bye.
pub fn pair_players<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<Pair> {
    let sorted = sort_by_skill(players, rng);
    let mut pairs = Vec::with_capacity(sorted.len().div_ceil(2));

    let mut low = 0;
    let mut high = sorted.len();
    while high - low >= 2 {
        high -= 1;
        pairs.push(Pair::new(sorted[low].clone(), sorted[high].clone()));
        low += 1;
    }
    if low < high {
        pairs.push(Pair::with_bye(sorted[low].clone()));
    }

    debug!("Formed {} pairs from {} players", pairs.len(), players.len());
    pairs
}

/// Pairs across two rosters: the weakest of `primary` with the strongest of
/// `secondary`, moving inward. Whoever is left on the longer side gets a Bye.
pub fn pair_rosters<R: Rng + ?Sized>(primary: &[Player], secondary: &[Player], rng: &mut R) -> Vec<Pair> {
    let primary = sort_by_skill(primary, rng);
    let mut secondary = sort_by_skill(secondary, rng);
    secondary.reverse();

    let matched = primary.len().min(secondary.len());
    let mut pairs: Vec<Pair> = primary
        .iter()
        .zip(secondary.iter())
        .map(|(a, b)| Pair::new(a.clone(), b.clone()))
        .collect();

    pairs.extend(
        primary[matched..]
            .iter()
            .chain(secondary[matched..].iter())
            .cloned()
            .map(Pair::with_bye),
    );

    debug!(
        "Formed {} cross-roster pairs ({} matched)",
        pairs.len(),
        matched
    );
    pairs
}

/// Builds pairs from explicit name pairs; manual players get the default skill
pub fn pair_manual(names: &[(String, String)], settings: &PairingSettings) -> Result<Vec<Pair>, TournamentError> {
    let pairs = names
        .iter()
        .map(|(first, second)| {
            let pair = Pair::new(manual_player(first, settings)?, manual_player(second, settings)?);
            if pair.first.is_bye() && pair.second.is_bye() {
                return Err(TournamentError::InvalidArgument(format!(
                    "pair '{}{}{}' has no player",
                    first, settings.pair_separator, second
                )));
            }
            Ok(pair)
        })
        .collect::<Result<Vec<_>, TournamentError>>()?;

    let players: Vec<Player> = pairs
        .iter()
        .flat_map(|p| p.members())
        .filter(|p| !p.is_bye())
        .cloned()
        .collect();
    // Unique names plus at most one Bye per pair keep pair keys unique
    roster::ensure_unique(std::iter::empty(), &players)?;

    Ok(pairs)
}

/// Parses `"Ana/Rui, Bia/Caio"` style input. Every token must hold exactly one
/// pair separator with a name on each side.
pub fn parse_manual_pairs(input: &str, settings: &PairingSettings) -> Result<Vec<Pair>, TournamentError> {
    let names = input
        .split(settings.list_separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| split_pair_token(token, settings.pair_separator))
        .collect::<Result<Vec<_>, TournamentError>>()?;

    pair_manual(&names, settings)
}

fn split_pair_token(token: &str, separator: char) -> Result<(String, String), TournamentError> {
    let malformed = || TournamentError::MalformedPairToken {
        token: token.to_string(),
        separator,
    };

    let (first, second) = token.split_once(separator).ok_or_else(malformed)?;
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() || second.contains(separator) {
        return Err(malformed());
    }
    Ok((first.to_string(), second.to_string()))
}

fn manual_player(name: &str, settings: &PairingSettings) -> Result<Player, TournamentError> {
    if name.trim() == BYE_NAME {
        return Ok(Player::bye());
    }
    roster::validate_player(name, i64::from(settings.default_skill))
}

/// Ascending by skill; equal skills shuffled by a tiebreak drawn per call
fn sort_by_skill<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<Player> {
    let mut with_tiebreak: Vec<(&Player, f64)> = players.iter().map(|p| (p, rng.r#gen::<f64>())).collect();
    with_tiebreak.sort_by(|(a, ta), (b, tb)| a.skill.cmp(&b.skill).then(ta.total_cmp(tb)));
    with_tiebreak.into_iter().map(|(p, _)| p.clone()).collect()
}
