//! Roster boundary: everything that reaches the pairing engine passes through here

use crate::config::PairingSettings;
use crate::domain::{BYE_NAME, MAX_SKILL, MIN_SKILL, Player};
use crate::errors::TournamentError;

pub fn validate_skill(skill: i64) -> Result<u8, TournamentError> {
    if (i64::from(MIN_SKILL)..=i64::from(MAX_SKILL)).contains(&skill) {
        Ok(skill as u8)
    } else {
        Err(TournamentError::InvalidPlayer(format!(
            "skill {} is outside {}..={}",
            skill, MIN_SKILL, MAX_SKILL
        )))
    }
}

pub fn validate_name(name: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidPlayer("name is empty".to_string()));
    }
    if trimmed == BYE_NAME {
        return Err(TournamentError::InvalidPlayer(format!(
            "'{}' is reserved for the placeholder partner",
            BYE_NAME
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_player(name: &str, skill: i64) -> Result<Player, TournamentError> {
    Ok(Player::new(validate_name(name)?, validate_skill(skill)?))
}

/// Splits a delimited list into default-skill players, dropping empty entries
pub fn parse_bulk(list: &str, settings: &PairingSettings) -> Result<Vec<Player>, TournamentError> {
    list.split(settings.list_separator)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| validate_player(name, i64::from(settings.default_skill)))
        .collect()
}

/// Names already taken across every roster of a tournament
pub fn ensure_unique<'a>(
    existing: impl IntoIterator<Item = &'a Player>,
    incoming: &[Player],
) -> Result<(), TournamentError> {
    let mut seen: Vec<&str> = existing.into_iter().map(|p| p.name.as_str()).collect();
    for player in incoming {
        if seen.contains(&player.name.as_str()) {
            return Err(TournamentError::DuplicatePlayer(player.name.clone()));
        }
        seen.push(&player.name);
    }
    Ok(())
}

pub fn set_skill(roster: &mut [Player], name: &str, skill: i64) -> Result<(), TournamentError> {
    let skill = validate_skill(skill)?;
    let player = roster
        .iter_mut()
        .find(|p| p.name == name)
        .ok_or_else(|| TournamentError::UnknownPlayer(name.to_string()))?;
    player.skill = skill;
    Ok(())
}

pub fn remove_player(roster: &mut Vec<Player>, name: &str) -> Result<Player, TournamentError> {
    let position = roster
        .iter()
        .position(|p| p.name == name)
        .ok_or_else(|| TournamentError::UnknownPlayer(name.to_string()))?;
    Ok(roster.remove(position))
}
