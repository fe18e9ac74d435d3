use anyhow::Result;
use log::{info, warn};
use rand::Rng;

use crate::config::AppConfig;
use crate::domain::{Document, Group, MatchResult, Pair, Player, Tournament, parse_score};
use crate::errors::TournamentError;
use crate::schedule::{Match, match_count, schedule};
use crate::standings::{RankedStandings, tournament_standings};
use crate::store::TournamentStore;
use crate::{grouping, pairing, roster};

/// Which side of a match a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Which roster a player goes on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Primary,
    Partner,
}

/// The first stage whose output a change makes stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Pairs,
    Groups,
}

/// Holds the loaded document and one active tournament. Every mutation is
/// saved through the store before returning.
pub struct TournamentService<S, R> {
    store: S,
    document: Document,
    active: Option<String>,
    config: AppConfig,
    rng: R,
}

impl<S: TournamentStore, R: Rng> TournamentService<S, R> {
    pub fn new(store: S, config: AppConfig, rng: R) -> Result<Self> {
        let document = store.load()?;
        Ok(Self {
            store,
            document,
            active: None,
            config,
            rng,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tournament_names(&self) -> Vec<&str> {
        self.document.keys().map(String::as_str).collect()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn create(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidArgument("tournament name is empty".to_string()).into());
        }
        if self.document.contains_key(name) {
            return Err(TournamentError::DuplicateTournament(name.to_string()).into());
        }

        self.document.insert(name.to_string(), Tournament::default());
        self.active = Some(name.to_string());
        info!("Created tournament '{}'", name);
        self.persist()
    }

    pub fn activate(&mut self, name: &str) -> Result<&Tournament> {
        if !self.document.contains_key(name) {
            return Err(TournamentError::UnknownTournament(name.to_string()).into());
        }
        self.active = Some(name.to_string());
        self.active()
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        if self.document.remove(name).is_none() {
            return Err(TournamentError::UnknownTournament(name.to_string()).into());
        }
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        info!("Deleted tournament '{}'", name);
        self.persist()
    }

    pub fn active(&self) -> Result<&Tournament> {
        let name = self.active.as_ref().ok_or(TournamentError::NoActiveTournament)?;
        self.document
            .get(name)
            .ok_or_else(|| TournamentError::UnknownTournament(name.clone()).into())
    }

    // --- Roster ---

    pub fn add_player(&mut self, name: &str, skill: i64, kind: RosterKind, force: bool) -> Result<Player> {
        let player = roster::validate_player(name, skill)?;
        self.add_players(vec![player.clone()], kind, force)?;
        Ok(player)
    }

    /// Adds a delimited list of names at the default skill
    pub fn add_bulk(&mut self, list: &str, kind: RosterKind, force: bool) -> Result<Vec<Player>> {
        let players = roster::parse_bulk(list, &self.config.pairing)?;
        if players.is_empty() {
            return Err(TournamentError::InvalidArgument("no names in list".to_string()).into());
        }
        self.add_players(players.clone(), kind, force)?;
        Ok(players)
    }

    pub fn set_skill(&mut self, name: &str, skill: i64, force: bool) -> Result<()> {
        let tournament = self.active_mut()?;
        check_invalidation(tournament, force)?;
        let on_primary = tournament.players.iter().any(|p| p.name == name);
        let list = if on_primary {
            &mut tournament.players
        } else {
            &mut tournament.partners
        };
        roster::set_skill(list, name, skill)?;
        invalidate(tournament, Stage::Pairs);

        info!("Set skill of '{}' to {}", name, skill);
        self.persist()
    }

    pub fn remove_player(&mut self, name: &str, force: bool) -> Result<Player> {
        let tournament = self.active_mut()?;
        // Check first so a refused change leaves the roster untouched
        check_invalidation(tournament, force)?;
        let removed = roster::remove_player(&mut tournament.players, name)
            .or_else(|_| roster::remove_player(&mut tournament.partners, name))?;
        invalidate(tournament, Stage::Pairs);

        info!("Removed player '{}'", name);
        self.persist()?;
        Ok(removed)
    }

    fn add_players(&mut self, players: Vec<Player>, kind: RosterKind, force: bool) -> Result<()> {
        let tournament = self.active_mut()?;
        check_invalidation(tournament, force)?;
        roster::ensure_unique(tournament.players.iter().chain(tournament.partners.iter()), &players)?;

        let count = players.len();
        match kind {
            RosterKind::Primary => tournament.players.extend(players),
            RosterKind::Partner => tournament.partners.extend(players),
        }
        invalidate(tournament, Stage::Pairs);

        info!("Added {} players ({:?} roster)", count, kind);
        self.persist()
    }

    // --- Pairing and grouping ---

    /// Re-pairs the roster, discarding groups and scores built on old pairs
    pub fn generate_pairs(&mut self, force: bool) -> Result<&[Pair]> {
        let rng = &mut self.rng;
        let name = self.active.as_ref().ok_or(TournamentError::NoActiveTournament)?;
        let tournament = self
            .document
            .get_mut(name)
            .ok_or_else(|| TournamentError::UnknownTournament(name.clone()))?;
        check_invalidation(tournament, force)?;

        let pairs = if tournament.partners.is_empty() {
            pairing::pair_players(&tournament.players, rng)
        } else {
            pairing::pair_rosters(&tournament.players, &tournament.partners, rng)
        };
        invalidate(tournament, Stage::Pairs);
        tournament.pairs = pairs;

        info!("Generated {} pairs", tournament.pairs.len());
        self.persist()?;
        Ok(self.active()?.pairs.as_slice())
    }

    /// Replaces the pairs with manually entered ones
    pub fn manual_pairs(&mut self, input: &str, force: bool) -> Result<&[Pair]> {
        let pairs = pairing::parse_manual_pairs(input, &self.config.pairing)?;
        let tournament = self.active_mut()?;
        check_invalidation(tournament, force)?;
        invalidate(tournament, Stage::Pairs);
        tournament.pairs = pairs;

        info!("Entered {} pairs manually", tournament.pairs.len());
        self.persist()?;
        Ok(self.active()?.pairs.as_slice())
    }

    /// Deals the current pairs into groups, discarding existing scores
    pub fn create_groups(&mut self, num_groups: usize, force: bool) -> Result<&[Group]> {
        let rng = &mut self.rng;
        let name = self.active.as_ref().ok_or(TournamentError::NoActiveTournament)?;
        let tournament = self
            .document
            .get_mut(name)
            .ok_or_else(|| TournamentError::UnknownTournament(name.clone()))?;
        if tournament.pairs.is_empty() {
            return Err(TournamentError::NotPaired.into());
        }
        check_invalidation(tournament, force)?;

        let groups = grouping::assign_groups(&tournament.pairs, num_groups, rng)?;
        invalidate(tournament, Stage::Groups);
        tournament.groups = groups;

        info!("Created {} groups", num_groups);
        self.persist()?;
        Ok(self.active()?.groups.as_slice())
    }

    // --- Matches and scores ---

    /// Schedule of every group, in group order
    pub fn matches(&self) -> Result<Vec<Vec<Match<'_>>>> {
        let tournament = self.active()?;
        if tournament.groups.is_empty() {
            return Err(TournamentError::NotGrouped.into());
        }
        Ok(tournament.groups.iter().map(|g| schedule(g)).collect())
    }

    pub fn record_score(&mut self, group_index: usize, match_index: usize, result: MatchResult) -> Result<MatchResult> {
        let tournament = self.active_mut()?;
        check_match_address(tournament, group_index, match_index)?;

        let scores = tournament.scores.entry(group_index).or_default();
        if scores.len() <= match_index {
            scores.resize(match_index + 1, None);
        }
        scores[match_index] = Some(result);

        info!(
            "Group {} match {}: {}-{}",
            group_index + 1,
            match_index + 1,
            result.score_a,
            result.score_b
        );
        self.persist()?;
        Ok(result)
    }

    /// Updates one side from raw input, keeping the other side's current score
    pub fn record_side(&mut self, group_index: usize, match_index: usize, side: Side, raw: &str) -> Result<MatchResult> {
        let current = self.active()?.result(group_index, match_index);
        let score = parse_score(raw);
        let result = match side {
            Side::A => MatchResult::new(score, current.score_b),
            Side::B => MatchResult::new(current.score_a, score),
        };
        self.record_score(group_index, match_index, result)
    }

    pub fn standings(&self) -> Result<Vec<RankedStandings>> {
        let tournament = self.active()?;
        if tournament.groups.is_empty() {
            return Err(TournamentError::NotGrouped.into());
        }
        Ok(tournament_standings(tournament, &self.config.standings))
    }

    fn active_mut(&mut self) -> Result<&mut Tournament> {
        let name = self.active.as_ref().ok_or(TournamentError::NoActiveTournament)?;
        self.document
            .get_mut(name)
            .ok_or_else(|| TournamentError::UnknownTournament(name.clone()).into())
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.document)
    }
}

fn check_match_address(tournament: &Tournament, group_index: usize, match_index: usize) -> Result<(), TournamentError> {
    let group = tournament.groups.get(group_index).ok_or_else(|| {
        TournamentError::InvalidArgument(format!(
            "group {} does not exist ({} groups)",
            group_index + 1,
            tournament.groups.len()
        ))
    })?;

    let count = match_count(group.len());
    if match_index >= count {
        return Err(TournamentError::InvalidArgument(format!(
            "match {} does not exist in group {} ({} matches)",
            match_index + 1,
            group_index + 1,
            count
        )));
    }
    Ok(())
}

/// Scores address matches by group order, so nothing upstream of them may
/// change once one exists unless the caller agrees to lose them.
fn check_invalidation(tournament: &Tournament, force: bool) -> Result<(), TournamentError> {
    if tournament.has_scores() && !force {
        return Err(TournamentError::ScoringStarted);
    }
    Ok(())
}

/// Clears `stage` and everything downstream of it
fn invalidate(tournament: &mut Tournament, stage: Stage) {
    if stage <= Stage::Pairs && !tournament.pairs.is_empty() {
        warn!("Discarding {} pairs", tournament.pairs.len());
        tournament.pairs.clear();
    }
    if !tournament.groups.is_empty() {
        warn!("Discarding {} groups", tournament.groups.len());
        tournament.groups.clear();
    }
    if tournament.has_scores() {
        warn!("Discarding recorded scores");
    }
    tournament.scores.clear();
}
