pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod grouping;
pub mod pairing;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod services;
pub mod standings;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::{Cli, Command, PlayerCommand};
use crate::config::settings::AppConfig;
use crate::errors::TournamentError;
use crate::services::{RosterKind, Side, TournamentService};
use crate::store::JsonFileStore;

type Service = TournamentService<JsonFileStore, StdRng>;

/// Score argument that leaves a side unchanged
const KEEP_SCORE: &str = "_";

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

pub fn open_service(cli: &Cli) -> Result<Service> {
    let config = AppConfig::new()
        .with_store_path(cli.store.clone())
        .with_seed(cli.seed);
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!("Using tournament store {}", config.store.path.display());
    let store = JsonFileStore::new(&config.store.path);
    TournamentService::new(store, config, rng)
}

pub fn handle_command(service: &mut Service, tournament: Option<&str>, command: &Command) -> Result<()> {
    match command {
        Command::New { name } => handle_new(service, name),
        Command::List => handle_list(service),
        Command::Delete { name } => handle_delete(service, name),
        Command::Completions { shell } => handle_completions(*shell),
        other => {
            let name = tournament.ok_or(TournamentError::NoActiveTournament)?;
            service.activate(name)?;
            handle_tournament_command(service, other)
        }
    }
}

fn handle_tournament_command(service: &mut Service, command: &Command) -> Result<()> {
    match command {
        Command::Player { action } => handle_player(service, action),
        Command::Players => {
            print!("{}", report::render_players(service.active()?));
            Ok(())
        }
        Command::Pair { force } => {
            let pairs = service.generate_pairs(*force)?;
            print!("{}", report::render_pairs(pairs));
            Ok(())
        }
        Command::PairManual { list, force } => {
            let pairs = service.manual_pairs(list, *force)?;
            print!("{}", report::render_pairs(pairs));
            Ok(())
        }
        Command::Group { count, force } => {
            service.create_groups(*count, *force)?;
            print_matches(service)
        }
        Command::Matches => print_matches(service),
        Command::Score {
            group,
            match_number,
            score_a,
            score_b,
        } => handle_score(service, *group, *match_number, score_a, score_b),
        Command::Standings => {
            print!("{}", report::render_standings(&service.standings()?));
            Ok(())
        }
        Command::New { .. } | Command::List | Command::Delete { .. } | Command::Completions { .. } => {
            unreachable!("handled before a tournament is activated")
        }
    }
}

fn print_matches(service: &Service) -> Result<()> {
    let schedules = service.matches()?;
    print!("{}", report::render_matches(service.active()?, &schedules));
    Ok(())
}

fn handle_new(service: &mut Service, name: &str) -> Result<()> {
    service.create(name)?;
    println!("Created tournament {}", name.trim().bold());
    Ok(())
}

fn handle_list(service: &Service) -> Result<()> {
    let names = service.tournament_names();
    if names.is_empty() {
        println!("No tournaments yet. Create one with `new <name>`.");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn handle_delete(service: &mut Service, name: &str) -> Result<()> {
    service.delete(name)?;
    println!("Deleted tournament {}", name.bold());
    Ok(())
}

fn handle_player(service: &mut Service, action: &PlayerCommand) -> Result<()> {
    match action {
        PlayerCommand::Add {
            name,
            skill,
            partner,
            force,
        } => {
            let player = service.add_player(name, *skill, roster_kind(*partner), *force)?;
            println!("Added {} (skill {})", player.name.bold(), player.skill);
        }
        PlayerCommand::Bulk { list, partner, force } => {
            let players = service.add_bulk(list, roster_kind(*partner), *force)?;
            println!("Added {} players", players.len());
        }
        PlayerCommand::Skill { name, skill, force } => {
            service.set_skill(name, *skill, *force)?;
            println!("{} is now skill {}", name.bold(), skill);
        }
        PlayerCommand::Remove { name, force } => {
            let player = service.remove_player(name, *force)?;
            println!("Removed {}", player.name.bold());
        }
    }
    Ok(())
}

fn handle_score(service: &mut Service, group: usize, match_number: usize, score_a: &str, score_b: &str) -> Result<()> {
    let group_index = to_index(group, "group")?;
    let match_index = to_index(match_number, "match")?;

    let mut result = service.active()?.result(group_index, match_index);
    for (side, raw) in [(Side::A, score_a), (Side::B, score_b)] {
        if raw.trim() != KEEP_SCORE {
            result = service.record_side(group_index, match_index, side, raw)?;
        }
    }

    println!(
        "Group {} match {}: {}",
        group,
        match_number,
        format!("{} - {}", result.score_a, result.score_b).bold()
    );
    Ok(())
}

/// 1-based command line numbers to 0-based indices
fn to_index(number: usize, what: &str) -> Result<usize, TournamentError> {
    number
        .checked_sub(1)
        .ok_or_else(|| TournamentError::InvalidArgument(format!("{} numbers start at 1", what)))
}

fn roster_kind(partner: bool) -> RosterKind {
    if partner {
        RosterKind::Partner
    } else {
        RosterKind::Primary
    }
}
