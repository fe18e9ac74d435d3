//! Text rendering for the CLI

use colored::Colorize;

use crate::domain::{Pair, Player, Tournament};
use crate::schedule::Match;
use crate::standings::RankedStandings;

pub fn render_players(tournament: &Tournament) -> String {
    let mut report = String::new();
    report.push_str(&format!("{}\n", "Players".bold()));
    push_roster(&mut report, &tournament.players);

    if !tournament.partners.is_empty() {
        report.push_str(&format!("\n{}\n", "Partners".bold()));
        push_roster(&mut report, &tournament.partners);
    }
    report
}

fn push_roster(report: &mut String, players: &[Player]) {
    if players.is_empty() {
        report.push_str("  (none)\n");
    }
    for player in players {
        report.push_str(&format!("  {:<24} skill {:>2}\n", player.name, player.skill));
    }
}

pub fn render_pairs(pairs: &[Pair]) -> String {
    let mut report = String::new();
    report.push_str(&format!("{}\n", "Pairs".bold()));
    for (index, pair) in pairs.iter().enumerate() {
        let line = format!("  {:>2}. {:<40} sum {:>2}", index + 1, pair.display_name(), pair.skill_sum());
        if pair.has_bye() {
            report.push_str(&format!("{}\n", line.dimmed()));
        } else {
            report.push_str(&format!("{}\n", line));
        }
    }
    report
}

/// Every group's schedule with the scores recorded so far
pub fn render_matches(tournament: &Tournament, schedules: &[Vec<Match<'_>>]) -> String {
    let mut report = String::new();

    for (group_index, matches) in schedules.iter().enumerate() {
        report.push_str(&format!("{}\n", format!("Group {}", group_index + 1).bold()));
        let scores = tournament.group_scores(group_index);
        for scheduled in matches {
            let recorded = scores.get(scheduled.index).copied().flatten();
            let result = recorded.unwrap_or_default();
            let score = format!("{:>3} - {:<3}", result.score_a, result.score_b);
            let score = if recorded.is_some() {
                score.normal()
            } else {
                score.dimmed()
            };

            report.push_str(&format!(
                "  {:>2}. {:>30} {} {}\n",
                scheduled.index + 1,
                scheduled.first.display_name(),
                score,
                scheduled.second.display_name()
            ));
        }
        report.push('\n');
    }
    report
}

pub fn render_standings(all: &[RankedStandings]) -> String {
    let mut report = String::new();

    for (group_index, standings) in all.iter().enumerate() {
        report.push_str(&format!("{}\n", format!("Group {}", group_index + 1).bold()));
        report.push_str(&format!(
            "  {:<4} {:<30} {:>4} {:>3} {:>3} {:>3} {:>5} {:>6}\n",
            "#", "Pair", "Pts", "W", "D", "P", "Diff", "Avg"
        ));
        report.push_str(&format!("  {}\n", "-".repeat(64)));

        for (rank, s) in standings.ranked.iter().enumerate() {
            let line = format!(
                "  {:<4} {:<30} {:>4} {:>3} {:>3} {:>3} {:>+5} {:>6.2}",
                rank + 1,
                s.pair.display_name(),
                s.points,
                s.matches_won,
                s.matches_drawn,
                s.matches_played,
                s.differential(),
                s.average()
            );
            if rank < standings.advancing_count {
                report.push_str(&format!("{}\n", line.green()));
            } else {
                report.push_str(&format!("{}\n", line));
            }
        }

        report.push_str(&format!("\n  {}\n", "Advancing".bold()));
        for name in standings.advancing_names() {
            let name = if standings.tied { name.yellow() } else { name.normal() };
            report.push_str(&format!("    {}\n", name));
        }
        report.push('\n');
    }
    report
}
