use anyhow::Result;

use bt_tournament::cli::Cli;
use bt_tournament::{handle_command, interpret, open_service};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let mut service = open_service(cli)?;
    handle_command(&mut service, cli.tournament.as_deref(), &cli.command)
}
