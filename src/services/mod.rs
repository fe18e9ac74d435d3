pub mod tournament;

pub use tournament::{RosterKind, Side, TournamentService};
