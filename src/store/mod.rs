pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use anyhow::Result;

use crate::domain::Document;

/// Persistence boundary: the whole document is read once and written back in
/// full after every mutation. Last write wins.
pub trait TournamentStore {
    /// Returns an empty document when nothing has been saved yet
    fn load(&self) -> Result<Document>;

    fn save(&mut self, document: &Document) -> Result<()>;
}
