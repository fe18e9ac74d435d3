use anyhow::Result;

use super::TournamentStore;
use crate::domain::Document;

/// Store kept in memory; counts saves so callers can check write behaviour
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Document,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self { document, saves: 0 }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl TournamentStore for InMemoryStore {
    fn load(&self) -> Result<Document> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        self.document = document.clone();
        self.saves += 1;
        Ok(())
    }
}
