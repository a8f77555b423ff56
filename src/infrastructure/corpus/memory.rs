use crate::domain::error::DomainError;
use crate::domain::ports::corpus_loader::{CorpusLoader, LoadedCorpus};

/// Serves a fixed list of embeddings. Useful for tests and for embedding
/// the engine in a process that already holds its vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    entries: Vec<(String, Vec<f32>)>,
}

impl InMemoryLoader {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        }
    }
}

impl CorpusLoader for InMemoryLoader {
    fn load(&self) -> Result<LoadedCorpus, DomainError> {
        let mut corpus = LoadedCorpus::default();
        for (id, vector) in &self.entries {
            corpus.push(id.clone(), vector.clone());
        }
        Ok(corpus)
    }
}
