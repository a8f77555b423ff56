use crate::domain::error::DomainError;

/// Raw output of a corpus scan, before the store applies its dimension rule.
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub vectors: Vec<Vec<f32>>,
    pub identifiers: Vec<String>,
    /// Items the loader could not read or parse.
    pub skipped: usize,
}

impl LoadedCorpus {
    pub fn push(&mut self, identifier: String, vector: Vec<f32>) {
        self.identifiers.push(identifier);
        self.vectors.push(vector);
    }

    /// Length of the first item seen, which the store will adopt.
    pub fn expected_dimension(&self) -> Option<usize> {
        self.vectors.iter().map(Vec::len).find(|len| *len > 0)
    }
}

pub trait CorpusLoader: Send + Sync {
    fn load(&self) -> Result<LoadedCorpus, DomainError>;
}
