use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::error::DomainError;
use crate::domain::ports::corpus_loader::CorpusLoader;
use std::sync::Arc;
use tracing::{info, warn};

/// Counters from one corpus load, kept for the stats endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
    pub rejected: usize,
}

pub struct LoadCorpusUseCase {
    loader: Arc<dyn CorpusLoader>,
}

impl LoadCorpusUseCase {
    pub fn new(loader: Arc<dyn CorpusLoader>) -> Self {
        Self { loader }
    }

    pub fn execute(&self) -> Result<(EmbeddingStore, LoadReport), DomainError> {
        let corpus = self.loader.load()?;
        let skipped = corpus.skipped;
        if let Some(dim) = corpus.expected_dimension() {
            info!(dimension = dim, items = corpus.vectors.len(), "corpus scanned");
        }

        let store = EmbeddingStore::build(corpus.vectors, corpus.identifiers)?;
        for id in store.rejected() {
            warn!(
                identifier = %id,
                expected = store.dimension(),
                "embedding length disagrees with corpus dimension, excluded"
            );
        }

        let report = LoadReport {
            loaded: store.len(),
            skipped,
            rejected: store.rejected().len(),
        };
        info!(
            loaded = report.loaded,
            skipped = report.skipped,
            rejected = report.rejected,
            dimension = store.dimension(),
            "Loaded {} embeddings",
            report.loaded
        );
        Ok((store, report))
    }
}
