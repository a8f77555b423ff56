use crate::application::similarity::SimilarityEngine;
use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::entities::query_result::QueryResult;
use crate::domain::error::DomainError;
use crate::domain::values::metric::Metric;
use crate::domain::values::top_k::TopK;
use std::sync::Arc;
use tracing::debug;

pub struct SearchUseCase {
    store: Arc<EmbeddingStore>,
    engine: SimilarityEngine,
}

impl SearchUseCase {
    pub fn new(store: Arc<EmbeddingStore>) -> Self {
        Self {
            store,
            engine: SimilarityEngine::new(),
        }
    }

    /// Entry point for callers that hold raw request parameters.
    pub fn search(&self, vector: &[f32], topk: i64, mode: &str) -> Result<QueryResult, DomainError> {
        let k = TopK::new(topk)?;
        let result = self.engine.query_named(&self.store, vector, k.value(), mode)?;
        debug!(k = k.value(), mode, matches = result.len(), "query answered");
        Ok(result)
    }

    pub fn search_with(&self, vector: &[f32], k: TopK, metric: Metric) -> Result<QueryResult, DomainError> {
        let result = self.engine.query(&self.store, vector, k.value(), metric)?;
        debug!(k = k.value(), %metric, matches = result.len(), "query answered");
        Ok(result)
    }
}
