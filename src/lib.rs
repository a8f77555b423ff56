pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::load_corpus::{LoadCorpusUseCase, LoadReport};
use crate::application::search::SearchUseCase;
use crate::application::stats::{Sample, StatsUseCase, StoreStats};
use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::entities::query_result::QueryResult;
use crate::domain::error::DomainError;
use crate::domain::ports::corpus_loader::CorpusLoader;
use crate::domain::values::metric::Metric;
use crate::domain::values::top_k::TopK;
use crate::infrastructure::corpus::json_dir::JsonDirLoader;
use crate::infrastructure::http::server::{self, AppState, QueryDefaults};
use axum::Router;
use std::path::Path;
use std::sync::Arc;

/// A loaded corpus with its search and stats use cases wired up.
pub struct EmbedServe {
    store: Arc<EmbeddingStore>,
    search_uc: Arc<SearchUseCase>,
    stats_uc: Arc<StatsUseCase>,
}

impl EmbedServe {
    /// Loads every `*.json` embedding under `corpus_dir`.
    pub fn open(corpus_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::with_loader(Arc::new(JsonDirLoader::new(corpus_dir.as_ref())))
    }

    pub fn with_loader(loader: Arc<dyn CorpusLoader>) -> Result<Self, DomainError> {
        let (store, report) = LoadCorpusUseCase::new(loader).execute()?;
        Ok(Self::from_store(store, report))
    }

    pub fn from_store(store: EmbeddingStore, report: LoadReport) -> Self {
        // Published once, fully built; every handler only ever reads it.
        let store = Arc::new(store);
        Self {
            search_uc: Arc::new(SearchUseCase::new(store.clone())),
            stats_uc: Arc::new(StatsUseCase::new(store.clone(), report)),
            store,
        }
    }

    // Delegating methods
    pub fn search(&self, vector: &[f32], topk: i64, mode: &str) -> Result<QueryResult, DomainError> {
        self.search_uc.search(vector, topk, mode)
    }

    pub fn search_with(&self, vector: &[f32], k: TopK, metric: Metric) -> Result<QueryResult, DomainError> {
        self.search_uc.search_with(vector, k, metric)
    }

    pub fn stats(&self) -> StoreStats {
        self.stats_uc.stats()
    }

    pub fn samples(&self, count: usize, width: usize) -> Vec<Sample> {
        self.stats_uc.samples(count, width)
    }

    pub fn store(&self) -> &Arc<EmbeddingStore> {
        &self.store
    }

    pub fn router(&self, defaults: QueryDefaults) -> Router {
        server::router(AppState {
            search: self.search_uc.clone(),
            stats: self.stats_uc.clone(),
            defaults,
        })
    }
}
