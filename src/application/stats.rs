use crate::application::load_corpus::LoadReport;
use crate::domain::entities::embedding_store::EmbeddingStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub rows: usize,
    pub dimension: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Identifier and leading components of one row, for startup logs.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub identifier: String,
    pub head: Vec<f32>,
}

pub struct StatsUseCase {
    store: Arc<EmbeddingStore>,
    report: LoadReport,
    loaded_at: DateTime<Utc>,
}

impl StatsUseCase {
    pub fn new(store: Arc<EmbeddingStore>, report: LoadReport) -> Self {
        Self {
            store,
            report,
            loaded_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            rows: self.store.len(),
            dimension: self.store.dimension(),
            skipped: self.report.skipped,
            rejected: self.report.rejected,
            loaded_at: self.loaded_at,
        }
    }

    /// The first `count` rows with at most `width` components each.
    pub fn samples(&self, count: usize, width: usize) -> Vec<Sample> {
        self.store
            .iter()
            .take(count)
            .map(|(id, row)| Sample {
                identifier: id.to_string(),
                head: row.iter().take(width).copied().collect(),
            })
            .collect()
    }
}
