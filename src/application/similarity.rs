//! Exhaustive top-K ranking over an [`EmbeddingStore`].
//!
//! Every row is scored against the query, then a bounded heap keeps the K
//! best. The heap's top is always the worst kept candidate, so a better row
//! evicts it in `O(log K)`. Ties on score fall back to row index, which
//! makes the heap's output identical to a stable full sort cut at K.

use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::entities::query_result::{Match, QueryResult};
use crate::domain::error::DomainError;
use crate::domain::values::metric::Metric;
use crate::domain::values::top_k::TopK;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Below this many scalar multiply-adds, scoring stays on the calling thread.
const PARALLEL_WORK_THRESHOLD: usize = 1 << 16;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    row: usize,
    score: f32,
    metric: Metric,
}

impl Ord for Candidate {
    // Less means better: best rank first, then lower row index.
    fn cmp(&self, other: &Self) -> Ordering {
        self.metric
            .rank(self.score, other.score)
            .then_with(|| self.row.cmp(&other.row))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Ranks the store against `query` and returns the `k` best matches.
    ///
    /// An empty store answers with no matches. Otherwise the query must have
    /// exactly `store.dimension()` components, all finite.
    pub fn query(
        &self,
        store: &EmbeddingStore,
        query: &[f32],
        k: usize,
        metric: Metric,
    ) -> Result<QueryResult, DomainError> {
        let k = TopK::try_from(k)?;

        if store.is_empty() {
            return Ok(QueryResult::default());
        }
        if query.len() != store.dimension() {
            return Err(DomainError::DimensionMismatch {
                expected: store.dimension(),
                got: query.len(),
            });
        }
        if let Some(pos) = query.iter().position(|x| !x.is_finite()) {
            return Err(DomainError::InvalidArgument(format!(
                "embedding component {pos} is not a finite number"
            )));
        }

        let scores = score_rows(store, query, metric);
        let matches = select_top_k(&scores, k.value(), metric)
            .into_iter()
            .map(|(row, score)| Match {
                identifier: store.identifiers()[row].clone(),
                score,
            })
            .collect();

        Ok(QueryResult { matches })
    }

    /// Same as [`query`](Self::query) with the metric given by name.
    pub fn query_named(
        &self,
        store: &EmbeddingStore,
        query: &[f32],
        k: usize,
        metric: &str,
    ) -> Result<QueryResult, DomainError> {
        TopK::try_from(k)?;
        let metric: Metric = metric.parse().map_err(DomainError::InvalidArgument)?;
        self.query(store, query, k, metric)
    }
}

/// One score per stored row, in row order.
pub fn score_rows(store: &EmbeddingStore, query: &[f32], metric: Metric) -> Vec<f32> {
    let dim = store.dimension();
    if dim == 0 {
        return Vec::new();
    }
    let prepared = metric.prepare_query(query);
    let data = store.as_slice();

    if data.len() >= PARALLEL_WORK_THRESHOLD {
        data.par_chunks_exact(dim)
            .map(|row| metric.score(&prepared, row))
            .collect()
    } else {
        data.chunks_exact(dim)
            .map(|row| metric.score(&prepared, row))
            .collect()
    }
}

/// Picks the `k` best `(row, score)` pairs, best first.
pub fn select_top_k(scores: &[f32], k: usize, metric: Metric) -> Vec<(usize, f32)> {
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k.min(scores.len()) + 1);

    for (row, &score) in scores.iter().enumerate() {
        let candidate = Candidate { row, score, metric };
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|c| (c.row, c.score))
        .collect()
}
