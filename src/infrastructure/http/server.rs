use crate::application::search::SearchUseCase;
use crate::application::stats::{StatsUseCase, StoreStats};
use crate::domain::entities::query_result::QueryResult;
use crate::domain::error::DomainError;
use crate::domain::values::metric::Metric;
use crate::domain::values::top_k::TopK;
use crate::infrastructure::http::error::ApiError;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Values used when a request leaves `topk` or `mode` out.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryDefaults {
    pub top_k: TopK,
    pub metric: Metric,
}

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchUseCase>,
    pub stats: Arc<StatsUseCase>,
    pub defaults: QueryDefaults,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub topk: Option<i64>,
    #[serde(default)]
    pub mode: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/stats", get(stats))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.stats.stats())
}

async fn query(State(state): State<AppState>, body: Bytes) -> Result<Json<QueryResult>, ApiError> {
    let req: QueryRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("rejected query body: {e}");
        ApiError::BadRequest("Invalid JSON".into())
    })?;

    let k = match req.topk {
        Some(k) => TopK::new(k)?,
        None => state.defaults.top_k,
    };
    let metric = match req.mode.as_deref() {
        Some(mode) => mode
            .parse::<Metric>()
            .map_err(DomainError::InvalidArgument)?,
        None => state.defaults.metric,
    };

    // Scoring is CPU-bound; keep it off the async workers.
    let search = state.search.clone();
    let result = tokio::task::spawn_blocking(move || search.search_with(&req.embedding, k, metric))
        .await
        .map_err(|e| ApiError::Internal(format!("query task failed: {e}")))??;

    Ok(Json(result))
}

/// Binds `addr` and serves until Ctrl+C.
pub async fn serve(app: Router, addr: &str) -> Result<(), DomainError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| DomainError::Io(format!("Failed to bind {addr}: {e}")))?;
    info!("Server started on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DomainError::Io(format!("Server error: {e}")))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::load_corpus::LoadReport;
    use crate::domain::entities::embedding_store::EmbeddingStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let store = Arc::new(
            EmbeddingStore::from_pairs(vec![
                ("a", vec![1.0, 0.0]),
                ("b", vec![0.0, 1.0]),
                ("c", vec![1.0, 1.0]),
            ])
            .unwrap(),
        );
        router(AppState {
            search: Arc::new(SearchUseCase::new(store.clone())),
            stats: Arc::new(StatsUseCase::new(store, LoadReport::default())),
            defaults: QueryDefaults::default(),
        })
    }

    fn post_query(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "OK");
    }

    #[tokio::test]
    async fn test_query_uses_defaults() {
        let resp = test_router()
            .oneshot(post_query(r#"{"embedding": [1.0, 0.0]}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let result: QueryResult = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(result.identifiers(), vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_query_invalid_json() {
        let resp = test_router().oneshot(post_query("{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Invalid JSON");
    }

    #[tokio::test]
    async fn test_query_dimension_mismatch_is_bad_request() {
        let resp = test_router()
            .oneshot(post_query(r#"{"embedding": [1.0, 0.0, 0.0]}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let text = body_text(resp).await;
        assert!(text.contains("expected 2"));
        assert!(text.contains("got 3"));
    }

    #[tokio::test]
    async fn test_query_unknown_mode_is_bad_request() {
        let resp = test_router()
            .oneshot(post_query(r#"{"embedding": [1.0, 0.0], "mode": "dot"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.contains("dot"));
    }
}
