mod common;

use common::{approx, setup};
use embedserve::domain::error::DomainError;
use embedserve::infrastructure::client::remote::RemoteClient;
use embedserve::infrastructure::http::server::QueryDefaults;

/// Serves the shared three-vector store on an ephemeral port.
async fn spawn_server() -> String {
    let app = setup().router(QueryDefaults::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_remote_health() {
    let client = RemoteClient::new(Some(spawn_server().await));
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn test_remote_query_round_trip() {
    let client = RemoteClient::new(Some(format!("{}/", spawn_server().await)));
    let result = client
        .query(vec![1.0, 0.0], Some(2), Some("cosine".into()))
        .await
        .unwrap();
    assert_eq!(result.identifiers(), vec!["a", "c"]);
    assert!(approx(result.matches[0].score, 1.0));

    let result = client.query(vec![1.0, 0.0], None, None).await.unwrap();
    assert_eq!(result.len(), 3);
}

#[tokio::test]
async fn test_remote_client_error_maps_to_http() {
    let client = RemoteClient::new(Some(spawn_server().await));
    match client.query(vec![1.0, 0.0, 0.0], Some(2), None).await {
        Err(DomainError::Http(msg)) => {
            assert!(msg.contains("400"));
            assert!(msg.contains("expected 2"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remote_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = RemoteClient::new(Some(format!("http://{addr}")));
    assert!(matches!(client.health().await, Err(DomainError::Http(_))));
}
