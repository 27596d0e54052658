//! Web front end
//!
//! Thin axum layer over the response composer: one query endpoint with a
//! `{success, response|error}` envelope, a health check, and the static
//! single-page UI.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::composer::ResponseComposer;
use crate::config::ServerConfig;

#[derive(Deserialize)]
struct QueryRequest {
    query: Option<String>,
}

#[derive(Serialize)]
struct QueryResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl QueryResponse {
    fn ok(response: String) -> Self {
        Self {
            success: true,
            response: Some(response),
            error: None,
        }
    }

    fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }
}

pub fn router(composer: Arc<ResponseComposer>, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/query", post(handle_query))
        .route("/api/health", get(health))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .with_state(composer)
}

async fn handle_query(
    State(composer): State<Arc<ResponseComposer>>,
    Json(request): Json<QueryRequest>,
) -> (StatusCode, Json<QueryResponse>) {
    let Some(query) = request.query else {
        return (
            StatusCode::BAD_REQUEST,
            Json(QueryResponse::err("Missing \"query\" field in request body")),
        );
    };

    let query = query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(QueryResponse::err("Query cannot be empty")),
        );
    }

    let response = composer.process_query(query).await;
    (StatusCode::OK, Json(QueryResponse::ok(response)))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "tourguide",
    }))
}

pub async fn run(composer: Arc<ResponseComposer>, server: &ServerConfig) -> anyhow::Result<()> {
    let app = router(composer, &server.static_dir);

    let addr = format!("0.0.0.0:{}", server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", server.port);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_fields() {
        let ok = serde_json::to_value(QueryResponse::ok("hello".into())).unwrap();
        assert_eq!(ok, json!({"success": true, "response": "hello"}));

        let err = serde_json::to_value(QueryResponse::err("bad request")).unwrap();
        assert_eq!(err, json!({"success": false, "error": "bad request"}));
    }

    #[test]
    fn request_field_is_optional_in_the_body() {
        let request: QueryRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_none());

        let request: QueryRequest = serde_json::from_str(r#"{"query": "hi"}"#).unwrap();
        assert_eq!(request.query.as_deref(), Some("hi"));
    }
}
