pub mod conversation;
pub mod health;
pub mod portfolio;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/resume/upload", post(resume::handle_upload))
        .route("/api/resume/latest", get(resume::handle_latest))
        .route(
            "/api/conversation/start",
            post(conversation::handle_start),
        )
        .route(
            "/api/conversation/latest",
            get(conversation::handle_latest),
        )
        .route(
            "/api/conversation/:id/messages",
            get(conversation::handle_messages),
        )
        .route(
            "/api/conversation/:id/message",
            post(conversation::handle_send),
        )
        .route("/api/quick-action", post(conversation::handle_quick))
        .route("/api/portfolio", get(portfolio::handle_portfolio))
        .layer(DefaultBodyLimit::max(resume::MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::llm_client::LlmClient;
    use crate::storage::{MemStore, Store};

    fn test_router() -> Router {
        let store: Arc<dyn Store> = Arc::new(MemStore::new());
        build_router(crate::state::AppState {
            store,
            llm: LlmClient::new("test-key".to_string()),
            portfolio: Arc::new(crate::portfolio::data()),
        })
    }

    #[tokio::test]
    async fn test_health_endpoint_responds_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_portfolio_endpoint_responds_ok() {
        let response = test_router()
            .oneshot(Request::get("/api/portfolio").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_latest_resume_is_404_before_any_upload() {
        let response = test_router()
            .oneshot(
                Request::get("/api/resume/latest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_latest_conversation_is_404_before_any_chat() {
        let response = test_router()
            .oneshot(
                Request::get("/api/conversation/latest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = test_router()
            .oneshot(
                Request::get("/api/github/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
