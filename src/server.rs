// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// HTTP surface
//
// Responsibilities:
// - Form page (GET /)
// - Form submission, generation and result rendering (POST /)
// - Heartbeat endpoint
// - Mapping generation failures to gateway status codes

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::gemini::GenerationError;
use crate::render::{render_page, PageView};
use crate::service::ContentService;

/// Default listen address. Localhost only unless overridden.
pub const DEFAULT_HOST: [u8; 4] = [127, 0, 0, 1];
pub const DEFAULT_PORT: u16 = 5000;

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let (status, public_message) = match &self {
            GenerationError::Timeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "generation request timed out")
            }
            GenerationError::Transport(_)
            | GenerationError::Api { .. }
            | GenerationError::Decode(_) => (StatusCode::BAD_GATEWAY, "generation request failed"),
        };
        (status, public_message).into_response()
    }
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContentService>,
}

/// Submitted form fields. Missing fields are treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub prompt: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Heartbeat endpoint: GET /v1/heartbeat -> 200 OK
pub async fn heartbeat() -> StatusCode {
    StatusCode::OK
}

/// GET / -> empty form.
pub async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

/// POST / -> generate, then render the form with the result.
///
/// Empty inputs re-render the form without contacting the model.
pub async fn submit(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    match state.service.generate(&form.profession, &form.prompt).await {
        Ok(result) => Html(render_page(&PageView {
            profession: &form.profession,
            prompt: &form.prompt,
            result: result.as_ref(),
        }))
        .into_response(),
        Err(e) => e.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Router construction
// ---------------------------------------------------------------------------

/// Build the axum router. The service (and its client) is injected.
pub fn build_router(service: Arc<ContentService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(index).post(submit))
        .route("/v1/heartbeat", get(heartbeat))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::gemini::{ChunkStream, GenerationClient};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt; // for oneshot

    /// Returns a fixed chunk list, or a fixed error, and counts calls.
    struct MockClient {
        chunks: Vec<Chunk>,
        error: Option<fn() -> GenerationError>,
        calls: AtomicUsize,
    }

    impl MockClient {
        fn ok(chunks: Vec<Chunk>) -> Self {
            Self {
                chunks,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(error: fn() -> GenerationError) -> Self {
            Self {
                chunks: Vec::new(),
                error: Some(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl GenerationClient for MockClient {
        fn model(&self) -> &str {
            "mock"
        }

        async fn stream(&self, _instruction: &str) -> Result<ChunkStream, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(make) = self.error {
                return Err(make());
            }
            let items: Vec<Result<Chunk, GenerationError>> =
                self.chunks.iter().cloned().map(Ok).collect();
            Ok(Box::pin(futures_util::stream::iter(items)))
        }
    }

    fn app(client: Arc<MockClient>) -> Router {
        build_router(Arc::new(ContentService::new(client)))
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let body = axum::body::to_bytes(resp.into_body(), 4 * 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8_lossy(&body).into_owned()
    }

    #[tokio::test]
    async fn heartbeat_returns_200() {
        let req = Request::builder()
            .uri("/v1/heartbeat")
            .body(Body::empty())
            .unwrap();
        let resp = app(Arc::new(MockClient::ok(Vec::new())))
            .oneshot(req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_renders_form() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app(Arc::new(MockClient::ok(Vec::new())))
            .oneshot(req)
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("name=\"profession\""));
        assert!(html.contains("name=\"prompt\""));
    }

    #[tokio::test]
    async fn submit_renders_classified_result() {
        let client = Arc::new(MockClient::ok(vec![
            Chunk::text("Titles:\n1. Morning Light"),
            Chunk::text("Description: Soft glow."),
            Chunk::text("Hashtags: light"),
            Chunk::inline("image/png", vec![1u8, 2, 3]),
        ]));
        let resp = app(client.clone())
            .oneshot(form_request("profession=Photographer&prompt=sunrise+shoot"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("<li>Morning Light</li>"));
        assert!(html.contains("<p>Soft glow.</p>"));
        assert!(html.contains("<span>#light</span>"));
        assert!(html.contains("data:image/png;base64,AQID"));
        assert!(html.contains("sunrise shoot"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_field_rerenders_form_without_generation() {
        let client = Arc::new(MockClient::ok(vec![Chunk::text("Titles:\n1. X")]));
        let resp = app(client.clone())
            .oneshot(form_request("profession=&prompt=anything"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("<form"));
        assert!(!html.contains("class=\"results\""));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_field_is_treated_as_empty() {
        let client = Arc::new(MockClient::ok(Vec::new()));
        let resp = app(client.clone())
            .oneshot(form_request("prompt=only+a+prompt"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_failure_returns_502() {
        let client = Arc::new(MockClient::failing(|| GenerationError::Api {
            status: 500,
            message: "internal".into(),
        }));
        let resp = app(client)
            .oneshot(form_request("profession=Chef&prompt=pasta"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn upstream_timeout_returns_504() {
        let client = Arc::new(MockClient::failing(|| {
            GenerationError::Timeout("after 5000ms".into())
        }));
        let resp = app(client)
            .oneshot(form_request("profession=Chef&prompt=pasta"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn error_body_does_not_leak_details() {
        let resp = GenerationError::Api {
            status: 400,
            message: "API key not valid: abc".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_string(resp).await;
        assert_eq!(body, "generation request failed");
    }

    #[test]
    fn decode_error_is_502() {
        let resp = GenerationError::Decode("bad json".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn default_bind_is_localhost() {
        assert_eq!(DEFAULT_HOST, [127, 0, 0, 1]);
    }

    #[tokio::test]
    async fn concurrent_requests_are_independent() {
        let client = Arc::new(MockClient::ok(vec![Chunk::text("Hashtags: a b")]));
        let mut handles = Vec::new();

        for i in 0..8 {
            let router = app(client.clone());
            handles.push(tokio::spawn(async move {
                let resp = router
                    .oneshot(form_request(&format!("profession=P{i}&prompt=topic")))
                    .await
                    .unwrap();
                body_string(resp).await
            }));
        }

        for handle in handles {
            let html = handle.await.unwrap();
            assert!(html.contains("<span>#a</span><span>#b</span>"));
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 8);
    }
}
