// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Reqwest-backed Gemini client.

use async_trait::async_trait;
use futures_util::TryStreamExt;

use super::sse::decode_chunks;
use super::wire::{error_message, GenerateContentRequest};
use super::{ChunkStream, GenerationClient, GenerationError};
use crate::config::GeminiConfig;

/// Streams `streamGenerateContent` responses over SSE.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout(e.to_string())
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn stream(&self, instruction: &str) -> Result<ChunkStream, GenerationError> {
        let mut req = self
            .http
            .post(self.stream_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateContentRequest::user_text(instruction));

        if let Some(timeout_ms) = self.config.timeout_ms {
            req = req.timeout(std::time::Duration::from_millis(timeout_ms));
        }

        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "generation request rejected");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes_stream().map_err(GenerationError::from);
        Ok(decode_chunks(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use futures_util::StreamExt;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "test-model";

    fn client_for(server: &MockServer) -> GeminiClient {
        let mut config = GeminiConfig::new("test-key");
        config.base_url = server.uri();
        config.model = MODEL.to_string();
        GeminiClient::new(config)
    }

    fn sse(events: &[serde_json::Value]) -> String {
        events
            .iter()
            .map(|e| format!("data: {e}\r\n\r\n"))
            .collect()
    }

    #[tokio::test]
    async fn streams_chunks_from_sse_body() {
        let server = MockServer::start().await;
        let body = sse(&[
            serde_json::json!({"candidates":[{"content":{"parts":[{"text":"Description: hi"}]}}]}),
            serde_json::json!({"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"AQID"}}]}}]}),
        ]);

        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{MODEL}:streamGenerateContent")))
            .and(query_param("alt", "sse"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"responseModalities": ["IMAGE", "TEXT"]}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.model(), MODEL);

        let chunks: Vec<Chunk> = client
            .stream("hello")
            .await
            .unwrap()
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(
            chunks,
            vec![
                Chunk::text("Description: hi"),
                Chunk::inline("image/png", vec![1u8, 2, 3]),
            ]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string(
                r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#,
            ))
            .mount(&server)
            .await;

        let err = match client_for(&server).stream("hello").await {
            Err(e) => e,
            Ok(_) => panic!("expected an error"),
        };
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "PERMISSION_DENIED: Permission denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        client.config.timeout_ms = Some(50);

        let err = match client.stream("hello").await {
            Err(e) => e,
            Ok(_) => panic!("expected a timeout"),
        };
        assert!(matches!(err, GenerationError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        let mut config = GeminiConfig::new("k");
        config.base_url = "http://127.0.0.1:1".to_string();
        let err = match GeminiClient::new(config).stream("hello").await {
            Err(e) => e,
            Ok(_) => panic!("expected a transport error"),
        };
        assert!(matches!(err, GenerationError::Transport(_)), "got {err:?}");
    }
}
