// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Content service
//
// Wires one request end to end: input guard, instruction template,
// generation stream, classification. Shared across handlers via `Arc`.

use std::sync::Arc;
use std::time::Instant;

use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::classify::{classify_stream, ContentResult};
use crate::gemini::{GenerationClient, GenerationError};
use crate::prompt::ContentRequest;

pub struct ContentService {
    client: Arc<dyn GenerationClient>,
}

impl ContentService {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Generate and classify content for one profession/prompt pair.
    ///
    /// Returns `Ok(None)` without contacting the model when either input is
    /// empty. Upstream failures abort the whole request.
    pub async fn generate(
        &self,
        profession: &str,
        prompt: &str,
    ) -> Result<Option<ContentResult>, GenerationError> {
        let Some(request) = ContentRequest::new(profession, prompt) else {
            tracing::debug!("profession or prompt missing, skipping generation");
            return Ok(None);
        };
        self.run(&request).await.map(Some)
    }

    /// Generate and classify content for an already validated request.
    pub async fn run(&self, request: &ContentRequest) -> Result<ContentResult, GenerationError> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        tracing::info!(
            request_id = %request_id,
            model = %self.client.model(),
            profession = %request.profession(),
            "generation started"
        );

        let mut chunk_count = 0usize;
        let stream = self
            .client
            .stream(&request.instruction())
            .await
            .map_err(|e| log_failure(&request_id, started, e))?
            .inspect_ok(|_| chunk_count += 1);

        let result = classify_stream(stream)
            .await
            .map_err(|e| log_failure(&request_id, started, e))?;

        tracing::info!(
            request_id = %request_id,
            chunks = chunk_count,
            titles = result.titles.len(),
            hashtags = result.hashtags.len(),
            description_chars = result.description.chars().count(),
            has_image = result.image.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation complete"
        );

        Ok(result)
    }
}

fn log_failure(request_id: &str, started: Instant, error: GenerationError) -> GenerationError {
    tracing::warn!(
        request_id = %request_id,
        error = %error,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generation failed"
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::gemini::ChunkStream;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed chunk script and records the instructions it saw.
    struct ScriptedClient {
        script: Vec<Result<Chunk, String>>,
        instructions: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<Chunk, String>>) -> Self {
            Self {
                script,
                instructions: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.instructions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn stream(&self, instruction: &str) -> Result<ChunkStream, GenerationError> {
            self.instructions.lock().unwrap().push(instruction.to_string());
            let items: Vec<Result<Chunk, GenerationError>> = self
                .script
                .iter()
                .map(|item| item.clone().map_err(GenerationError::Transport))
                .collect();
            Ok(Box::pin(futures_util::stream::iter(items)))
        }
    }

    #[tokio::test]
    async fn empty_profession_never_calls_upstream() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(Chunk::text("Titles:\n1. X"))]));
        let service = ContentService::new(client.clone());

        let result = service.generate("", "anything").await.unwrap();

        assert!(result.is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_prompt_never_calls_upstream() {
        let client = Arc::new(ScriptedClient::new(Vec::new()));
        let service = ContentService::new(client.clone());

        assert!(service.generate("Chef", "").await.unwrap().is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn sends_templated_instruction_and_classifies() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(Chunk::text("Titles:\n1. Knife Skills\n2. Pasta Night")),
            Ok(Chunk::text("Description: Cook along.")),
            Ok(Chunk::text("Hashtags: chef #pasta")),
            Ok(Chunk::inline("image/png", vec![1u8])),
        ]));
        let service = ContentService::new(client.clone());

        let result = service.generate("Chef", "pasta").await.unwrap().unwrap();

        assert_eq!(result.titles, vec!["Knife Skills", "Pasta Night"]);
        assert_eq!(result.description, "Cook along.");
        assert_eq!(result.hashtags, vec!["#chef", "#pasta"]);
        assert!(result.image.is_some());

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], crate::prompt::build_instruction("Chef", "pasta"));
    }

    #[tokio::test]
    async fn stream_failure_discards_partial_result() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(Chunk::text("Titles:\n1. Partial")),
            Err("socket closed".to_string()),
        ]));
        let service = ContentService::new(client);

        let err = service.generate("Chef", "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(ref m) if m == "socket closed"));
    }
}
