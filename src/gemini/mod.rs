// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Generation client
//
// Responsibilities:
// - Send the instruction to the model as a single user turn
// - Request both image and text modalities
// - Decode the SSE response into an ordered stream of `Chunk`s
// - Surface transport, timeout, API and decode failures untouched (no retry)

mod client;
mod sse;
mod wire;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::stream::Stream;

use crate::chunk::Chunk;

pub use client::GeminiClient;
pub use sse::{decode_chunks, parse_sse_line, SseDecoder};
pub use wire::{error_message, parse_event, GenerateContentRequest, GenerateContentResponse};

/// Ordered, forward-only stream of chunks from one generation call.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Chunk, GenerationError>> + Send>>;

/// Errors from the generation service.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation request timed out: {0}")]
    Timeout(String),

    #[error("generation service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed generation response: {0}")]
    Decode(String),
}

/// Abstraction over the service that produces chunk streams.
///
/// Implementations must be Send + Sync so they can be shared across request
/// handlers via `Arc`.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Start one streamed generation for `instruction`.
    async fn stream(&self, instruction: &str) -> Result<ChunkStream, GenerationError>;
}
