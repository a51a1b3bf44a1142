// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Classifier state and result types.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures_util::stream::{Stream, StreamExt};
use serde::Serialize;

use super::section::{transition, Effect, Section};
use crate::chunk::Chunk;

/// Maximum number of titles kept in a result.
pub const MAX_TITLES: usize = 10;

/// Maximum number of hashtags kept in a result.
pub const MAX_HASHTAGS: usize = 10;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A generated image, already base64-encoded for embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl GeneratedImage {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64_data: STANDARD.encode(bytes),
        }
    }

    /// `data:<mime>;base64,<payload>`, usable directly as an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Structured output of one classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentResult {
    pub titles: Vec<String>,
    pub description: String,
    pub hashtags: Vec<String>,
    pub image: Option<GeneratedImage>,
}

// ---------------------------------------------------------------------------
// ClassifierState
// ---------------------------------------------------------------------------

/// Mutable accumulation state for exactly one run.
///
/// Created per request, fed chunks in stream order, consumed by `finish`.
#[derive(Debug, Default)]
pub struct ClassifierState {
    section: Section,
    titles: Vec<String>,
    description: String,
    hashtags: Vec<String>,
    image: Option<GeneratedImage>,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The section unmarked text is currently appended to.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Feed one chunk.
    pub fn apply(&mut self, chunk: &Chunk) {
        match chunk {
            Chunk::Empty => {}
            Chunk::InlineData(inline) => {
                if inline.data.is_empty() {
                    return;
                }
                if self.image.is_some() {
                    tracing::debug!(mime_type = %inline.mime_type, "replacing earlier inline image");
                }
                self.image = Some(GeneratedImage::from_bytes(&inline.mime_type, &inline.data));
            }
            Chunk::Text(text) => {
                let (next, effects) = transition(self.section, text);
                if next != self.section {
                    tracing::debug!(from = ?self.section, to = ?next, "section switch");
                }
                self.section = next;
                for effect in effects {
                    self.apply_effect(effect);
                }
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Title(title) => self.titles.push(title),
            Effect::ReplaceDescription(text) => self.description = text,
            Effect::AppendDescription(text) => {
                self.description.push(' ');
                self.description.push_str(&text);
            }
            Effect::Hashtag(tag) => self.hashtags.push(tag),
        }
    }

    /// Consume the state, truncating titles and hashtags.
    pub fn finish(mut self) -> ContentResult {
        self.titles.truncate(MAX_TITLES);
        self.hashtags.truncate(MAX_HASHTAGS);
        ContentResult {
            titles: self.titles,
            description: self.description,
            hashtags: self.hashtags,
            image: self.image,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Classify an in-memory sequence of chunks.
pub fn classify<I>(chunks: I) -> ContentResult
where
    I: IntoIterator<Item = Chunk>,
{
    let mut state = ClassifierState::new();
    for chunk in chunks {
        state.apply(&chunk);
    }
    state.finish()
}

/// Classify a fallible chunk stream, consuming it to completion.
///
/// The first upstream error aborts the run and is returned unchanged.
pub async fn classify_stream<S, E>(stream: S) -> Result<ContentResult, E>
where
    S: Stream<Item = Result<Chunk, E>>,
{
    futures_util::pin_mut!(stream);
    let mut state = ClassifierState::new();
    while let Some(item) = stream.next().await {
        state.apply(&item?);
    }
    Ok(state.finish())
}
