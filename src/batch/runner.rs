// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Batch runner
//
// Rows are generated one after another. A failed row is recorded and the run
// moves on; only an empty sheet fails the batch as a whole.

use std::sync::Arc;
use std::time::Instant;

use futures_util::StreamExt;
use serde::Serialize;
use uuid::Uuid;

use super::brief::PostBrief;
use super::reply::ReplyParser;
use super::sheet::SheetRow;
use super::BatchError;
use crate::chunk::Chunk;
use crate::classify::{ContentResult, GeneratedImage};
use crate::gemini::{GenerationClient, GenerationError};

/// Why one row produced no post.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("model returned no text")]
    EmptyReply,
}

/// Completion after each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percent, rounded half up.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.done * 200 + self.total) / (self.total * 2)).min(100) as u8
    }
}

/// Outcome of one sheet row.
#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    /// Zero-based position among the non-blank rows.
    pub row: usize,
    pub input: SheetRow,
    pub post: Option<ContentResult>,
    pub error: Option<String>,
}

pub struct BatchRunner {
    client: Arc<dyn GenerationClient>,
    parser: ReplyParser,
}

impl BatchRunner {
    pub fn new(client: Arc<dyn GenerationClient>) -> Result<Self, BatchError> {
        Ok(Self {
            client,
            parser: ReplyParser::new()?,
        })
    }

    /// Generate one post for a brief.
    ///
    /// Text from every chunk is concatenated and parsed once the stream ends.
    /// The last `image/*` payload becomes the post image.
    pub async fn generate(&self, brief: &PostBrief) -> Result<ContentResult, RowError> {
        let mut stream = self.client.stream(&brief.instruction()).await?;

        let mut reply = String::new();
        let mut image = None;
        while let Some(chunk) = stream.next().await {
            match chunk? {
                Chunk::Text(text) => reply.push_str(&text),
                Chunk::InlineData(inline)
                    if inline.mime_type.starts_with("image/") && !inline.data.is_empty() =>
                {
                    image = Some(GeneratedImage::from_bytes(inline.mime_type, &inline.data));
                }
                Chunk::InlineData(_) | Chunk::Empty => {}
            }
        }

        let fields = self.parser.parse(&reply).ok_or(RowError::EmptyReply)?;
        Ok(ContentResult {
            titles: fields.titles,
            description: fields.description,
            hashtags: fields.hashtags,
            image,
        })
    }

    /// Generate every row in order, calling `on_progress` after each one.
    pub async fn run<F>(&self, rows: &[SheetRow], mut on_progress: F) -> Result<Vec<RowReport>, BatchError>
    where
        F: FnMut(Progress),
    {
        if rows.is_empty() {
            return Err(BatchError::NoRows);
        }

        let batch_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let total = rows.len();
        tracing::info!(batch_id = %batch_id, rows = total, model = %self.client.model(), "batch started");

        let mut reports = Vec::with_capacity(total);
        for (index, row) in rows.iter().enumerate() {
            let brief = PostBrief::from_row(row);
            let row_started = Instant::now();

            let (post, error) = match self.generate(&brief).await {
                Ok(post) => {
                    tracing::info!(
                        batch_id = %batch_id,
                        row = index,
                        brand = %brief.brand,
                        platform = %brief.platform,
                        has_image = post.image.is_some(),
                        elapsed_ms = row_started.elapsed().as_millis() as u64,
                        "row generated"
                    );
                    (Some(post), None)
                }
                Err(e) => {
                    tracing::warn!(batch_id = %batch_id, row = index, error = %e, "row failed");
                    (None, Some(e.to_string()))
                }
            };

            reports.push(RowReport {
                row: index,
                input: row.clone(),
                post,
                error,
            });
            on_progress(Progress {
                done: index + 1,
                total,
            });
        }

        tracing::info!(
            batch_id = %batch_id,
            rows = total,
            failed = reports.iter().filter(|r| r.post.is_none()).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch complete"
        );
        Ok(reports)
    }
}
