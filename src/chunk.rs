// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Chunk model
//
// One unit of a streamed generation response, as handed to the classifier
// by the generation client.

use bytes::Bytes;

/// Binary media embedded directly in a response chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineData {
    /// MIME type reported by the model (e.g. "image/png").
    pub mime_type: String,
    /// Raw (decoded) payload bytes.
    pub data: Bytes,
}

/// A single streamed chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// A fragment of natural-language output.
    Text(String),
    /// A fragment of generated binary media.
    InlineData(InlineData),
    /// No usable content parts. Skipped by the classifier.
    Empty,
}

impl Chunk {
    pub fn text(text: impl Into<String>) -> Self {
        Chunk::Text(text.into())
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Chunk::InlineData(InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        })
    }
}
