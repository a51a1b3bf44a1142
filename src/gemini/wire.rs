// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Gemini wire types
//
// Request body for `streamGenerateContent` and the per-event response shape.
// Every response field is optional: partial events are common and must map
// to `Chunk::Empty` rather than fail.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::chunk::Chunk;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub response_mime_type: String,
}

impl GenerateContentRequest {
    /// A single user turn asking for both image and text output.
    pub fn user_text(text: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: text.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
                response_mime_type: "text/plain".to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub text: Option<String>,
    pub inline_data: Option<Blob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(default)]
    pub mime_type: String,
    /// Base64 payload as sent on the wire.
    #[serde(default)]
    pub data: String,
}

impl GenerateContentResponse {
    /// Map one streamed response event to a classifier chunk.
    ///
    /// Only the first candidate is considered. Inline data wins when it sits
    /// in the first part and carries a payload; otherwise all text parts are
    /// concatenated.
    pub fn into_chunk(self) -> Result<Chunk, GenerationError> {
        let parts = match self
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
        {
            Some(parts) if !parts.is_empty() => parts,
            _ => return Ok(Chunk::Empty),
        };

        if let Some(blob) = parts[0].inline_data.as_ref() {
            if !blob.data.is_empty() {
                let data = STANDARD
                    .decode(blob.data.as_bytes())
                    .map_err(|e| GenerationError::Decode(format!("invalid inline data: {e}")))?;
                return Ok(Chunk::inline(blob.mime_type.clone(), data));
            }
        }

        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            Ok(Chunk::Empty)
        } else {
            Ok(Chunk::Text(text))
        }
    }
}

/// Parse one SSE `data:` payload into a chunk.
pub fn parse_event(payload: &str) -> Result<Chunk, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(payload)
        .map_err(|e| GenerationError::Decode(format!("invalid response event: {e}")))?;
    response.into_chunk()
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Extract a readable message from a non-2xx response body.
///
/// Falls back to the raw body (truncated) when it is not a Google error
/// envelope.
pub fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let ErrorBody { message, status } = envelope.error;
        return match (status.is_empty(), message.is_empty()) {
            (true, _) => message,
            (false, true) => status,
            (false, false) => format!("{status}: {message}"),
        };
    }
    body.trim().chars().take(512).collect()
}
