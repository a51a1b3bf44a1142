// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Raw YAML deserialization types (internal)
// Interpolation and validation happen between these and the public types.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub postsmith: String,
    pub gemini: Option<RawGeminiConfig>,
    pub environment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}
