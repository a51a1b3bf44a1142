// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Model used when the config does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Public Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Top-level parsed and validated postsmith config.
#[derive(Debug, Clone)]
pub struct Config {
    /// Config version. Always "v1".
    pub version: String,
    pub gemini: GeminiConfig,
    /// Free-form environment label, logged at startup.
    pub environment: String,
    /// SHA256 of the raw YAML (before interpolation): "sha256:{hex}".
    pub config_hash: String,
}

/// Connection settings for the generation service.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Whole-request timeout. `None` leaves the stream unbounded.
    pub timeout_ms: Option<u64>,
}

// The key never reaches logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
        }
    }
}
