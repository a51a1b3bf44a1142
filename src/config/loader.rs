// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

use sha2::{Digest, Sha256};

use super::error::ConfigError;
use super::interpolation::resolve_variables;
use super::raw;
use super::source::ConfigSource;
use super::types::*;

/// Load and validate a postsmith config from the given source.
///
/// Steps:
/// 1. Read raw YAML from source
/// 2. Compute SHA256 config hash
/// 3. Parse YAML into raw deserialization types
/// 4. Validate version and required fields
/// 5. Resolve `${VAR}` interpolation in string fields
/// 6. Build typed Config struct
pub fn load_config(source: &dyn ConfigSource) -> Result<Config, ConfigError> {
    let raw_yaml = source.load()?;
    let config_hash = compute_hash(&raw_yaml);

    let raw: raw::RawConfig = serde_yaml::from_str(&raw_yaml)?;

    if raw.postsmith != "v1" {
        return Err(ConfigError::Validation(format!(
            "unsupported config version \"{}\", expected \"v1\"",
            raw.postsmith
        )));
    }

    let gemini = build_gemini_config(raw.gemini)?;

    Ok(Config {
        version: raw.postsmith,
        gemini,
        environment: raw.environment.unwrap_or_default(),
        config_hash,
    })
}

pub fn compute_hash(raw_yaml: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_yaml.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

fn build_gemini_config(raw: Option<raw::RawGeminiConfig>) -> Result<GeminiConfig, ConfigError> {
    let raw = raw.ok_or_else(|| {
        ConfigError::Validation("missing required section \"gemini\"".to_string())
    })?;

    let api_key = match raw.api_key {
        Some(key) => resolve_variables(&key)?,
        None => {
            return Err(ConfigError::Validation(
                "gemini.api_key is required (use \"${GEMINI_API_KEY}\" to read it from the environment)"
                    .to_string(),
            ))
        }
    };
    if api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "gemini.api_key resolved to an empty string".to_string(),
        ));
    }

    let model = match raw.model {
        Some(m) => resolve_variables(&m)?,
        None => DEFAULT_MODEL.to_string(),
    };
    if model.trim().is_empty() {
        return Err(ConfigError::Validation("gemini.model must not be empty".to_string()));
    }

    let base_url = match raw.base_url {
        Some(u) => resolve_variables(&u)?,
        None => DEFAULT_BASE_URL.to_string(),
    };
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::Validation(format!(
            "gemini.base_url must be an http(s) URL, got \"{base_url}\""
        )));
    }

    if raw.timeout_ms == Some(0) {
        return Err(ConfigError::Validation(
            "gemini.timeout_ms must be greater than zero".to_string(),
        ));
    }

    Ok(GeminiConfig {
        api_key,
        model,
        base_url: base_url.trim_end_matches('/').to_string(),
        timeout_ms: raw.timeout_ms,
    })
}
