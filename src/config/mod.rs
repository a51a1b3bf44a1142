// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Config loader and validator
//
// Loads postsmith.yaml, validates structure, resolves `${VAR}` references
// from the environment (the API key is never written into the file), and
// computes a deterministic config hash for startup logging.

mod error;
mod interpolation;
mod loader;
mod raw;
mod source;
mod types;

pub use error::ConfigError;
pub use interpolation::resolve_variables;
pub use loader::{compute_hash, load_config};
pub use source::{ConfigSource, FileSource, StringSource, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
pub use types::{Config, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
