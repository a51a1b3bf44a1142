// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

pub mod batch;
pub mod chunk;
pub mod classify;
pub mod config;
pub mod gemini;
pub mod media;
pub mod prompt;
pub mod render;
pub mod server;
pub mod service;
