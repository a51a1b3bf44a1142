// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Streaming response classifier
//
// Responsibilities:
// - Consume chunks strictly in stream order
// - Track the active section via explicit markers in the text
// - Accumulate titles, description and hashtags into the active section
// - Capture the most recent inline image as base64
// - Truncate titles and hashtags to 10 on completion

mod section;
mod state;

pub use section::{
    hashtag_tokens, title_candidates, transition, Effect, Section, DESCRIPTION_MARKER,
    HASHTAGS_MARKER, TITLES_MARKER, TITLE_MARKER,
};
pub use state::{
    classify, classify_stream, ClassifierState, ContentResult, GeneratedImage, MAX_HASHTAGS,
    MAX_TITLES,
};
