// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// SSE decoding
//
// Reassembles `data:` lines from an arbitrary byte-chunked body and turns
// each payload into a `Chunk`. Lines are split on raw bytes so multi-byte
// characters straddling a network chunk boundary survive intact.

use std::collections::VecDeque;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

use super::wire::parse_event;
use super::{ChunkStream, GenerationError};

/// Extract the payload of a single SSE line.
///
/// Returns `None` for blank lines, comments, non-data fields and the
/// `[DONE]` terminator some gateways append.
pub fn parse_sse_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }
    let data = trimmed
        .strip_prefix("data: ")
        .or_else(|| trimmed.strip_prefix("data:"))?;
    if data == "[DONE]" {
        return None;
    }
    Some(data)
}

/// Incremental line splitter for an SSE body.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes and return the payloads of all completed lines.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(data) = parse_sse_line(&String::from_utf8_lossy(&line)) {
                payloads.push(data.to_string());
            }
        }
        payloads
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        parse_sse_line(&String::from_utf8_lossy(&rest)).map(str::to_string)
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, GenerationError>> + Send>>;

struct DecodeState {
    input: ByteStream,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    done: bool,
}

/// Turn a fallible SSE byte stream into a chunk stream.
///
/// The first transport or decode error is yielded and ends the stream.
pub fn decode_chunks(
    input: impl Stream<Item = Result<Bytes, GenerationError>> + Send + 'static,
) -> ChunkStream {
    let state = DecodeState {
        input: Box::pin(input),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        done: false,
    };

    let chunks = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(payload) = state.pending.pop_front() {
                let item = parse_event(&payload);
                if item.is_err() {
                    state.pending.clear();
                    state.done = true;
                }
                return Some((item, state));
            }
            if state.done {
                return None;
            }
            match state.input.next().await {
                Some(Ok(bytes)) => {
                    let payloads = state.decoder.push(&bytes);
                    state.pending.extend(payloads);
                }
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(e), state));
                }
                None => {
                    state.pending.extend(state.decoder.finish());
                    state.done = true;
                }
            }
        }
    });

    Box::pin(chunks)
}
