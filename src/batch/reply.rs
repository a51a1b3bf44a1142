// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Batch reply parsing
//
// The batch instruction asks for a JSON object. Models still wrap it in code
// fences or chatter, so the reply is unfenced and cut to the outermost braces
// before parsing. When that fails, a lenient regex pass pulls out whatever
// fields it can find. Missing fields get placeholder values so every parsed
// reply renders.

use regex::Regex;
use serde::Deserialize;

pub const NO_TITLE: &str = "No title generated";
pub const NO_DESCRIPTION: &str = "No description generated";
pub const NO_HASHTAGS: &str = "#nohashtags";

/// Regex fallback limits.
const FALLBACK_TITLES: usize = 3;
const FALLBACK_HASHTAGS: usize = 5;

/// Parsed text fields of one batch reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFields {
    pub titles: Vec<String>,
    pub description: String,
    pub hashtags: Vec<String>,
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hashtags: Vec<String>,
}

/// Compiled fallback patterns. Build once per batch run.
pub struct ReplyParser {
    fence_open: Regex,
    fence_close: Regex,
    titles: Regex,
    description: Regex,
    hashtags: Regex,
    quoted: Regex,
}

impl ReplyParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            fence_open: Regex::new(r"```json\s*")?,
            fence_close: Regex::new(r"```\s*")?,
            titles: Regex::new(r#"(?s)"titles":\s*\[(.*?)\]"#)?,
            description: Regex::new(r#""description":\s*"([^"]+)""#)?,
            hashtags: Regex::new(r#"(?s)"hashtags":\s*\[(.*?)\]"#)?,
            quoted: Regex::new(r#""([^"]+)""#)?,
        })
    }

    /// Parse a complete reply. Returns `None` when the reply has no text.
    pub fn parse(&self, reply: &str) -> Option<ReplyFields> {
        let reply = reply.trim();
        if reply.is_empty() {
            return None;
        }

        let (titles, description, hashtags) = match self.parse_json(reply) {
            Ok(json) => (json.titles, json.description, json.hashtags),
            Err(e) => {
                tracing::debug!(error = %e, "batch reply is not valid JSON, extracting fields");
                self.extract(reply)
            }
        };

        Some(ReplyFields {
            titles: or_placeholder(titles, NO_TITLE),
            description: if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description
            },
            hashtags: or_placeholder(hashtags, NO_HASHTAGS),
        })
    }

    fn parse_json(&self, reply: &str) -> Result<JsonReply, serde_json::Error> {
        let unfenced = self.fence_open.replace_all(reply, "");
        let unfenced = self.fence_close.replace_all(&unfenced, "");

        let body = match (unfenced.find('{'), unfenced.rfind('}')) {
            (Some(start), Some(end)) if end > start => &unfenced[start..=end],
            _ => &unfenced[..],
        };
        serde_json::from_str(body)
    }

    fn extract(&self, reply: &str) -> (Vec<String>, String, Vec<String>) {
        let list = |pattern: &Regex| -> Vec<String> {
            pattern
                .captures(reply)
                .and_then(|c| c.get(1))
                .map(|inner| {
                    self.quoted
                        .captures_iter(inner.as_str())
                        .filter_map(|c| c.get(1))
                        .map(|m| m.as_str().to_string())
                        .collect()
                })
                .unwrap_or_default()
        };

        let titles: Vec<String> = list(&self.titles).into_iter().take(FALLBACK_TITLES).collect();

        let description = self
            .description
            .captures(reply)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let hashtags = list(&self.hashtags)
            .into_iter()
            .map(|tag| if tag.starts_with('#') { tag } else { format!("#{tag}") })
            .take(FALLBACK_HASHTAGS)
            .collect();

        (titles, description, hashtags)
    }
}

fn or_placeholder(values: Vec<String>, placeholder: &str) -> Vec<String> {
    if values.is_empty() {
        vec![placeholder.to_string()]
    } else {
        values
    }
}
