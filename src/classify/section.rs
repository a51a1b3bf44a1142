// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Section state machine
//
// Pure transition function over trimmed chunk text. No I/O, no allocation
// beyond the produced effects; the owning `ClassifierState` applies them.

/// Markers, in priority order. Case-sensitive substring match.
pub const TITLES_MARKER: &str = "Titles:";
pub const TITLE_MARKER: &str = "Title:";
pub const DESCRIPTION_MARKER: &str = "Description:";
pub const HASHTAGS_MARKER: &str = "Hashtags:";

/// The section that unmarked text is currently appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    Titles,
    Description,
    Hashtags,
}

/// A state mutation produced by one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a cleaned title.
    Title(String),
    /// Replace the whole description.
    ReplaceDescription(String),
    /// Append to the description, separated by a single space.
    AppendDescription(String),
    /// Append a normalized hashtag.
    Hashtag(String),
}

/// Compute the next section and the effects of one text chunk.
///
/// Only the first matching marker (by priority) is honored. Content is taken
/// from after the *last* occurrence of that marker, so any text before it in
/// the same chunk is discarded.
pub fn transition(section: Section, text: &str) -> (Section, Vec<Effect>) {
    let text = text.trim();

    if let Some(rest) =
        after_marker(text, TITLES_MARKER).or_else(|| after_marker(text, TITLE_MARKER))
    {
        return (
            Section::Titles,
            title_candidates(rest).map(Effect::Title).collect(),
        );
    }

    if let Some(rest) = after_marker(text, DESCRIPTION_MARKER) {
        return (
            Section::Description,
            vec![Effect::ReplaceDescription(rest.trim().to_string())],
        );
    }

    if let Some(rest) = after_marker(text, HASHTAGS_MARKER) {
        return (
            Section::Hashtags,
            hashtag_tokens(rest).map(Effect::Hashtag).collect(),
        );
    }

    if text.is_empty() {
        return (section, Vec::new());
    }

    let effects = match section {
        Section::None => Vec::new(),
        Section::Titles => title_candidates(text).map(Effect::Title).collect(),
        Section::Description => vec![Effect::AppendDescription(text.to_string())],
        Section::Hashtags => hashtag_tokens(text).map(Effect::Hashtag).collect(),
    };
    (section, effects)
}

fn after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.rfind(marker).map(|idx| &text[idx + marker.len()..])
}

/// Extract title candidates from newline-separated text.
///
/// A line qualifies only if its first non-blank character is a digit, `-`
/// or `*`. Any Unicode digit qualifies a line (`١`, `²`), but only the ASCII
/// run of `0-9`, dashes, asterisks, dots and spaces is stripped from it.
/// Other lines are dropped.
pub fn title_candidates(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split('\n').filter_map(clean_title_line)
}

fn clean_title_line(line: &str) -> Option<String> {
    let line = line.trim();
    let first = line.chars().next()?;
    if !(first.is_numeric() || first == '-' || first == '*') {
        return None;
    }
    let cleaned =
        line.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '-' | '*' | '.' | ' '));
    Some(cleaned.trim().to_string())
}

/// Split on whitespace and make sure every token starts with `#`.
pub fn hashtag_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(|tag| {
        if tag.starts_with('#') {
            tag.to_string()
        } else {
            format!("#{tag}")
        }
    })
}
