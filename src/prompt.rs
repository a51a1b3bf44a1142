// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Request guard and instruction template
//
// The template text is part of the contract with the upstream model and is
// reproduced byte for byte, including its leading newline and indentation.

/// Indentation carried by every template line.
const INDENT: &str = "                        ";

/// A validated generation request. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    profession: String,
    prompt: String,
}

impl ContentRequest {
    /// Returns `None` when either field is empty. No classification should
    /// be attempted in that case.
    pub fn new(profession: impl Into<String>, prompt: impl Into<String>) -> Option<Self> {
        let profession = profession.into();
        let prompt = prompt.into();
        if profession.is_empty() || prompt.is_empty() {
            return None;
        }
        Some(Self { profession, prompt })
    }

    pub fn profession(&self) -> &str {
        &self.profession
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The combined instruction sent upstream.
    pub fn instruction(&self) -> String {
        build_instruction(&self.profession, &self.prompt)
    }
}

/// Interpolate profession and prompt into the fixed instruction template.
pub fn build_instruction(profession: &str, prompt: &str) -> String {
    format!(
        "\n\
         {INDENT}Profession: {profession}\n\
         {INDENT}Prompt: {prompt}\n\
         {INDENT}Generate:\n\
         {INDENT}- 10 Titles\n\
         {INDENT}- A good description\n\
         {INDENT}- 10 Hashtags\n\
         {INDENT}- An image\n\
         {INDENT}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profession_is_rejected() {
        assert!(ContentRequest::new("", "anything").is_none());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert!(ContentRequest::new("Baker", "").is_none());
    }

    #[test]
    fn non_empty_fields_are_accepted() {
        let req = ContentRequest::new("Baker", "sourdough launch").unwrap();
        assert_eq!(req.profession(), "Baker");
        assert_eq!(req.prompt(), "sourdough launch");
    }

    #[test]
    fn instruction_matches_template_exactly() {
        let pad = " ".repeat(24);
        let expected = format!(
            "\n{pad}Profession: Photographer\n{pad}Prompt: beach sunset\n{pad}Generate:\n\
             {pad}- 10 Titles\n{pad}- A good description\n{pad}- 10 Hashtags\n{pad}- An image\n{pad}"
        );
        let req = ContentRequest::new("Photographer", "beach sunset").unwrap();
        assert_eq!(req.instruction(), expected);
    }

    #[test]
    fn instruction_asks_for_all_four_outputs() {
        let text = build_instruction("Chef", "pasta");
        for needle in ["- 10 Titles", "- A good description", "- 10 Hashtags", "- An image"] {
            assert!(text.contains(needle), "missing {needle:?} in {text:?}");
        }
    }
}
