// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// HTML rendering for the form page.
//
// All user and model text is escaped. The image is embedded as a data URL.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::classify::ContentResult;

/// What the page should show.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub profession: &'a str,
    pub prompt: &'a str,
    pub result: Option<&'a ContentResult>,
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Social Media Content Generator</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
label { display: block; margin-top: 1rem; font-weight: 600; }
input, textarea { width: 100%; padding: .5rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: .5rem 1.5rem; }
.hashtags span { margin-right: .5rem; color: #1d4ed8; }
img.generated { max-width: 100%; border-radius: .5rem; }
</style>
</head>
<body>
<h1>Social Media Content Generator</h1>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Render the full page: the form, and the result when there is one.
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(HEAD);

    html.push_str(&format!(
        r#"<form method="post" action="/">
<label for="profession">Profession</label>
<input id="profession" name="profession" value="{}" required>
<label for="prompt">Prompt</label>
<textarea id="prompt" name="prompt" rows="4" required>{}</textarea>
<button type="submit">Generate</button>
</form>
"#,
        encode_double_quoted_attribute(view.profession),
        encode_text(view.prompt),
    ));

    if let Some(result) = view.result {
        render_result(&mut html, result);
    }

    html.push_str(TAIL);
    html
}

fn render_result(html: &mut String, result: &ContentResult) {
    html.push_str("<section class=\"results\">\n");

    if let Some(image) = &result.image {
        html.push_str(&format!(
            "<h2>Image</h2>\n<img class=\"generated\" alt=\"Generated image\" src=\"{}\">\n",
            encode_double_quoted_attribute(&image.data_url())
        ));
    }

    html.push_str("<h2>Titles</h2>\n<ol>\n");
    for title in &result.titles {
        html.push_str(&format!("<li>{}</li>\n", encode_text(title)));
    }
    html.push_str("</ol>\n");

    html.push_str(&format!(
        "<h2>Description</h2>\n<p>{}</p>\n",
        encode_text(&result.description)
    ));

    html.push_str("<h2>Hashtags</h2>\n<p class=\"hashtags\">");
    for tag in &result.hashtags {
        html.push_str(&format!("<span>{}</span>", encode_text(tag)));
    }
    html.push_str("</p>\n</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::GeneratedImage;

    #[test]
    fn model_text_cannot_inject_markup() {
        let result = ContentResult {
            titles: vec![r#"<b>"Tom" & Jerry</b>"#.into()],
            description: "</p><script>alert(1)</script>".into(),
            hashtags: vec!["#<img>".into()],
            image: None,
        };
        let html = render_page(&PageView {
            result: Some(&result),
            ..PageView::default()
        });

        assert!(html.contains("<li>&lt;b&gt;\"Tom\" &amp; Jerry&lt;/b&gt;</li>"));
        assert!(html.contains("<p>&lt;/p&gt;&lt;script&gt;alert(1)&lt;/script&gt;</p>"));
        assert!(html.contains("<span>#&lt;img&gt;</span>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn attribute_values_escape_quotes() {
        let html = render_page(&PageView {
            profession: r#"x" onfocus="alert(1)"#,
            prompt: "p",
            result: None,
        });
        assert!(html.contains(r#"value="x&quot; onfocus=&quot;alert(1)""#));
    }

    #[test]
    fn form_only_page_has_no_results() {
        let html = render_page(&PageView::default());
        assert!(html.contains("<form method=\"post\""));
        assert!(!html.contains("class=\"results\""));
    }

    #[test]
    fn form_echoes_escaped_inputs() {
        let html = render_page(&PageView {
            profession: "Chef \"Gordon\"",
            prompt: "<script>",
            result: None,
        });
        assert!(html.contains("value=\"Chef &quot;Gordon&quot;\""));
        assert!(html.contains(">&lt;script&gt;</textarea>"));
    }

    #[test]
    fn result_sections_are_rendered() {
        let result = ContentResult {
            titles: vec!["One & Two".into(), "Three".into()],
            description: "A <great> day".into(),
            hashtags: vec!["#sun".into(), "#sea".into()],
            image: Some(GeneratedImage::from_bytes("image/png", &[1, 2, 3])),
        };
        let html = render_page(&PageView {
            profession: "Photographer",
            prompt: "beach",
            result: Some(&result),
        });

        assert!(html.contains("<li>One &amp; Two</li>"));
        assert!(html.contains("<li>Three</li>"));
        assert!(html.contains("<p>A &lt;great&gt; day</p>"));
        assert!(html.contains("<span>#sun</span><span>#sea</span>"));
        assert!(html.contains("src=\"data:image/png;base64,AQID\""));
    }

    #[test]
    fn missing_image_renders_no_img_tag() {
        let result = ContentResult::default();
        let html = render_page(&PageView {
            result: Some(&result),
            ..PageView::default()
        });
        assert!(html.contains("class=\"results\""));
        assert!(!html.contains("<img"));
    }
}
