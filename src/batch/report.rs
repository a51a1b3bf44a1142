// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Batch report export
//
// One printable page per generated post: brand and platform heading, post
// type, font style, numbered titles, description, hashtags, contact details
// when the sheet has them, and the image. Failed rows are left out. Printing
// the file from a browser gives one PDF page per post.

use std::path::{Path, PathBuf};

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::runner::RowReport;
use crate::media::{save_binary_file, MediaError};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Social Media Content</title>
<style>
body { font-family: system-ui, sans-serif; margin: 0; }
.post { padding: 14mm; page-break-after: always; }
.post h1 { font-size: 18pt; margin: 0 0 4mm; }
.post h2 { font-size: 14pt; margin: 5mm 0 2mm; }
.post img { width: 80mm; height: 60mm; object-fit: cover; }
.page { text-align: right; font-size: 10pt; color: #666; }
</style>
</head>
<body>
"#;

/// Report file name for a source sheet, e.g. `posts.xlsx` gives
/// `social-media-content-posts.html`.
pub fn report_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("generated");
    format!("social-media-content-{stem}.html")
}

pub fn render_report(reports: &[RowReport]) -> String {
    let mut html = String::from(HEAD);

    let generated = reports.iter().filter_map(|r| r.post.as_ref().map(|p| (r, p)));
    for (page, (report, post)) in generated.enumerate() {
        let input = &report.input;
        let or = |value: &Option<String>, fallback: &'static str| {
            encode_text(value.as_deref().unwrap_or(fallback)).into_owned()
        };

        html.push_str("<section class=\"post\">\n");
        html.push_str(&format!(
            "<h1>{} - {}</h1>\n<p>Type: {}</p>\n<p>Font Style: {}</p>\n",
            or(&input.brand_name, "Brand"),
            or(&input.platform_type, "Social Media"),
            or(&input.type_of_post, "N/A"),
            or(&input.font_style, "N/A"),
        ));

        html.push_str("<h2>Titles:</h2>\n<ol>\n");
        for title in &post.titles {
            html.push_str(&format!("<li>{}</li>\n", encode_text(title)));
        }
        html.push_str("</ol>\n");

        html.push_str(&format!(
            "<h2>Description:</h2>\n<p>{}</p>\n<h2>Hashtags:</h2>\n<p>{}</p>\n",
            encode_text(&post.description),
            encode_text(&post.hashtags.join(" ")),
        ));

        if input.phone_number.is_some() || input.email_id.is_some() {
            html.push_str("<h2>Contact Information:</h2>\n");
            if let Some(phone) = &input.phone_number {
                html.push_str(&format!("<p>Phone: {}</p>\n", encode_text(phone)));
            }
            if let Some(email) = &input.email_id {
                html.push_str(&format!("<p>Email: {}</p>\n", encode_text(email)));
            }
        }

        if let Some(image) = &post.image {
            html.push_str(&format!(
                "<img alt=\"Generated image\" src=\"{}\">\n",
                encode_double_quoted_attribute(&image.data_url())
            ));
        }

        html.push_str(&format!("<p class=\"page\">Page {}</p>\n</section>\n", page + 1));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Render the report and write it next to the other outputs.
pub fn write_report(dir: &Path, source: &Path, reports: &[RowReport]) -> Result<PathBuf, MediaError> {
    save_binary_file(dir, &report_file_name(source), render_report(reports).as_bytes())
}
