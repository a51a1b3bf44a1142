// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Per-row brief and batch instruction.
//
// Missing sheet cells fall back to fixed defaults. The platform picks an image
// style and the font style picks typography hints, both by case-insensitive
// substring match against ordered lookup tables; the first hit wins.

use super::sheet::SheetRow;

pub const DEFAULT_BRAND: &str = "Social Media Manager";
pub const DEFAULT_TOPIC: &str = "Create engaging social media content";
pub const DEFAULT_PLATFORM: &str = "General social media";
pub const DEFAULT_POST_TYPE: &str = "Standard post";
pub const DEFAULT_FONT_STYLE: &str = "Professional";

/// Used when no platform key matches.
pub const DEFAULT_IMAGE_STYLE: &str = "balanced composition with appropriate text overlay";

const PLATFORM_IMAGE_STYLES: &[(&str, &str)] = &[
    ("instagram", "square format with vibrant colors and lifestyle focus"),
    ("facebook", "engaging with clear focal point and moderate text overlay"),
    ("twitter", "clear and sharp with minimal text overlay"),
    (
        "linkedin",
        "professional looking with business-appropriate imagery and clean text layout",
    ),
    ("pinterest", "vertical format with inspirational style and clear typography"),
    ("tiktok", "dynamic and trendy with bold text elements"),
    ("youtube", "high contrast thumbnail style with prominent text"),
];

// The first entry doubles as the fallback.
const FONT_CHARACTERISTICS: &[(&str, &str)] = &[
    (
        "professional",
        "clean sans-serif fonts like Arial or Helvetica with professional color scheme",
    ),
    ("casual", "friendly rounded fonts with vibrant colors"),
    (
        "elegant",
        "serif fonts like Georgia or Garamond with sophisticated color palette",
    ),
    ("bold", "heavy weight fonts with high contrast colors"),
    ("minimalist", "thin, simple fonts with plenty of white space"),
    ("creative", "unique stylized fonts with artistic color combinations"),
    ("vintage", "retro-style typography with muted or aged color palette"),
    ("modern", "contemporary geometric fonts with trendy color schemes"),
];

fn lookup(table: &'static [(&'static str, &'static str)], value: &str) -> Option<&'static str> {
    let value = value.to_lowercase();
    table
        .iter()
        .find(|(key, _)| value.contains(key))
        .map(|(_, hint)| *hint)
}

/// Image style hint for a platform name such as `"Instagram Reels"`.
pub fn image_style(platform: &str) -> &'static str {
    lookup(PLATFORM_IMAGE_STYLES, platform).unwrap_or(DEFAULT_IMAGE_STYLE)
}

/// Typography hint for a font style name; unknown styles read as professional.
pub fn font_characteristics(font_style: &str) -> &'static str {
    lookup(FONT_CHARACTERISTICS, font_style).unwrap_or(FONT_CHARACTERISTICS[0].1)
}

/// A sheet row with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBrief {
    pub brand: String,
    pub topic: String,
    pub platform: String,
    pub post_type: String,
    pub font_style: String,
}

impl PostBrief {
    pub fn from_row(row: &SheetRow) -> Self {
        let or = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };
        Self {
            brand: or(&row.brand_name, DEFAULT_BRAND),
            topic: row
                .prompt
                .clone()
                .or_else(|| row.content.clone())
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            platform: or(&row.platform_type, DEFAULT_PLATFORM),
            post_type: or(&row.type_of_post, DEFAULT_POST_TYPE),
            font_style: or(&row.font_style, DEFAULT_FONT_STYLE),
        }
    }

    /// The instruction sent to the model for this row. Asks for a JSON reply
    /// with three titles, one description and five hashtags plus an image.
    pub fn instruction(&self) -> String {
        let PostBrief {
            brand,
            topic,
            platform,
            post_type,
            font_style,
        } = self;
        let image_style = image_style(platform);
        let typography = font_characteristics(font_style);

        format!(
            "
        You are a professional content creator for {brand}.

        IMPORTANT REQUIREMENTS:
        1. Create {platform} content about: {topic}
        2. The content MUST be relevant to the brand \"{brand}\"
        3. Use font style that matches: {font_style}

        IMAGE GENERATION REQUIREMENTS (EXTREMELY IMPORTANT):
        1. Generate a HIGH-QUALITY {image_style} image that PERFECTLY represents the content
        2. The image MUST include these elements:
           - Visual representation of the main subject: \"{topic}\"
           - Brand name \"{brand}\" should be visible if appropriate
           - Color scheme and mood should match the {post_type} content type
           - Use {typography} for any text elements
        3. Text overlay requirements:
           - Include a SHORT, IMPACTFUL headline (5 words max)
           - Text must be HIGHLY READABLE against the background (good contrast)
           - Position text in the most visually effective area (rule of thirds)
           - Text size should be appropriate for {platform} viewing
        4. The image should convey the main message even without reading the description
        5. Visual style should be cohesive with both the brand identity and content topic

        Format your response EXACTLY as this JSON structure (no additional text before or after):
        {{
          \"titles\": [\"Title 1\", \"Title 2\", \"Title 3\"],
          \"description\": \"A compelling description that relates to {brand} and {topic}\",
          \"hashtags\": [\"#tag1\", \"#tag2\", \"#tag3\", \"#tag4\", \"#tag5\"]
        }}

        Rules:
        - Provide exactly 3 titles
        - Provide exactly 1 description (2-3 sentences)
        - Provide exactly 5 hashtags with # symbol
        - All content must be relevant to {brand} and {topic}
        - Generate a professional {platform} image that FULLY incorporates all the image requirements above
      "
        )
    }
}
