//! Line-based extraction from raw Markdown: titles, metadata, markers
//!
//! The scanner uses [`resolve_title`] and the markers; the renderer uses
//! [`extract_metadata`] and [`strip_leading_heading`]. [`extract_title`],
//! [`extract_images`] and [`extract_videos`] are library API for callers
//! that inspect a document on its own, such as the `show` command.

use lazy_static::lazy_static;
use regex::Regex;

use super::model::{ImageRef, Link, Metadata};

/// Title used when neither a heading nor a folder name is available
pub const UNTITLED: &str = "未命名作品";

/// Marker that features a work, in a file name or in the description text
pub const RECOMMEND_MARKER: &str = "[推荐]";

/// Older tag-style markers, honoured in description text only
const LEGACY_RECOMMEND_TAGS: &[&str] = &["#推荐", "# 推荐"];

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"#([^#\s]+)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref VIDEO_RE: Regex = Regex::new(r"(?s)<video[^>]*>.*?</video>").unwrap();
    static ref SRC_ATTR_RE: Regex = Regex::new(r#"src="([^"]+)""#).unwrap();
}

/// Text of the first level-1 heading, if any
pub fn extract_heading(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
}

/// Title of a document: its first level-1 heading, or [`UNTITLED`]
pub fn extract_title(content: &str) -> String {
    extract_heading(content).unwrap_or(UNTITLED).to_string()
}

/// Title of a work: heading, then folder name, then [`UNTITLED`]
pub fn resolve_title(content: Option<&str>, folder_name: &str) -> String {
    content
        .and_then(extract_heading)
        .or_else(|| Some(folder_name.trim()).filter(|n| !n.is_empty()))
        .unwrap_or(UNTITLED)
        .to_string()
}

/// Drop the heading line when it is the first non-blank line of the document
pub fn strip_leading_heading(content: &str) -> &str {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            offset += line.len();
            continue;
        }
        if trimmed.starts_with("# ") {
            return &content[offset + line.len()..];
        }
        break;
    }
    content
}

/// Whether description text carries a recommendation marker
pub fn has_recommend_marker(content: &str) -> bool {
    content.contains(RECOMMEND_MARKER)
        || LEGACY_RECOMMEND_TAGS
            .iter()
            .any(|tag| content.contains(tag))
}

/// Extract title, description, tags and links from raw Markdown
pub fn extract_metadata(content: &str) -> Metadata {
    let mut metadata = Metadata::default();
    let mut has_title = false;

    for line in content.lines() {
        let line = line.trim();

        if let Some(title) = line.strip_prefix("# ") {
            if !has_title {
                metadata.title = title.trim().to_string();
                has_title = true;
            }
        } else if !line.is_empty()
            && metadata.description.is_empty()
            && !line.starts_with('#')
            && !line.starts_with('!')
            && !line.starts_with('<')
        {
            metadata.description = line.to_string();
        }

        if line.starts_with('#') {
            metadata
                .tags
                .extend(TAG_RE.captures_iter(line).map(|c| c[1].to_string()));
        }

        metadata.links.extend(LINK_RE.captures_iter(line).map(|c| Link {
            text: c[1].to_string(),
            url: c[2].to_string(),
        }));
    }

    metadata
}

/// Every `![alt](src)` reference, in document order
pub fn extract_images(content: &str) -> Vec<ImageRef> {
    IMAGE_RE
        .captures_iter(content)
        .map(|c| ImageRef {
            alt: c[1].to_string(),
            src: c[2].to_string(),
        })
        .collect()
}

/// The first `src` of every `<video>` element, in document order
pub fn extract_videos(content: &str) -> Vec<String> {
    VIDEO_RE
        .find_iter(content)
        .filter_map(|m| SRC_ATTR_RE.captures(m.as_str()).map(|c| c[1].to_string()))
        .collect()
}
