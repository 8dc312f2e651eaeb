//! Category, Work and page models
//!
//! All of these are derived from the filesystem on every request and never
//! persisted. Field names serialize in camelCase for the JSON API.

use serde::Serialize;

/// Image extensions, lowercase, without the dot
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Video extensions, lowercase, without the dot
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// A top-level content folder
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Folder name
    pub name: String,

    /// Path relative to the content root
    pub path: String,

    /// Number of listed works
    pub work_count: usize,

    /// Public URL of the first available work cover
    pub cover_image: Option<String>,
}

/// Kind of a media file, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Unknown,
}

impl MediaType {
    /// Classify a lowercase extension
    pub fn from_extension(ext: &str) -> Self {
        if IMAGE_EXTENSIONS.contains(&ext) {
            MediaType::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            MediaType::Video
        } else {
            MediaType::Unknown
        }
    }
}

/// An image or video inside a work folder
#[derive(Debug, Clone, Serialize)]
pub struct MediaFile {
    pub name: String,

    /// Public URL
    pub path: String,

    #[serde(rename = "type")]
    pub kind: MediaType,
}

/// A work folder inside a category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub category: String,

    /// Folder name
    pub name: String,

    /// First `# ` heading, else the folder name
    pub title: String,

    /// Path relative to the content root
    pub path: String,

    pub cover_image: Option<String>,

    /// Images and videos, sorted by file name
    pub media_files: Vec<MediaFile>,

    /// Whether a description file was found and read
    pub has_markdown: bool,

    /// Raw Markdown of the description file
    pub content: String,

    pub is_recommended: bool,
}

/// A work together with its rendered description
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetail {
    #[serde(flatten)]
    pub work: Work,

    pub parsed_content: ParsedDocument,
}

/// A sub-page of the home folder, used for site navigation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavPage {
    pub category: String,

    /// Folder name
    pub name: String,

    /// Always the folder name
    pub title: String,

    /// Path relative to the content root
    pub path: String,

    pub media_files: Vec<MediaFile>,

    pub has_markdown: bool,

    pub content: String,

    pub parsed_content: ParsedDocument,
}

/// The site home document (`home/home.md`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeConfig {
    pub title: String,
    pub content: String,
    pub parsed_content: ParsedDocument,
}

/// Rendered Markdown plus what was extracted from it
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub html: String,
    pub metadata: Metadata,
    pub raw_content: String,
}

impl ParsedDocument {
    /// Document shown when rendering failed
    pub fn failed(raw: &str) -> Self {
        Self {
            html: crate::helpers::PARSE_FAILED_HTML.to_string(),
            metadata: Metadata::default(),
            raw_content: raw.to_string(),
        }
    }

    /// Document shown for a folder without a description file
    pub fn placeholder(name: &str) -> Self {
        Self {
            html: crate::helpers::placeholder_page(name),
            metadata: Metadata::default(),
            raw_content: String::new(),
        }
    }
}

/// Metadata extracted from raw Markdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub links: Vec<Link>,
}

/// A `[text](url)` occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// An `![alt](src)` reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub alt: String,
    pub src: String,
}
