//! Content module - scans the content tree and renders descriptions

mod error;
mod filter;
mod fs;
mod markdown;
pub mod metadata;
mod model;
mod scanner;
pub mod transform;

pub use error::{ContentError, RenderError};
pub use filter::{is_valid_category_name, is_valid_work_name, HOME_FOLDER};
pub use fs::{ContentFs, DirEntry, EntryKind, LocalFs};
pub use markdown::{MarkdownRenderer, DEFAULT_MEDIA_PREFIX};
pub use model::{
    Category, HomeConfig, ImageRef, Link, MediaFile, MediaType, Metadata, NavPage, ParsedDocument,
    Work, WorkDetail, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};
pub use scanner::{ContentScanner, DESCRIPTION_FILE, HOME_FILE};
