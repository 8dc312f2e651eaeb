//! Folder-name filters
//!
//! NAS boxes and desktop OSes drop their own bookkeeping folders next to the
//! content (recycle bins, thumbnail caches, snapshots). These must never show
//! up as categories, works or navigation pages.

/// Folder reserved for site-wide home and navigation content
pub const HOME_FOLDER: &str = "home";

/// Artifact names rejected on exact match
const SYSTEM_NAMES: &[&str] = &[
    "$RECYCLE.BIN",
    "#recycle",
    "#snapshot",
    "@eaDir",
    "@Recycle",
    "@Recently-Snapshot",
    "@tmp",
    ".DS_Store",
    ".Trashes",
    ".Trash",
    ".Spotlight-V100",
    ".fseventsd",
    ".TemporaryItems",
    ".AppleDouble",
    "Network Trash Folder",
    "Temporary Items",
    "System Volume Information",
    "lost+found",
    "Thumbs.db",
    "desktop.ini",
];

/// Artifact name prefixes (hidden files, Synology/QNAP service folders)
const SYSTEM_PREFIXES: &[&str] = &[".", "@", "#recycle", "#snapshot", "$RECYCLE"];

fn is_system_name(name: &str) -> bool {
    SYSTEM_NAMES.contains(&name) || SYSTEM_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Whether a folder under a category may be listed as a work
pub fn is_valid_work_name(name: &str) -> bool {
    !name.is_empty() && !is_system_name(name)
}

/// Whether a folder under the content root may be listed as a category
pub fn is_valid_category_name(name: &str) -> bool {
    is_valid_work_name(name) && name != HOME_FOLDER
}

/// Whether a name taken from a request can be joined onto a path safely
pub(crate) fn is_single_segment(name: &str) -> bool {
    !name.contains('/') && !name.contains('\\') && !name.contains('\0')
}
