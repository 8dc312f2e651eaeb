//! URL helper functions

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters escaped inside a single path segment.
///
/// Mirrors `encodeURIComponent`, so `/` never survives inside a segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters that would break out of a quoted JavaScript string in an attribute
const SCRIPT_UNSAFE: &AsciiSet = &percent_encoding::CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'`');

lazy_static! {
    static ref HOST_RE: Regex = Regex::new(
        r"^(?i:https?)://(?:[^@/?#\s]*@)?(\[[0-9A-Fa-f:.]+\]|[^:/?#\s\[\]@]+)(?::\d*)?(?:[/?#]|$)"
    )
    .unwrap();
}

/// Encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Build a public URL under `prefix`, encoding every segment independently
///
/// # Examples
/// ```ignore
/// media_url("/content", &["摄影", "日落", "a b.jpg"]) // -> "/content/%E6%91%84.../a%20b.jpg"
/// ```
pub fn media_url<S: AsRef<str>>(prefix: &str, segments: &[S]) -> String {
    let mut url = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(&encode_segment(segment.as_ref()));
    }
    url
}

/// Whether a link target leaves the site
pub fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whether a media source is already absolute (remote or site-rooted)
pub fn is_absolute_src(src: &str) -> bool {
    src.starts_with("http") || src.starts_with('/')
}

/// Host of an http(s) URL with a leading `www.` removed
///
/// Returns `None` when the URL does not parse.
pub fn display_host(url: &str) -> Option<String> {
    let caps = HOST_RE.captures(url)?;
    let host = caps.get(1)?.as_str().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Make a URL safe to embed in `window.open('...')` inside an HTML attribute
pub fn script_safe_url(url: &str) -> String {
    utf8_percent_encode(url, SCRIPT_UNSAFE)
        .to_string()
        .replace('&', "&amp;")
}
