//! Text stages that run before Markdown parsing
//!
//! Each stage is a pure `&str -> String` function. They run in this order:
//!
//! 1. [`rewrite_media_links`]: relative image and `<video>` sources become
//!    public URLs under the work's media base. Absolute sources are untouched.
//! 2. [`linkify_bare_urls`]: bare `http(s)://` URLs become `[host](url)` so
//!    the renderer turns them into link cards.
//! 3. [`amplify_blank_lines`]: blank lines between blocks become explicit
//!    `<br>` blocks so the author's spacing survives rendering.
//!
//! Stages 2 and 3 leave fenced code blocks alone. Stage 2 also leaves URLs
//! inside code spans, link text and targets, reference definitions and HTML
//! tags or anchors untouched. Bare URLs end at the first non-ASCII character.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

use crate::helpers::{display_host, is_absolute_src};

lazy_static! {
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref VIDEO_RE: Regex = Regex::new(r"(?s)<video[^>]*>.*?</video>").unwrap();
    static ref SRC_ATTR_RE: Regex = Regex::new(r#"src="([^"]+)""#).unwrap();
    static ref BARE_URL_RE: Regex =
        Regex::new(r#"https?://[[\x21-\x7E]&&[^<>"{}|\\^`\[\]]]+"#).unwrap();
    // Reference definitions, raw anchors with their text, any other tag,
    // and link or image constructs with their targets
    static ref PROTECTED_RE: Regex = Regex::new(
        r"(?ims)^[ \t]{0,3}\[[^\]\n]+\]:[^\n]*|<a\b[^>]*>.*?</a>|</?[a-z][^<>]*>|!?\[[^\]\n]*\](?:\([^)\n]*\))?"
    )
    .unwrap();
}

/// Sentence punctuation that is never the last character of a bare URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Resolve a relative media source against `base`
fn resolve_src(src: &str, base: &str) -> Option<String> {
    if is_absolute_src(src) {
        return None;
    }
    let relative = src.strip_prefix("./").unwrap_or(src);
    Some(format!("{}/{}", base, relative))
}

/// Stage 1: rewrite relative media sources to live under `base`
///
/// `base` is the public URL of the owning folder, e.g. `/content/Art/Sunset`.
pub fn rewrite_media_links(content: &str, base: &str) -> String {
    let content = IMAGE_RE.replace_all(content, |caps: &Captures| match resolve_src(&caps[2], base) {
        Some(src) => format!("![{}]({})", &caps[1], src),
        None => caps[0].to_string(),
    });

    VIDEO_RE
        .replace_all(&content, |video: &Captures| {
            SRC_ATTR_RE
                .replace_all(&video[0], |caps: &Captures| match resolve_src(&caps[1], base) {
                    Some(src) => format!(r#"src="{}""#, src),
                    None => caps[0].to_string(),
                })
                .into_owned()
        })
        .into_owned()
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Drop sentence punctuation and unbalanced closing parens from a URL match
fn trim_url(url: &str) -> &str {
    let mut end = url.len();
    loop {
        let head = &url[..end];
        let Some(last) = head.chars().next_back() else {
            break;
        };
        let unbalanced_paren = last == ')' && head.matches('(').count() < head.matches(')').count();
        if TRAILING_PUNCTUATION.contains(&last) || unbalanced_paren {
            end -= last.len_utf8();
        } else {
            break;
        }
    }
    &url[..end]
}

/// Byte ranges of inline code spans
///
/// A run of backticks opens a span that the next run of the same length
/// closes. An unclosed run is literal text.
fn code_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let run_end = |mut i: usize| {
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }
        i
    };

    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        let start = i;
        i = run_end(i);
        let width = i - start;

        let mut j = i;
        while j < bytes.len() {
            if bytes[j] != b'`' {
                j += 1;
                continue;
            }
            let close = run_end(j);
            if close - j == width {
                spans.push(start..close);
                i = close;
                break;
            }
            j = close;
        }
    }
    spans
}

/// Byte ranges where a URL already belongs to some construct
fn protected_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = code_spans(text);
    spans.extend(PROTECTED_RE.find_iter(text).map(|m| m.range()));
    spans
}

fn linkify_text(text: &str, out: &mut String) {
    let protected = protected_spans(text);
    let mut last = 0;
    for m in BARE_URL_RE.find_iter(text) {
        if protected.iter().any(|span| span.contains(&m.start())) {
            continue;
        }

        let url = trim_url(m.as_str());
        if !url.contains("://") || url.ends_with("://") {
            continue;
        }

        let label = display_host(url).unwrap_or_else(|| url.to_string());
        out.push_str(&text[last..m.start()]);
        out.push_str(&format!("[{}]({})", label, url));
        last = m.start() + url.len();
    }
    out.push_str(&text[last..]);
}

/// Stage 2: wrap bare URLs into `[host](url)` Markdown links
///
/// Text between fences is linkified block by block, so code spans and
/// anchors that wrap across lines are still recognised.
pub fn linkify_bare_urls(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut block = String::new();
    let mut in_fence = false;

    for line in content.split_inclusive('\n') {
        if is_fence(line) {
            if !in_fence {
                linkify_text(&block, &mut out);
                block.clear();
            }
            in_fence = !in_fence;
            out.push_str(line);
        } else if in_fence {
            out.push_str(line);
        } else {
            block.push_str(line);
        }
    }
    linkify_text(&block, &mut out);

    out
}

/// Stage 3: turn blank lines between blocks into `<br>` blocks
///
/// A run of `n` blank lines yields `max(1, n - 1)` breaks. Leading and
/// trailing blank lines are dropped; lines inside fences are kept verbatim.
pub fn amplify_blank_lines(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut blank_run = 0usize;
    let mut in_fence = false;

    for line in content.lines() {
        if in_fence {
            out.push_str(line);
            out.push('\n');
            if is_fence(line) {
                in_fence = false;
            }
            continue;
        }

        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }

        if blank_run > 0 && !out.is_empty() {
            let breaks = blank_run.saturating_sub(1).max(1);
            out.push('\n');
            out.push_str(&vec!["<br>"; breaks].join("\n"));
            out.push_str("\n\n");
        }
        blank_run = 0;

        if is_fence(line) {
            in_fence = true;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
