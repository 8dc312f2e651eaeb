//! Markdown rendering with link cards
//!
//! [`MarkdownRenderer::parse`] runs the text stages from
//! [`transform`](super::transform), renders the result with pulldown-cmark,
//! and extracts metadata from the untouched source. It never fails: any
//! error degrades to a placeholder document.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::path::{Component, Path};

use super::error::RenderError;
use super::metadata::{extract_metadata, strip_leading_heading};
use super::model::ParsedDocument;
use super::transform::{amplify_blank_lines, linkify_bare_urls, rewrite_media_links};
use crate::helpers::{card_label, is_external, link_card, media_url};

/// Public prefix the content root is served under unless configured otherwise
pub const DEFAULT_MEDIA_PREFIX: &str = "/content";

/// One top-level item of a folded event stream
enum Node<'a> {
    Event(Event<'a>),
    /// An external link with every event between its start and end
    ExternalLink {
        url: CowStr<'a>,
        children: Vec<Event<'a>>,
    },
}

/// Markdown renderer for work, page and home documents
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    media_prefix: String,
}

impl MarkdownRenderer {
    /// Create a renderer serving media under [`DEFAULT_MEDIA_PREFIX`]
    pub fn new() -> Self {
        Self::with_media_prefix(DEFAULT_MEDIA_PREFIX)
    }

    /// Create a renderer serving media under `prefix`
    ///
    /// The prefix is always site-rooted: `media`, `/media` and `/media/` all
    /// become `/media`. A prefix of only slashes becomes empty.
    pub fn with_media_prefix(prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_matches('/');
        let media_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        Self { media_prefix }
    }

    pub fn media_prefix(&self) -> &str {
        &self.media_prefix
    }

    /// Public URL of a folder, given its path relative to the content root
    pub fn media_base(&self, context: &Path) -> Result<String, RenderError> {
        let mut segments = Vec::new();
        for component in context.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return Err(RenderError::InvalidContext(context.to_path_buf())),
            }
        }

        if segments.is_empty() {
            return Err(RenderError::InvalidContext(context.to_path_buf()));
        }

        Ok(media_url(&self.media_prefix, &segments))
    }

    /// Render a document as-is
    ///
    /// `context` is the owning folder relative to the content root, e.g.
    /// `Art/Sunset`; relative media sources resolve against it.
    pub fn parse(&self, content: &str, context: &Path) -> ParsedDocument {
        self.parse_body(content, content, context)
    }

    /// Render a document whose page shows the title separately
    ///
    /// The leading `# ` heading is left out of the HTML but still feeds the
    /// metadata.
    pub fn parse_page(&self, content: &str, context: &Path) -> ParsedDocument {
        self.parse_body(content, strip_leading_heading(content), context)
    }

    fn parse_body(&self, raw: &str, body: &str, context: &Path) -> ParsedDocument {
        match self.try_render(body, context) {
            Ok(html) => ParsedDocument {
                html,
                metadata: extract_metadata(raw),
                raw_content: raw.to_string(),
            },
            Err(e) => {
                tracing::error!("Failed to parse markdown in {:?}: {}", context, e);
                ParsedDocument::failed(raw)
            }
        }
    }

    fn try_render(&self, body: &str, context: &Path) -> Result<String, RenderError> {
        let base = self.media_base(context)?;
        let processed = rewrite_media_links(body, &base);
        let processed = linkify_bare_urls(&processed);
        let processed = amplify_blank_lines(&processed);
        Ok(self.render(&processed))
    }

    /// Render markdown to HTML
    ///
    /// Raw HTML passes through, soft breaks become `<br />`, and every
    /// `http(s)` link becomes a link card.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let nodes = fold_external_links(parser);

        let mut html_output = String::new();
        html::push_html(&mut html_output, nodes.into_iter().map(Node::into_event));

        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Node<'a> {
    fn into_event(self) -> Event<'a> {
        match self {
            Node::Event(event) => event,
            Node::ExternalLink { url, children } => {
                let text: String = children
                    .iter()
                    .filter_map(|event| match event {
                        Event::Text(text) | Event::Code(text) => Some(text.as_ref()),
                        _ => None,
                    })
                    .collect();
                let card = link_card(&card_label(&text, &url), &url);
                Event::InlineHtml(CowStr::from(card))
            }
        }
    }
}

/// Group each external link with its inner events
///
/// Soft breaks are promoted to hard breaks on the way through.
fn fold_external_links<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Node<'a>> {
    let mut nodes = Vec::new();
    let mut open: Option<(CowStr<'a>, Vec<Event<'a>>)> = None;

    for event in events {
        if open.is_some() {
            if matches!(event, Event::End(TagEnd::Link)) {
                if let Some((url, children)) = open.take() {
                    nodes.push(Node::ExternalLink { url, children });
                }
            } else if let Some((_, children)) = open.as_mut() {
                children.push(event);
            }
            continue;
        }

        match event {
            Event::Start(Tag::Link { dest_url, .. }) if is_external(&dest_url) => {
                open = Some((dest_url, Vec::new()));
            }
            Event::SoftBreak => nodes.push(Node::Event(Event::HardBreak)),
            other => nodes.push(Node::Event(other)),
        }
    }

    if let Some((url, children)) = open {
        nodes.push(Node::ExternalLink { url, children });
    }

    nodes
}
