//! HTML helper functions

use super::url::{display_host, script_safe_url};

/// Body of the page rendered when a document could not be parsed
pub const PARSE_FAILED_HTML: &str = "<p>内容解析失败</p>";

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Label shown on a link card
///
/// Falls back to the host name when the author wrote no text or repeated the URL.
pub fn card_label(text: &str, href: &str) -> String {
    let text = text.trim();
    if text.is_empty() || text == href {
        display_host(href).unwrap_or_else(|| href.to_string())
    } else {
        text.to_string()
    }
}

/// Generate the clickable card that replaces an external link
///
/// # Examples
/// ```ignore
/// link_card("Docs", "https://docs.rs") // -> <div class="link-card" onclick="window.open(...)">...
/// ```
pub fn link_card(label: &str, href: &str) -> String {
    format!(
        concat!(
            r#"<div class="link-card" onclick="window.open('{}', '_blank')">"#,
            r#"<div class="link-card-content">"#,
            r#"<div class="link-card-title">{}</div>"#,
            r#"<div class="link-card-url">{}</div>"#,
            r#"<div class="link-card-arrow">→</div>"#,
            "</div></div>"
        ),
        script_safe_url(href),
        html_escape(label),
        html_escape(href)
    )
}

/// Page body used for a work folder without a description file
pub fn placeholder_page(name: &str) -> String {
    format!(
        "<h1>{}</h1><p>这是一个作品展示页面。</p>",
        html_escape(name)
    )
}
