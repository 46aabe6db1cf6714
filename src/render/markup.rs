//! Best-effort conversion of review markup into email-safe HTML.
//!
//! This is a handful of line-oriented regex passes, not a markdown parser.
//! The input is always HTML-escaped before any pass runs, so nothing the
//! reviewer wrote can reach the output as live markup. Nested constructs
//! (a fence inside a list item, a list inside a heading) come out however
//! the passes happen to leave them.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const H2_STYLE: &str = "color: #0366d6; margin: 16px 0 12px 0; font-size: 18px;";
const H3_STYLE: &str = "color: #0366d6; margin: 14px 0 10px 0; font-size: 16px;";
const UL_STYLE: &str = "margin: 12px 0; padding-left: 20px;";
const CODE_STYLE: &str =
    "background: #f6f8fa; padding: 2px 4px; border-radius: 3px; font-family: monospace;";
const PRE_STYLE: &str = "background: #f6f8fa; border: 1px solid #e1e4e8; border-radius: 6px; \
     padding: 12px; overflow-x: auto; font-family: monospace; margin: 12px 0;";
const REVIEW_BLOCK_STYLE: &str = "margin-bottom: 20px; padding: 15px; background: #f8f9fa; \
     border-left: 4px solid white; border-radius: 4px;";

/// Escaped collapsible-section tags. Mail clients cannot fold content, so
/// the tags are dropped and their content is shown inline.
const COLLAPSIBLE_TAGS: &[&str] = &[
    "&lt;details&gt;",
    "&lt;/details&gt;",
    "&lt;summary&gt;",
    "&lt;/summary&gt;",
];

/// Private-use character marking a lifted code fence.
const FENCE_MARK: char = '\u{E000}';

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:[\w+.#-]*\n)?(.*?)```").expect("valid fence regex"));
static FENCE_MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}(\\d+)\u{E000}").expect("valid fence mark regex"));
static H2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").expect("valid h2 regex"));
static H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.+)$").expect("valid h3 regex"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (.+)$").expect("valid list item regex"));
static LIST_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<li>.*?</li>(?:\s*<li>.*?</li>)*").expect("valid list run regex")
});
static LIST_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</li>\s+<li>").expect("valid list gap regex"));
static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code regex"));

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one review body as an HTML fragment.
pub fn format_review_html(body: &str) -> String {
    let normalized = body.replace("\r\n", "\n").replace(FENCE_MARK, "");
    let escaped = escape_html(&normalized);

    // Fences are lifted out first so the line passes below never see
    // their content.
    let mut fences: Vec<String> = Vec::new();
    let html = FENCE_RE.replace_all(&escaped, |caps: &Captures| {
        let code = caps[1].trim_end_matches('\n');
        fences.push(format!(
            "<pre style=\"{PRE_STYLE}\"><code>{code}</code></pre>"
        ));
        format!("{FENCE_MARK}{}{FENCE_MARK}", fences.len() - 1)
    });

    let html = H2_RE.replace_all(&html, format!("<h2 style=\"{H2_STYLE}\">${{1}}</h2>"));
    let html = H3_RE.replace_all(&html, format!("<h3 style=\"{H3_STYLE}\">${{1}}</h3>"));

    let html = LIST_ITEM_RE.replace_all(&html, "<li>${1}</li>");
    let html = LIST_RUN_RE.replace_all(&html, |caps: &Captures| {
        let items = LIST_GAP_RE.replace_all(&caps[0], "</li><li>");
        format!("<ul style=\"{UL_STYLE}\">{items}</ul>")
    });

    let html = INLINE_CODE_RE.replace_all(
        &html,
        format!("<code style=\"{CODE_STYLE}\">${{1}}</code>"),
    );

    let mut html = html.replace("\n\n", "</p><p>").replace('\n', "<br>");

    for tag in COLLAPSIBLE_TAGS {
        html = html.replace(tag, "");
    }

    let html = FENCE_MARK_RE.replace_all(&html, |caps: &Captures| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|idx| fences.get(idx))
            .cloned()
            .unwrap_or_default()
    });

    format!("<div style=\"line-height: 1.5;\"><p>{html}</p></div>")
}

/// Wrap a formatted review in the labelled block shown in the report.
pub fn render_review_block(bot_display_name: &str, body: &str) -> String {
    format!(
        "<div style=\"{REVIEW_BLOCK_STYLE}\"><strong style=\"color: #0366d6;\">🤖 {} Review:</strong><br>{}</div>",
        escape_html(bot_display_name),
        format_review_html(body)
    )
}
