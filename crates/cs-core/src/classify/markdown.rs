//! Markdown detection and a small line-oriented markdown to HTML converter.
//!
//! The converter handles the subset people actually paste: headings,
//! emphasis, inline code, fenced code, links, lists, blockquotes and
//! horizontal rules. It walks the input line by line and never recurses,
//! so every input produces output in linear time.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum [`markdown_score`] for text to be treated as markdown.
pub const MARKDOWN_THRESHOLD: u32 = 3;

const HEADING_SCORE: u32 = 3;
const LIST_ITEM_SCORE: u32 = 1;
const BOLD_SCORE: u32 = 1;
const LINK_SCORE: u32 = 2;
const BLOCKQUOTE_SCORE: u32 = 1;
const FENCE_SCORE: u32 = 2;

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\. (.*)$").expect("valid ordered item regex"));
static BOLD_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*[^*\n]+?\*\*|__[^_\n]+?__").expect("valid bold regex"));
static LINK_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]\n]+\]\([^)\s]+\)").expect("valid link regex"));

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("valid link regex"));
static BOLD_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid bold italic regex"));
static BOLD_STARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static BOLD_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid bold regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));

/// Sum of markdown signals found in `text`.
pub fn markdown_score(text: &str) -> u32 {
    let mut score = 0;

    for line in text.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            score += FENCE_SCORE;
            continue;
        }

        if heading(trimmed).is_some() {
            score += HEADING_SCORE;
        } else if trimmed.starts_with("- ") || ORDERED_ITEM.is_match(trimmed) {
            score += LIST_ITEM_SCORE;
        } else if trimmed.starts_with("> ") {
            score += BLOCKQUOTE_SCORE;
        }

        score += BOLD_ANY.find_iter(line).count() as u32 * BOLD_SCORE;
        score += LINK_ANY.find_iter(line).count() as u32 * LINK_SCORE;
    }

    score
}

pub fn is_markdown_content(text: &str) -> bool {
    markdown_score(text) >= MARKDOWN_THRESHOLD
}

/// ATX heading level and text. Only `#`, `##` and `###` followed by a space count.
fn heading(line: &str) -> Option<(usize, &str)> {
    [("### ", 3), ("## ", 2), ("# ", 1)]
        .into_iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|rest| (level, rest)))
}

fn ordered_item(line: &str) -> Option<&str> {
    ORDERED_ITEM
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Accumulates finished blocks plus the list or blockquote run in progress.
#[derive(Default)]
struct HtmlBlocks {
    blocks: Vec<String>,
    list: Option<(ListKind, Vec<String>)>,
    quote: Vec<String>,
}

impl HtmlBlocks {
    fn push(&mut self, block: String) {
        self.close_runs();
        self.blocks.push(block);
    }

    fn push_list_item(&mut self, kind: ListKind, item: String) {
        self.close_quote();
        match &mut self.list {
            Some((open_kind, items)) if *open_kind == kind => items.push(item),
            _ => {
                self.close_list();
                self.list = Some((kind, vec![item]));
            }
        }
    }

    fn push_quote_line(&mut self, line: String) {
        self.close_list();
        self.quote.push(line);
    }

    fn close_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            let items: String = items
                .iter()
                .map(|item| format!("<li>{item}</li>"))
                .collect();
            self.blocks
                .push(format!("<{tag}>{items}</{tag}>", tag = kind.tag()));
        }
    }

    fn close_quote(&mut self) {
        if !self.quote.is_empty() {
            let lines = std::mem::take(&mut self.quote).join("<br>");
            self.blocks.push(format!("<blockquote>{lines}</blockquote>"));
        }
    }

    fn close_runs(&mut self) {
        self.close_list();
        self.close_quote();
    }

    fn finish(mut self) -> String {
        self.close_runs();
        self.blocks.join("\n")
    }
}

/// Convert markdown to an HTML fragment.
///
/// Literal text is escaped before any markup is inserted. An unterminated
/// code fence runs to the end of the input and is closed there.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut html = HtmlBlocks::default();
    let mut code: Option<Vec<String>> = None;

    for line in markdown.lines() {
        if let Some(lines) = code.as_mut() {
            if line.trim_start().starts_with("```") {
                let block = code_block(lines);
                html.push(block);
                code = None;
            } else {
                lines.push(escape_html(line));
            }
            continue;
        }

        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            html.close_runs();
            code = Some(Vec::new());
        } else if trimmed.is_empty() {
            html.close_runs();
        } else if trimmed == "---" || trimmed == "***" {
            html.push("<hr>".to_string());
        } else if let Some((level, text)) = heading(trimmed) {
            html.push(format!("<h{level}>{}</h{level}>", render_inline(text.trim())));
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            html.push_list_item(ListKind::Unordered, render_inline(item.trim()));
        } else if let Some(item) = ordered_item(trimmed) {
            html.push_list_item(ListKind::Ordered, render_inline(item.trim()));
        } else if let Some(quoted) = trimmed.strip_prefix("> ") {
            html.push_quote_line(render_inline(quoted.trim()));
        } else {
            html.push(format!("<p>{}</p>", render_inline(trimmed)));
        }
    }

    if let Some(lines) = code {
        html.push(code_block(&lines));
    }

    html.finish()
}

fn code_block(lines: &[String]) -> String {
    format!("<pre><code>{}</code></pre>", lines.join("\n"))
}

/// Render inline markup. Backtick spans are emitted verbatim (escaped) and
/// never receive emphasis or link processing.
fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('`') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('`') else {
            break;
        };
        out.push_str(&render_spans(&escape_html(&rest[..start])));
        out.push_str("<code>");
        out.push_str(&escape_html(&after[..end]));
        out.push_str("</code>");
        rest = &after[end + 1..];
    }

    out.push_str(&render_spans(&escape_html(rest)));
    out
}

fn render_spans(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut last = 0;

    // hrefs are emitted verbatim; emphasis only applies outside them
    for link in LINK.captures_iter(escaped) {
        let (Some(whole), Some(label), Some(href)) = (link.get(0), link.get(1), link.get(2)) else {
            continue;
        };
        out.push_str(&render_emphasis(&escaped[last..whole.start()]));
        out.push_str("<a href=\"");
        out.push_str(href.as_str());
        out.push_str("\">");
        out.push_str(&render_emphasis(label.as_str()));
        out.push_str("</a>");
        last = whole.end();
    }

    out.push_str(&render_emphasis(&escaped[last..]));
    out
}

fn render_emphasis(text: &str) -> String {
    let text = BOLD_ITALIC.replace_all(text, "<strong><em>${1}</em></strong>");
    let text = BOLD_STARS.replace_all(&text, "<strong>${1}</strong>");
    let text = BOLD_UNDERSCORES.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    text.into_owned()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
