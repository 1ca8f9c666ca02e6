//! Text to note markup conversion
//!
//! Notes are ENML-style documents: an XML declaration, a DOCTYPE and a single
//! `<en-note>` element holding XHTML. Plain text becomes one `<div>` per line;
//! markdown is rendered to HTML. Decoding goes the other way as closely as a
//! tag-stripping pass can: block elements become line breaks, headings and
//! list items keep their markdown markers.

use crate::sanitize::find_control_char;
use crate::{Error, Format, Result};
use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};
use std::sync::LazyLock;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const DOCTYPE: &str = r#"<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">"#;

static PROLOG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?xml[^>]*\?>|<!DOCTYPE[^>]*>").unwrap());
static EN_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?en-note[^>]*>").unwrap());
static EMPTY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<div[^>]*>\s*<br\s*/?>\s*</div>").unwrap());
static PRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pre[^>]*>\s*<code[^>]*>(.*?)</code>\s*</pre>\s*").unwrap()
});
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<h([1-6])[^>]*>").unwrap());
static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?(strong|b)>").unwrap());
static EM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?(em|i)>").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?code[^>]*>").unwrap());
static TODO_CHECKED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<en-todo\s+checked="true"\s*/>"#).unwrap());
static TODO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<en-todo[^>]*/>").unwrap());
static LIST_ITEM_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<li[^>]*>").unwrap());
static LIST_ITEM_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</li>\s*").unwrap());
static LIST_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(ul|ol)[^>]*>\s*").unwrap());
static LIST_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</(ul|ol)>").unwrap());
static BLOCK_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(div|p|h[1-6]|blockquote)>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Converts between local text and note markup.
pub trait Transcoder {
    /// Convert local text in `format` into note markup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the text cannot be represented in
    /// markup (for example, it still contains control characters).
    fn encode(&self, text: &str, format: Format) -> Result<String>;

    /// Convert note markup back into local text.
    fn decode(&self, markup: &str) -> String;
}

/// ENML-style markup used by the note service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteMarkup;

impl NoteMarkup {
    pub fn new() -> Self {
        Self
    }

    fn plain_body(text: &str) -> String {
        let mut body = String::new();
        for line in text.lines() {
            if line.is_empty() {
                body.push_str("<div><br/></div>");
            } else {
                body.push_str("<div>");
                body.push_str(&html_escape::encode_text(line));
                body.push_str("</div>");
            }
        }
        body
    }

    fn markdown_body(text: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(text, options);
        let mut body = String::new();
        html::push_html(&mut body, parser);
        body
    }
}

impl Transcoder for NoteMarkup {
    fn encode(&self, text: &str, format: Format) -> Result<String> {
        if let Some((position, c)) = find_control_char(text) {
            return Err(Error::InvalidEncoding {
                message: format!(
                    "control character U+{:04X} at byte {}",
                    c as u32, position
                ),
            });
        }

        let body = match format {
            Format::Plain => Self::plain_body(text),
            Format::Markdown => Self::markdown_body(text),
        };

        Ok(format!(
            "{}\n{}\n<en-note>{}</en-note>",
            XML_DECLARATION, DOCTYPE, body
        ))
    }

    fn decode(&self, markup: &str) -> String {
        let text = PROLOG_RE.replace_all(markup, "");
        let text = EN_NOTE_RE.replace_all(&text, "");

        let text = EMPTY_LINE_RE.replace_all(&text, "\n");
        let text = PRE_RE.replace_all(&text, |caps: &Captures| {
            format!("```\n{}\n```\n\n", caps[1].trim_end_matches('\n'))
        });
        let text = BR_RE.replace_all(&text, "\n");

        let text = HEADING_RE.replace_all(&text, |caps: &Captures| {
            let level: usize = caps[1].parse().unwrap_or(1);
            format!("{} ", "#".repeat(level))
        });
        let text = STRONG_RE.replace_all(&text, "**");
        let text = EM_RE.replace_all(&text, "*");
        let text = CODE_RE.replace_all(&text, "`");

        let text = TODO_CHECKED_RE.replace_all(&text, "[x] ");
        let text = TODO_RE.replace_all(&text, "[ ] ");
        let text = LIST_OPEN_RE.replace_all(&text, "");
        let text = LIST_ITEM_OPEN_RE.replace_all(&text, "- ");
        let text = LIST_ITEM_CLOSE_RE.replace_all(&text, "\n");
        let text = LIST_CLOSE_RE.replace_all(&text, "\n");

        let text = BLOCK_CLOSE_RE.replace_all(&text, "\n");
        let text = TAG_RE.replace_all(&text, "");
        let text = html_escape::decode_html_entities(&text);

        let trimmed = text.trim_matches('\n');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        }
    }
}
