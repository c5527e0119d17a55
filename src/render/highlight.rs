// src/render/highlight.rs
//! External rendering collaborators: syntax highlighting and media
//! embedding.
//!
//! The block renderer depends on these traits, never on a concrete
//! highlighter, so the page-rendering layer can plug in whatever it
//! ships with.

use super::node::{Element, MarkupNode};
use crate::types::ValidatedUrl;

/// Turns code text plus a highlighter language identifier into
/// pre-rendered markup.
pub trait SyntaxHighlighter: Sync {
    fn highlight(&self, code: &str, language: &str) -> MarkupNode;
}

/// Renders a media URL into an embedded player or frame.
pub trait MediaEmbedder: Sync {
    fn embed(&self, url: &str) -> MarkupNode;
}

/// Fallback highlighter: a `pre > code` element with a language class,
/// no token markup. Safe default when no highlighter is wired in.
pub struct PlainHighlighter;

impl SyntaxHighlighter for PlainHighlighter {
    fn highlight(&self, code: &str, language: &str) -> MarkupNode {
        Element::new("pre")
            .child(
                Element::new("code")
                    .attr("class", format!("language-{}", language))
                    .text(code),
            )
            .into()
    }
}

/// Default embedder: a full-width iframe allowing fullscreen.
///
/// Only http(s) URLs become frame sources; anything else (including
/// `javascript:` schemes) degrades to visible text.
pub struct IframeEmbedder;

impl MediaEmbedder for IframeEmbedder {
    fn embed(&self, url: &str) -> MarkupNode {
        match ValidatedUrl::parse(url) {
            Ok(valid) => Element::new("iframe")
                .attr("src", valid.as_str())
                .flag("allowfullscreen")
                .into(),
            Err(e) => {
                log::warn!("Refusing to embed media URL: {}", e);
                MarkupNode::text(url)
            }
        }
    }
}

/// Maps a source-CMS language name to a highlighter language
/// identifier, case-insensitively. Unknown names fall back to plain
/// text highlighting.
pub fn map_language(notion_name: &str) -> &'static str {
    match notion_name.to_lowercase().as_str() {
        "plain text" => "text",
        "javascript" => "javascript",
        "typescript" => "typescript",
        "python" => "python",
        "java" => "java",
        "c++" => "cpp",
        "c#" => "csharp",
        "go" => "go",
        "rust" => "rust",
        "ruby" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kotlin" => "kotlin",
        "scala" => "scala",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "json" => "json",
        "yaml" => "yaml",
        "xml" => "xml",
        "markdown" => "markdown",
        "bash" => "bash",
        "shell" => "shell",
        "sql" => "sql",
        "graphql" => "graphql",
        "dockerfile" => "dockerfile",
        _ => "text",
    }
}
