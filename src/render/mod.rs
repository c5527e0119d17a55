// src/render/mod.rs
//! The rendering core: block tree in, structured markup tree out.
//!
//! Pure and synchronous — no I/O, no retries, no shared state. A fetch
//! failure upstream fails the page before this stage ever runs.

mod assemble;
mod block;
mod highlight;
mod node;
mod rich_text;

pub use assemble::{assemble_document, render_document};
pub use block::{render_block, RenderContext};
pub use highlight::{
    map_language, IframeEmbedder, MediaEmbedder, PlainHighlighter, SyntaxHighlighter,
};
pub use node::{Attribute, Element, MarkupNode};
pub use rich_text::format_rich_text;
