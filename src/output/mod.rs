// src/output/mod.rs
//! HTML serialization and static file output.

mod html;
mod writer;

pub use html::{escape_text, render_fragment, render_html};
pub use writer::SiteWriter;
