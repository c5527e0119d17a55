// src/output/writer.rs
//! Writes rendered posts to the static output directory.

use crate::error::AppError;
use crate::model::Post;
use crate::output::html::{escape_text, render_html};
use crate::render::{render_document, RenderContext};
use std::fs;
use std::path::PathBuf;

/// Persists rendered pages under one output directory.
pub struct SiteWriter {
    out_dir: PathBuf,
}

impl SiteWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Renders a post and writes `<slug>.html`. Returns the file path.
    pub fn write_post(&self, post: &Post, ctx: &RenderContext) -> Result<PathBuf, AppError> {
        let body = render_document(&post.blocks, ctx);
        let document = page_shell(&post.meta.title, &render_html(&body));
        let path = self.out_dir.join(format!("{}.html", post.meta.slug));

        fs::create_dir_all(&self.out_dir)?;
        fs::write(&path, document)?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }
}

/// The minimal standalone page around a rendered article.
fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_text(title),
        body
    )
}
