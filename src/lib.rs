// src/lib.rs
//! notionpress — renders Notion-authored blog posts into structured
//! HTML pages.
//!
//! The pipeline has three stages: fetch the block tree through the API
//! layer, transform it into a markup tree with the pure renderer, then
//! serialize and write HTML in the output layer.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod output;
pub mod render;
pub mod site;
pub mod types;

pub use error::{AppError, NotionErrorCode};
pub use model::{Block, Page, Post, PostMeta};
pub use render::{render_document, RenderContext};
