// src/model/mod.rs
//! Domain model: blocks, pages and posts.

mod block;
pub mod blocks;
mod common;
mod page;
mod post;

pub use block::Block;
pub use blocks::*;
pub use common::BlockCommon;
pub use page::{DateRange, NamedFile, Page, Person, PropertyValue, SelectValue};
pub use post::{Author, Post, PostMeta};
