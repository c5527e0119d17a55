// src/model/post.rs
//! Blog post domain model, derived from database pages.

use super::Block;
use serde::{Deserialize, Serialize};

/// The metadata a post card or index entry needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub id: crate::types::PageId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub published_date: chrono::NaiveDate,
    pub category: String,
    pub tags: Vec<String>,
    /// Minutes, rounded up from the Word Count property.
    pub reading_time: u32,
}

/// A full post: metadata plus resolved content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub meta: PostMeta,
    pub blocks: Vec<Block>,
    pub author: Author,
    pub word_count: u32,
    pub status: String,
}

/// Post author resolved from the People property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            avatar: None,
        }
    }
}
