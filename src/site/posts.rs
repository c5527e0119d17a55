// src/site/posts.rs
//! The post catalog: database queries plus the property-bag-to-post
//! transformation.
//!
//! The blog schema is a convention, not a contract. Every property read
//! has a default, so a half-filled row still produces a usable post
//! instead of a build failure.

use crate::api::{BlockTreeFetcher, ContentRepository};
use crate::constants::{DEFAULT_WORD_COUNT, STATUS_PUBLISHED, STATUS_READY, WORDS_PER_MINUTE};
use crate::error::AppError;
use crate::model::{Author, Page, Post, PostMeta, PropertyValue};
use crate::types::{plain_text_of, DatabaseId};
use serde_json::json;
use std::sync::Arc;

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_CATEGORY: &str = "Uncategorized";
const DEFAULT_STATUS: &str = "Draft";

/// Read access to the blog's post database.
pub struct PostCatalog {
    repository: Arc<dyn ContentRepository>,
    database: DatabaseId,
}

impl PostCatalog {
    pub fn new(repository: Arc<dyn ContentRepository>, database: DatabaseId) -> Self {
        Self {
            repository,
            database,
        }
    }

    /// All visible posts, newest publish date first.
    pub async fn published_posts(&self) -> Result<Vec<PostMeta>, AppError> {
        let query = json!({
            "filter": visible_status_filter(),
            "sorts": [{ "property": "Publish Date", "direction": "descending" }]
        });
        let pages = self.repository.query_pages(&self.database, &query).await?;
        Ok(pages.iter().map(post_meta_from_page).collect())
    }

    /// A single visible post with its full block tree, or
    /// [`AppError::PostNotFound`].
    pub async fn post_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        let query = json!({
            "filter": {
                "and": [
                    { "property": "Slug", "rich_text": { "equals": slug } },
                    visible_status_filter()
                ]
            }
        });
        let pages = self.repository.query_pages(&self.database, &query).await?;
        let page = pages
            .into_iter()
            .next()
            .ok_or_else(|| AppError::PostNotFound(slug.to_string()))?;

        let meta = post_meta_from_page(&page);
        let fetcher = BlockTreeFetcher::new(self.repository.clone());
        let blocks = fetcher.fetch_page_tree(&page.id).await?;

        Ok(Post {
            author: author_of(&page),
            word_count: word_count_of(&page),
            status: status_of(&page),
            meta,
            blocks,
        })
    }

    /// Distinct tag names across all visible posts, sorted.
    pub async fn all_tags(&self) -> Result<Vec<String>, AppError> {
        Ok(distinct_tags(&self.published_posts().await?))
    }

    /// Distinct category names across all visible posts, sorted.
    pub async fn all_categories(&self) -> Result<Vec<String>, AppError> {
        Ok(distinct_categories(&self.published_posts().await?))
    }

    /// Posts waiting to be flipped from Ready to Published.
    pub async fn ready_posts(&self) -> Result<Vec<PostMeta>, AppError> {
        let query = json!({
            "filter": { "property": "Status", "status": { "equals": STATUS_READY } }
        });
        let pages = self.repository.query_pages(&self.database, &query).await?;
        Ok(pages.iter().map(post_meta_from_page).collect())
    }
}

/// Posts are visible while Ready (staged for the next build) or already
/// Published.
fn visible_status_filter() -> serde_json::Value {
    json!({
        "or": [
            { "property": "Status", "status": { "equals": STATUS_READY } },
            { "property": "Status", "status": { "equals": STATUS_PUBLISHED } }
        ]
    })
}

/// Maps a database row onto post metadata, defaulting every absent or
/// mistyped property.
pub fn post_meta_from_page(page: &Page) -> PostMeta {
    let title = match page.property("Title") {
        Some(PropertyValue::Title { title }) if !title.is_empty() => plain_text_of(title),
        _ => DEFAULT_TITLE.to_string(),
    };

    let slug = match page.property("Slug") {
        Some(PropertyValue::RichText { rich_text }) if !rich_text.is_empty() => {
            plain_text_of(rich_text)
        }
        _ => page.id.as_str().to_string(),
    };

    let excerpt = match page.property("Meta Description") {
        Some(PropertyValue::RichText { rich_text }) => plain_text_of(rich_text),
        _ => String::new(),
    };

    let cover_image = match page.property("Featured Image") {
        Some(PropertyValue::Files { files }) => {
            files.first().map(|file| file.file.url().to_string())
        }
        _ => None,
    };

    let published_date = match page.property("Publish Date") {
        Some(PropertyValue::Date { date: Some(range) }) => range.start,
        _ => chrono::Utc::now().date_naive(),
    };

    let category = match page.property("Category") {
        Some(PropertyValue::Select {
            select: Some(select),
        }) => select.name.clone(),
        _ => DEFAULT_CATEGORY.to_string(),
    };

    let tags = match page.property("Tags") {
        Some(PropertyValue::MultiSelect { multi_select }) => {
            multi_select.iter().map(|tag| tag.name.clone()).collect()
        }
        _ => Vec::new(),
    };

    PostMeta {
        id: page.id.clone(),
        title,
        slug,
        excerpt,
        cover_image,
        published_date,
        category,
        tags,
        reading_time: reading_time_minutes(word_count_of(page)),
    }
}

fn word_count_of(page: &Page) -> u32 {
    match page.property("Word Count") {
        Some(PropertyValue::Number {
            number: Some(count),
        }) if *count > 0.0 => *count as u32,
        _ => DEFAULT_WORD_COUNT,
    }
}

fn status_of(page: &Page) -> String {
    match page.property("Status") {
        Some(PropertyValue::Status {
            status: Some(status),
        }) => status.name.clone(),
        _ => DEFAULT_STATUS.to_string(),
    }
}

fn author_of(page: &Page) -> Author {
    match page.property("Author") {
        Some(PropertyValue::People { people }) => people
            .first()
            .map(|person| Author {
                name: person
                    .name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| Author::default().name),
                avatar: person.avatar_url.clone(),
            })
            .unwrap_or_default(),
        _ => Author::default(),
    }
}

/// Reading time in whole minutes, rounded up.
fn reading_time_minutes(word_count: u32) -> u32 {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

/// Distinct tag names across a post listing, sorted.
pub fn distinct_tags(posts: &[PostMeta]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct category names across a post listing, sorted.
pub fn distinct_categories(posts: &[PostMeta]) -> Vec<String> {
    posts
        .iter()
        .map(|post| post.category.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}
