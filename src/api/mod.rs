// src/api/mod.rs
//! Notion API access: HTTP client, wire parsing, pagination and the
//! recursive block tree fetcher.

mod client;
mod fetcher;
mod pagination;
mod wire;

pub use client::NotionHttpClient;
pub use fetcher::BlockTreeFetcher;
pub use pagination::{fetch_all_pages, FetchResult, PaginatedResponse};

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{BlockId, DatabaseId, PageId};

/// The network seam between the blog and its CMS.
///
/// Everything above this trait is testable against fixtures; the only
/// production implementation is [`NotionHttpClient`]. Implementations
/// paginate internally and return complete listings.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lists the direct children of a block, in document order.
    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError>;

    /// Runs a database query with the given filter/sort body.
    async fn query_pages(
        &self,
        database: &DatabaseId,
        query: &serde_json::Value,
    ) -> Result<Vec<Page>, AppError>;

    /// Sets the `Status` property of a page.
    async fn update_page_status(&self, page: &PageId, status: &str) -> Result<(), AppError>;
}
