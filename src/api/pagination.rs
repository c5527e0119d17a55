// src/api/pagination.rs
//! Cursor-driven pagination over Notion list endpoints.
//!
//! Both the block children listing and database queries share the same
//! envelope: a `results` array, a `next_cursor` and a `has_more` flag.
//! The loop here is generic over the fetch closure so callers only
//! supply the single-page request.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use std::future::Future;

/// One page of results from a paginated endpoint.
#[derive(Debug)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Everything a paginated fetch accumulated.
#[derive(Debug)]
pub struct FetchResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: usize,
}

/// Drains a paginated endpoint by following cursors until `has_more`
/// goes false. Items are accumulated in API order.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<FetchResult<T>, AppError>
where
    F: FnMut(usize, Option<String>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0;

    loop {
        let page = fetch_page(NOTION_API_PAGE_SIZE, cursor.take()).await?;
        pages_fetched += 1;
        items.extend(page.items);

        if !page.has_more {
            break;
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            // has_more without a cursor would loop forever; treat the
            // listing as complete.
            None => {
                log::warn!("Paginated response claimed has_more without a cursor; stopping");
                break;
            }
        }
    }

    log::debug!(
        "Pagination complete: {} items over {} request(s)",
        items.len(),
        pages_fetched
    );

    Ok(FetchResult {
        items,
        pages_fetched,
    })
}
