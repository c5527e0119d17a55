// src/site/publish.rs
//! Post-build status promotion: Ready rows become Published.
//!
//! Runs after a successful site build. A failed update on one page must
//! not block the rest, so failures are collected instead of propagated.

use crate::api::ContentRepository;
use crate::constants::STATUS_PUBLISHED;
use crate::error::AppError;
use crate::site::PostCatalog;
use crate::types::DatabaseId;
use std::sync::Arc;

/// Outcome of a promotion sweep. Entries carry post titles, the name an
/// operator recognizes in the log.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub updated: Vec<String>,
    pub failed: Vec<(String, AppError)>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Flips every Ready post to Published.
pub async fn promote_ready_posts(
    repository: Arc<dyn ContentRepository>,
    database: &DatabaseId,
) -> Result<PublishReport, AppError> {
    let catalog = PostCatalog::new(repository.clone(), database.clone());
    let ready = catalog.ready_posts().await?;

    if ready.is_empty() {
        log::info!("No Ready posts to promote");
        return Ok(PublishReport::default());
    }

    log::info!("Promoting {} Ready post(s) to Published", ready.len());

    let mut report = PublishReport::default();
    for post in ready {
        match repository
            .update_page_status(&post.id, STATUS_PUBLISHED)
            .await
        {
            Ok(()) => {
                log::info!("Published \"{}\"", post.title);
                report.updated.push(post.title);
            }
            Err(e) => {
                log::error!("Failed to publish \"{}\": {}", post.title, e);
                report.failed.push((post.title, e));
            }
        }
    }

    Ok(report)
}
