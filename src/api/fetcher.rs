// src/api/fetcher.rs
//! Recursive block tree retrieval.
//!
//! The children endpoint returns one level at a time; blocks flagged
//! `has_children` need a follow-up request per subtree. Subtrees of the
//! same parent are fetched concurrently, then reattached at the index
//! their parent block occupies, so sibling order always matches the
//! API's document order.

use super::ContentRepository;
use crate::constants::MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::Block;
use crate::types::{BlockId, PageId};
use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use std::sync::Arc;

/// Fetches complete block trees through a [`ContentRepository`].
pub struct BlockTreeFetcher {
    repository: Arc<dyn ContentRepository>,
}

impl BlockTreeFetcher {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Retrieves the full, ordered block tree of a page.
    ///
    /// Any request failure in the tree fails the whole fetch; a partial
    /// tree would render a silently truncated post.
    pub async fn fetch_page_tree(&self, page: &PageId) -> Result<Vec<Block>, AppError> {
        let blocks = self.fetch_children(page.as_block(), 0).await?;
        log::info!(
            "Fetched block tree for page {}: {} top-level block(s)",
            page,
            blocks.len()
        );
        Ok(blocks)
    }

    fn fetch_children(
        &self,
        parent: BlockId,
        depth: u8,
    ) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            if depth >= MAX_FETCH_DEPTH {
                log::warn!(
                    "Block nesting exceeds depth {} under {}; truncating subtree",
                    MAX_FETCH_DEPTH,
                    parent
                );
                return Ok(Vec::new());
            }

            let mut blocks = self.repository.retrieve_children(&parent).await?;

            let pending: Vec<(usize, BlockId)> = blocks
                .iter()
                .enumerate()
                .filter(|(_, block)| block.has_children())
                .map(|(index, block)| {
                    log::debug!(
                        "Resolving {} subtree at depth {}",
                        block.block_type(),
                        depth
                    );
                    (index, block.id().clone())
                })
                .collect();

            if pending.is_empty() {
                return Ok(blocks);
            }

            let subtrees = try_join_all(
                pending
                    .iter()
                    .map(|(_, id)| self.fetch_children(id.clone(), depth + 1)),
            )
            .await?;

            for ((index, _), children) in pending.into_iter().zip(subtrees) {
                blocks[index].set_children(children);
            }

            Ok(blocks)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::{BlockCommon, Page};
    use crate::types::{DatabaseId, RichTextItem};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Repository stub serving a canned parent-to-children map.
    struct FixtureRepository {
        children: HashMap<String, Vec<Block>>,
        calls: Mutex<Vec<String>>,
    }

    impl FixtureRepository {
        fn new(children: HashMap<String, Vec<Block>>) -> Self {
            Self {
                children,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ContentRepository for FixtureRepository {
        async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
            self.calls.lock().unwrap().push(parent.as_str().to_string());
            Ok(self
                .children
                .get(parent.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn query_pages(
            &self,
            _database: &DatabaseId,
            _query: &serde_json::Value,
        ) -> Result<Vec<Page>, AppError> {
            unimplemented!("not used by tree fetching")
        }

        async fn update_page_status(
            &self,
            _page: &PageId,
            _status: &str,
        ) -> Result<(), AppError> {
            unimplemented!("not used by tree fetching")
        }
    }

    fn id(n: u8) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn paragraph(block_id: BlockId, text: &str, has_children: bool) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon {
                id: block_id,
                children: Vec::new(),
                has_children,
                archived: false,
            },
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    #[tokio::test]
    async fn resolves_nested_children_in_sibling_order() {
        let page = PageId::parse(&format!("{:032x}", 1u8)).unwrap();
        let mut fixtures = HashMap::new();
        fixtures.insert(
            page.as_str().to_string(),
            vec![
                paragraph(id(2), "first", false),
                paragraph(id(3), "second", true),
                paragraph(id(4), "third", false),
            ],
        );
        fixtures.insert(
            id(3).as_str().to_string(),
            vec![paragraph(id(5), "nested", false)],
        );

        let fetcher = BlockTreeFetcher::new(Arc::new(FixtureRepository::new(fixtures)));
        let tree = fetcher.fetch_page_tree(&page).await.unwrap();

        assert_eq!(tree.len(), 3);
        let texts: Vec<&str> = tree
            .iter()
            .map(|b| match b {
                Block::Paragraph(p) => p.content.rich_text[0].plain_text.as_str(),
                _ => panic!("expected paragraphs"),
            })
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);

        assert_eq!(tree[1].children().len(), 1);
        assert!(tree[0].children().is_empty());
        assert!(tree[2].children().is_empty());
    }

    #[tokio::test]
    async fn leaf_blocks_trigger_no_extra_requests() {
        let page = PageId::parse(&format!("{:032x}", 1u8)).unwrap();
        let mut fixtures = HashMap::new();
        fixtures.insert(
            page.as_str().to_string(),
            vec![paragraph(id(2), "a", false), paragraph(id(3), "b", false)],
        );

        let repository = Arc::new(FixtureRepository::new(fixtures));
        let fetcher = BlockTreeFetcher::new(repository.clone());
        fetcher.fetch_page_tree(&page).await.unwrap();

        assert_eq!(repository.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn self_referencing_block_stops_at_depth_cap() {
        // A block claiming itself as a child would otherwise recurse
        // forever; the depth cap turns it into a truncated subtree.
        let page = PageId::parse(&format!("{:032x}", 1u8)).unwrap();
        let mut fixtures = HashMap::new();
        fixtures.insert(
            page.as_str().to_string(),
            vec![paragraph(page.as_block(), "loop", true)],
        );

        let fetcher = BlockTreeFetcher::new(Arc::new(FixtureRepository::new(fixtures)));
        let tree = fetcher.fetch_page_tree(&page).await.unwrap();

        assert_eq!(tree.len(), 1);
    }
}
