// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking a post's block tree.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum nesting depth when recursively fetching block children.
///
/// Notion blocks can nest arbitrarily deep (toggles inside lists inside
/// toggles). This limit prevents runaway fetches; 50 levels is far
/// deeper than any real article.
pub const MAX_FETCH_DEPTH: u8 = 50;

// ---------------------------------------------------------------------------
// Post catalog
// ---------------------------------------------------------------------------

/// Reading speed used to derive reading time from word count.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Word count assumed when a post has no Word Count property.
pub const DEFAULT_WORD_COUNT: u32 = 1000;

/// Workflow status of a post that has been built and is live.
pub const STATUS_PUBLISHED: &str = "Published";

/// Workflow status of a post approved for the next build.
pub const STATUS_READY: &str = "Ready";

// ---------------------------------------------------------------------------
// Output sizing (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate HTML buffers.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;
