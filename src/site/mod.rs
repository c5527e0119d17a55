// src/site/mod.rs
//! Site-level features built on top of the renderer and the API layer:
//! the post catalog, newsletter signups and status promotion.

mod newsletter;
mod posts;
mod publish;

pub use newsletter::{SignupOutcome, SubscriberBook};
pub use posts::{distinct_categories, distinct_tags, post_meta_from_page, PostCatalog};
pub use publish::{promote_ready_posts, PublishReport};
