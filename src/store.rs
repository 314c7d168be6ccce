//! Post-store capability — the slice of the platform API the pruner consumes.

use async_trait::async_trait;

use crate::error::Result;
use crate::timeline::models::Post;

/// Read/delete access to a user's post history, newest-first.
///
/// Implemented by an authenticated platform session; in-memory fakes
/// implement it for tests.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Up to `count` most recent posts, including reposts. When `max_id`
    /// is given, only posts with `id <= max_id` are returned (the
    /// platform's inclusive upper bound). An empty result means the end
    /// of the visible timeline.
    async fn recent_posts(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Post>>;

    /// Permanently delete a single post.
    async fn delete_post(&self, id: u64) -> Result<()>;
}
