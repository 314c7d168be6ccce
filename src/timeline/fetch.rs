//! History fetcher — walks the platform's bounded recent window to its edge.
//!
//! The platform only exposes a recent slice of the timeline, served in
//! bounded pages. Each page after the first is requested with a cursor of
//! the oldest id seen minus one; with the store's inclusive `max_id` bound
//! that excludes the boundary post itself, so pages concatenate with no
//! gaps and no overlap.

use crate::error::{Result, WhittleError};
use crate::store::PostStore;
use crate::timeline::models::Post;

/// Posts per timeline request (platform page bound).
pub const PAGE_SIZE: u32 = 200;

/// Pages requested beyond the first. Together with the first page this
/// caps a fetch at the platform's enumeration window.
pub const MAX_EXTRA_PAGES: u32 = 16;

/// Fetch the complete visible post history, newest-first.
///
/// Fails with [`WhittleError::Upstream`] only when the very first page is
/// unavailable; a later page failing is treated as end-of-data and the
/// history gathered so far is returned.
pub async fn fetch_history<S: PostStore>(store: &S) -> Result<Vec<Post>> {
    let mut history = store
        .recent_posts(PAGE_SIZE, None)
        .await
        .map_err(|e| WhittleError::Upstream { reason: e.to_string() })?;

    if history.is_empty() {
        return Ok(history);
    }

    for _ in 0..MAX_EXTRA_PAGES {
        let Some(oldest) = history.last().map(|post| post.id) else {
            break;
        };
        let page = match store.recent_posts(PAGE_SIZE, Some(oldest.saturating_sub(1))).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, after_id = oldest, "older page fetch failed, keeping partial history");
                break;
            }
        };
        if page.is_empty() {
            break;
        }
        history.extend(page);
    }

    tracing::debug!(total = history.len(), "post history assembled");
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    fn post(id: u64) -> Post {
        Post {
            id,
            created_at: Utc::now(),
            text: format!("post {id}"),
        }
    }

    /// Descending page covering `hi..=lo`.
    fn page(hi: u64, lo: u64) -> Vec<Post> {
        (lo..=hi).rev().map(post).collect()
    }

    /// Serves a fixed script of pages and records the cursors it was asked for.
    struct ScriptedStore {
        pages: Mutex<VecDeque<Result<Vec<Post>>>>,
        cursors: Mutex<Vec<Option<u64>>>,
    }

    impl ScriptedStore {
        fn new(pages: Vec<Result<Vec<Post>>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                cursors: Mutex::new(Vec::new()),
            }
        }

        fn cursors(&self) -> Vec<Option<u64>> {
            self.cursors.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PostStore for ScriptedStore {
        async fn recent_posts(&self, _count: u32, max_id: Option<u64>) -> Result<Vec<Post>> {
            self.cursors.lock().unwrap().push(max_id);
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn delete_post(&self, _id: u64) -> Result<()> {
            Ok(())
        }
    }

    /// Always serves a full page below the requested bound. Never ends.
    struct BottomlessStore {
        requests: Mutex<u32>,
    }

    #[async_trait]
    impl PostStore for BottomlessStore {
        async fn recent_posts(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Post>> {
            *self.requests.lock().unwrap() += 1;
            let hi = max_id.unwrap_or(10_000_000);
            Ok(page(hi, hi - u64::from(count) + 1))
        }

        async fn delete_post(&self, _id: u64) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_first_page_short_circuits() {
        let store = ScriptedStore::new(vec![Ok(Vec::new())]);
        let history = fetch_history(&store).await.unwrap();
        assert!(history.is_empty());
        assert_eq!(store.cursors(), vec![None]);
    }

    #[tokio::test]
    async fn concatenates_until_empty_page() {
        // Page sizes 200, 200, 50, 0 -> 450 posts, 3 "next" requests after the first.
        let store = ScriptedStore::new(vec![
            Ok(page(1000, 801)),
            Ok(page(800, 601)),
            Ok(page(600, 551)),
            Ok(Vec::new()),
        ]);
        let history = fetch_history(&store).await.unwrap();
        assert_eq!(history.len(), 450);
        assert_eq!(store.cursors(), vec![None, Some(800), Some(600), Some(550)]);
    }

    #[tokio::test]
    async fn cursor_is_oldest_seen_minus_one() {
        let store = ScriptedStore::new(vec![Ok(page(109, 100)), Ok(Vec::new())]);
        fetch_history(&store).await.unwrap();
        assert_eq!(store.cursors(), vec![None, Some(99)]);
    }

    #[tokio::test]
    async fn history_is_strictly_descending_with_no_duplicates() {
        let store = ScriptedStore::new(vec![
            Ok(page(1000, 801)),
            Ok(page(800, 601)),
            Ok(Vec::new()),
        ]);
        let history = fetch_history(&store).await.unwrap();
        assert!(history.windows(2).all(|pair| pair[0].id > pair[1].id));
    }

    #[tokio::test]
    async fn first_page_failure_is_upstream_error() {
        let store = ScriptedStore::new(vec![Err(WhittleError::Api {
            status: 503,
            message: "over capacity".to_string(),
        })]);
        let err = fetch_history(&store).await.unwrap_err();
        assert!(matches!(err, WhittleError::Upstream { .. }));
    }

    #[tokio::test]
    async fn later_page_failure_returns_partial_history() {
        let store = ScriptedStore::new(vec![
            Ok(page(1000, 801)),
            Err(WhittleError::Api {
                status: 500,
                message: "internal error".to_string(),
            }),
        ]);
        let history = fetch_history(&store).await.unwrap();
        assert_eq!(history.len(), 200);
    }

    #[tokio::test]
    async fn page_ceiling_bounds_requests() {
        let store = BottomlessStore {
            requests: Mutex::new(0),
        };
        let history = fetch_history(&store).await.unwrap();
        assert_eq!(*store.requests.lock().unwrap(), MAX_EXTRA_PAGES + 1);
        assert_eq!(
            history.len(),
            (PAGE_SIZE * (MAX_EXTRA_PAGES + 1)) as usize
        );
    }
}
