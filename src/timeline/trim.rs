//! Retention trimmer — deletes everything past the retention window.
//!
//! Deletions are issued one at a time (rate limits, deterministic log
//! order) and individual failures are recorded and skipped, never
//! propagated: one bad post must not abort the cycle.

use std::collections::HashSet;

use crate::store::PostStore;
use crate::timeline::models::Post;

/// Outcome counts for one trim pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimReport {
    /// Candidates past the retention window.
    pub attempted: usize,
    /// Deletes acknowledged by the store.
    pub deleted: usize,
    /// Candidates exempted by the exclusion set.
    pub skipped: usize,
    /// Deletes the store rejected.
    pub failed: usize,
}

impl TrimReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// The posts eligible for deletion: everything past the first
/// `retention_count` entries of a newest-first history.
pub fn delete_candidates(history: &[Post], retention_count: usize) -> &[Post] {
    history.get(retention_count..).unwrap_or(&[])
}

/// Delete all candidates not present in `exclusions`.
pub async fn trim_history<S: PostStore>(
    store: &S,
    history: &[Post],
    retention_count: usize,
    exclusions: &HashSet<u64>,
) -> TrimReport {
    let candidates = delete_candidates(history, retention_count);
    let mut report = TrimReport {
        attempted: candidates.len(),
        ..TrimReport::default()
    };
    tracing::info!(total = history.len(), candidates = candidates.len(), "looking for posts to delete");

    for post in candidates {
        if exclusions.contains(&post.id) {
            tracing::debug!(id = post.id, "post excluded from deletion");
            report.skipped += 1;
            continue;
        }
        match store.delete_post(post.id).await {
            Ok(()) => {
                tracing::info!(id = post.id, "deleted post");
                report.deleted += 1;
            }
            Err(e) => {
                tracing::warn!(id = post.id, error = %e, "delete failed, continuing");
                report.failed += 1;
            }
        }
    }

    report
}
