//! Links a freshly created entry to each of its tags.
//!
//! Upserts run concurrently, one per tag. A failed upsert does not undo
//! the entry or the other tags; it is logged and reported back.

use chrono::{DateTime, Utc};
use futures_util::future::join_all;

use skills_tracker_core::skills::{NormalizedTag, ReconcileReport};
use skills_tracker_core::storage::TagRepository;

/// Upserts every tag for `entry_id` and reports what happened to each.
pub async fn reconcile_tags(
    repo: &dyn TagRepository,
    tags: &[NormalizedTag],
    entry_id: &str,
    now: DateTime<Utc>,
) -> ReconcileReport {
    let upserts = tags.iter().map(|tag| async move {
        let result = repo.upsert_tag(tag, entry_id, now).await;
        if let Err(e) = &result {
            tracing::warn!(tag = %tag.key, entry_id = %entry_id, error = %e, "Failed to link tag");
        }
        (tag.key.clone(), result)
    });

    let report = ReconcileReport::from_results(join_all(upserts).await);

    tracing::debug!(
        entry_id = %entry_id,
        created = report.created_tags.len(),
        updated = report.updated_tags.len(),
        failed = report.failed_tags.len(),
        "Reconciled tags"
    );

    report
}
