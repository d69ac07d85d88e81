//! Sync engine — reconciles one local list section against its remote
//! collection so that, after a sync, the remote item set and content exactly
//! equal the local list.
//!
//! # Algorithm (per section, sections are independent)
//! 1. Fetch the remote collection; `remote_ids` = ids present remotely.
//! 2. Delete `remote_ids - local_ids`, concurrently (order-independent).
//! 3. For every local item, in stored order: a known id gets an update,
//!    skipped when the remote content already equals the local content;
//!    anything else (no id, or an id the remote store no longer knows) gets
//!    a create and adopts the assigned id.
//! 4. The synced items replace the local list as the post-sync canon.
//!
//! Idempotent: a second run with no intervening edits performs zero
//! creates/updates/deletes. Not transactional: a partial failure surfaces as
//! one aggregate `SyncError` and the remote collection may stay divergent
//! until the next successful save.

#[cfg(test)]
pub(crate) mod testing;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::clients::ApiError;
use crate::models::resume::{Certificate, Internship, PersonalInfo, Project, Skill};

// ────────────────────────────────────────────────────────────────────────────
// Collaborator seams
// ────────────────────────────────────────────────────────────────────────────

/// A list item the sync engine can reconcile.
pub trait SyncedItem: Clone + Send + Sync + 'static {
    /// Collection kind; doubles as the remote resource path segment.
    const KIND: &'static str;

    fn remote_id(&self) -> Option<Uuid>;
    fn set_remote_id(&mut self, id: Uuid);

    /// The remote-visible content of the item. Identity (`uid`, `id`) and
    /// audit fields are excluded: two items with equal payloads are in sync.
    fn payload(&self) -> Value;
}

/// One remote collection (projects, internships, skills or certificates).
#[async_trait]
pub trait Collection<T: SyncedItem>: Send + Sync {
    async fn get_all(&self, user: Uuid) -> Result<Vec<T>, ApiError>;
    async fn create(&self, user: Uuid, item: &T) -> Result<T, ApiError>;
    async fn update(&self, user: Uuid, id: Uuid, item: &T) -> Result<T, ApiError>;
    async fn delete(&self, user: Uuid, id: Uuid) -> Result<(), ApiError>;
}

/// The remote profile store. Personal info syncs as a single full-record
/// update, not as list reconciliation.
#[async_trait]
pub trait Profile: Send + Sync {
    async fn get(&self, user: Uuid) -> Result<PersonalInfo, ApiError>;
    async fn update(&self, user: Uuid, info: &PersonalInfo) -> Result<PersonalInfo, ApiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// SyncedItem implementations
// ────────────────────────────────────────────────────────────────────────────

impl SyncedItem for Project {
    const KIND: &'static str = "projects";

    fn remote_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_remote_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn payload(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "technologies": self.technologies,
            "link": self.link,
        })
    }
}

impl SyncedItem for Internship {
    const KIND: &'static str = "internships";

    fn remote_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_remote_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn payload(&self) -> Value {
        json!({
            "company": self.company,
            "role": self.role,
            "start_date": self.start_date,
            "end_date": self.end_date,
            "current": self.current,
            "description": self.description,
        })
    }
}

impl SyncedItem for Skill {
    const KIND: &'static str = "skills";

    fn remote_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_remote_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "level": self.level,
        })
    }
}

impl SyncedItem for Certificate {
    const KIND: &'static str = "certificates";

    fn remote_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_remote_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "issuer": self.issuer,
            "date": self.date,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcome and error types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SyncOutcome<T> {
    /// Post-sync canonical items, all carrying remote ids, local uids kept.
    pub items: Vec<T>,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl<T> SyncOutcome<T> {
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (self.created, self.updated, self.deleted, self.unchanged)
    }
}

/// Aggregate failure for one section's sync. The remote collection may be
/// partially synced; local edits are preserved and the whole save can be
/// retried.
#[derive(Debug, Error)]
#[error("{kind} sync failed: {source}")]
pub struct SyncError {
    pub kind: &'static str,
    #[source]
    pub source: ApiError,
}

enum SyncAction {
    Created,
    Updated,
    Unchanged,
}

// ────────────────────────────────────────────────────────────────────────────
// Reconciliation
// ────────────────────────────────────────────────────────────────────────────

/// Reconciles `local` against the remote collection for `user`.
pub async fn sync_collection<T, C>(
    client: &C,
    user: Uuid,
    local: &[T],
) -> Result<SyncOutcome<T>, SyncError>
where
    T: SyncedItem,
    C: Collection<T> + ?Sized,
{
    let wrap = |source| SyncError {
        kind: T::KIND,
        source,
    };

    let remote = client.get_all(user).await.map_err(wrap)?;
    let remote_by_id: HashMap<Uuid, T> = remote
        .into_iter()
        .filter_map(|item| item.remote_id().map(|id| (id, item)))
        .collect();

    let local_ids: HashSet<Uuid> = local.iter().filter_map(|item| item.remote_id()).collect();
    let stale: Vec<Uuid> = remote_by_id
        .keys()
        .copied()
        .filter(|id| !local_ids.contains(id))
        .collect();

    // Deletions are independent of each other; fan them out.
    try_join_all(stale.iter().map(|id| client.delete(user, *id)))
        .await
        .map_err(wrap)?;

    // Upserts run concurrently too; `try_join_all` keeps stored order.
    let synced = try_join_all(
        local
            .iter()
            .map(|item| sync_item(client, user, &remote_by_id, item)),
    )
    .await
    .map_err(wrap)?;

    let mut outcome = SyncOutcome {
        items: Vec::with_capacity(synced.len()),
        created: 0,
        updated: 0,
        deleted: stale.len(),
        unchanged: 0,
    };
    for (item, action) in synced {
        match action {
            SyncAction::Created => outcome.created += 1,
            SyncAction::Updated => outcome.updated += 1,
            SyncAction::Unchanged => outcome.unchanged += 1,
        }
        outcome.items.push(item);
    }
    Ok(outcome)
}

async fn sync_item<T, C>(
    client: &C,
    user: Uuid,
    remote_by_id: &HashMap<Uuid, T>,
    item: &T,
) -> Result<(T, SyncAction), ApiError>
where
    T: SyncedItem,
    C: Collection<T> + ?Sized,
{
    if let Some(id) = item.remote_id() {
        if let Some(current) = remote_by_id.get(&id) {
            if current.payload() == item.payload() {
                return Ok((item.clone(), SyncAction::Unchanged));
            }
            client.update(user, id, item).await?;
            return Ok((item.clone(), SyncAction::Updated));
        }
    }

    // No id, or an id the remote store no longer knows (deleted from another
    // tab): create and adopt the assigned id.
    let created = client.create(user, item).await?;
    let id = created.remote_id().ok_or_else(|| {
        ApiError::Invalid(format!("{} create returned an item without an id", T::KIND))
    })?;
    let mut item = item.clone();
    item.set_remote_id(id);
    Ok((item, SyncAction::Created))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::testing::MockCollection;
    use super::*;
    use crate::models::resume::Project;

    fn make_project(title: &str) -> Project {
        Project {
            title: title.to_string(),
            description: "A tool".to_string(),
            technologies: vec!["React".to_string(), "Node".to_string()],
            ..Project::blank()
        }
    }

    fn user() -> Uuid {
        Uuid::new_v4()
    }

    #[tokio::test]
    async fn test_creation_propagation_assigns_remote_id() {
        let client = MockCollection::<Project>::new(vec![]);
        let local = vec![make_project("Tracker")];

        let outcome = sync_collection(&client, user(), &local).await.expect("sync");

        assert_eq!(client.create_calls(), 1, "exactly one create for the new item");
        assert_eq!(client.update_calls(), 0);
        assert_eq!(client.delete_calls(), 0);
        assert_eq!(outcome.created, 1);
        let synced = &outcome.items[0];
        assert!(synced.remote_id().is_some(), "assigned id must be recorded locally");
        assert_eq!(synced.uid, local[0].uid, "the session edit key survives a sync");
        assert_eq!(
            client.last_create_payload().expect("payload recorded"),
            local[0].payload(),
            "the create call carries the item's content"
        );
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let client = MockCollection::<Project>::new(vec![]);
        let local = vec![make_project("Tracker"), make_project("Portfolio")];
        let first = sync_collection(&client, user(), &local).await.expect("first sync");
        assert_eq!(first.created, 2);

        client.reset_counters();
        let second = sync_collection(&client, user(), &first.items)
            .await
            .expect("second sync");

        assert_eq!(client.create_calls(), 0, "second run must not create");
        assert_eq!(client.update_calls(), 0, "second run must not update");
        assert_eq!(client.delete_calls(), 0, "second run must not delete");
        assert_eq!(second.unchanged, 2);
        assert_eq!(second.items.len(), 2);
    }

    #[tokio::test]
    async fn test_deletion_propagation_touches_only_the_removed_item() {
        let client = MockCollection::<Project>::new(vec![]);
        let local = vec![make_project("Tracker"), make_project("Portfolio")];
        let synced = sync_collection(&client, user(), &local).await.expect("seed").items;

        client.reset_counters();
        let kept = vec![synced[0].clone()];
        let outcome = sync_collection(&client, user(), &kept).await.expect("sync");

        assert_eq!(client.delete_calls(), 1, "exactly one delete for the removed id");
        assert_eq!(client.create_calls(), 0);
        assert_eq!(client.update_calls(), 0, "untouched items issue no remote calls");
        assert_eq!(outcome.deleted, 1);
        assert_eq!(outcome.unchanged, 1);
    }

    #[tokio::test]
    async fn test_changed_item_is_updated_in_place() {
        let client = MockCollection::<Project>::new(vec![]);
        let local = vec![make_project("Tracker")];
        let mut synced = sync_collection(&client, user(), &local).await.expect("seed").items;
        let id = synced[0].remote_id();

        client.reset_counters();
        synced[0].description = "A better tool".to_string();
        let outcome = sync_collection(&client, user(), &synced).await.expect("sync");

        assert_eq!(client.update_calls(), 1);
        assert_eq!(client.create_calls(), 0);
        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.items[0].remote_id(), id, "update keeps the same id");
    }

    #[tokio::test]
    async fn test_stale_id_falls_back_to_create() {
        // The item claims an id the remote store no longer knows (deleted in
        // another tab): it must be recreated, not updated.
        let client = MockCollection::<Project>::new(vec![]);
        let stale_id = Uuid::new_v4();
        let mut item = make_project("Tracker");
        item.id = Some(stale_id);

        let outcome = sync_collection(&client, user(), &[item]).await.expect("sync");

        assert_eq!(client.create_calls(), 1);
        assert_eq!(client.update_calls(), 0);
        let adopted = outcome.items[0].remote_id().expect("new id");
        assert_ne!(adopted, stale_id, "the stale id must be replaced");
    }

    #[tokio::test]
    async fn test_failure_surfaces_as_aggregate_section_error() {
        let client = MockCollection::<Project>::new(vec![]).failing_creates();
        let err = sync_collection(&client, user(), &[make_project("Tracker")])
            .await
            .expect_err("create failure");
        assert_eq!(err.kind, "projects");
    }
}
