//! Resume session controller — materializes the working record, applies
//! edits, and commits saves back to the portal.
//!
//! The working record lives in the draft store between requests. A draft,
//! when present, fully supersedes the remote composition (last local edit
//! wins — no field-level merge); it is discarded only after a successful
//! save or an explicit reset.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::draft::DraftStore;
use crate::editor::{apply_edit, SectionEdit};
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::RemoteStore;
use crate::sync::{sync_collection, SyncOutcome};

// ────────────────────────────────────────────────────────────────────────────
// Response shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Draft,
    Remote,
}

#[derive(Debug, Serialize)]
pub struct ResumeView {
    pub source: RecordSource,
    pub record: ResumeRecord,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionCounts {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl<T> From<&SyncOutcome<T>> for SectionCounts {
    fn from(outcome: &SyncOutcome<T>) -> Self {
        let (created, updated, deleted, unchanged) = outcome.counts();
        Self {
            created,
            updated,
            deleted,
            unchanged,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveReport {
    pub record: ResumeRecord,
    pub projects: SectionCounts,
    pub internships: SectionCounts,
    pub skills: SectionCounts,
    pub certificates: SectionCounts,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// The working record: the draft if one exists, the remote composition
/// otherwise.
pub async fn load_record(
    drafts: &DraftStore,
    remote: &RemoteStore,
    user: Uuid,
) -> Result<ResumeView, AppError> {
    if let Some(record) = drafts.load(user).await? {
        info!(%user, "draft supersedes remote composition");
        return Ok(ResumeView {
            source: RecordSource::Draft,
            record,
        });
    }
    Ok(ResumeView {
        source: RecordSource::Remote,
        record: compose_remote(remote, user).await?,
    })
}

/// Composes the initial record from the remote profile and the four
/// collections, fetched concurrently.
pub async fn compose_remote(remote: &RemoteStore, user: Uuid) -> Result<ResumeRecord, AppError> {
    let (personal_info, projects, internships, skills, certificates) = tokio::try_join!(
        remote.profile.get(user),
        remote.projects.get_all(user),
        remote.internships.get_all(user),
        remote.skills.get_all(user),
        remote.certificates.get_all(user),
    )?;
    Ok(ResumeRecord {
        personal_info,
        projects,
        internships,
        skills,
        certificates,
    })
}

/// Applies one editor operation to the working record and persists the
/// draft. Edits never touch the remote store directly.
pub async fn edit_record(
    drafts: &DraftStore,
    remote: &RemoteStore,
    user: Uuid,
    edit: SectionEdit,
) -> Result<ResumeView, AppError> {
    let mut record = load_record(drafts, remote, user).await?.record;
    apply_edit(&mut record, edit)?;
    drafts.persist(user, &record).await?;
    Ok(ResumeView {
        source: RecordSource::Draft,
        record,
    })
}

/// Pushes the working record to the portal: the four section syncs and the
/// profile update run concurrently. On success the draft is discarded and
/// the post-sync record becomes canonical. On failure local edits are
/// preserved and the whole save can be retried.
pub async fn save_record(
    drafts: &DraftStore,
    remote: &RemoteStore,
    user: Uuid,
) -> Result<SaveReport, AppError> {
    let record = load_record(drafts, remote, user).await?.record;

    let (personal_info, projects, internships, skills, certificates) = tokio::try_join!(
        async {
            remote
                .profile
                .update(user, &record.personal_info)
                .await
                .map_err(AppError::from)
        },
        async {
            sync_collection(remote.projects.as_ref(), user, &record.projects)
                .await
                .map_err(AppError::from)
        },
        async {
            sync_collection(remote.internships.as_ref(), user, &record.internships)
                .await
                .map_err(AppError::from)
        },
        async {
            sync_collection(remote.skills.as_ref(), user, &record.skills)
                .await
                .map_err(AppError::from)
        },
        async {
            sync_collection(remote.certificates.as_ref(), user, &record.certificates)
                .await
                .map_err(AppError::from)
        },
    )?;

    info!(
        %user,
        projects_created = projects.created,
        projects_updated = projects.updated,
        projects_deleted = projects.deleted,
        "resume saved to portal"
    );

    let report = SaveReport {
        projects: SectionCounts::from(&projects),
        internships: SectionCounts::from(&internships),
        skills: SectionCounts::from(&skills),
        certificates: SectionCounts::from(&certificates),
        record: ResumeRecord {
            personal_info,
            projects: projects.items,
            internships: internships.items,
            skills: skills.items,
            certificates: certificates.items,
        },
    };

    drafts.discard(user).await?;
    Ok(report)
}

/// Discards the draft and reloads purely from remote state. Destructive for
/// unsaved edits; the client confirms with the user before calling.
pub async fn reset_record(
    drafts: &DraftStore,
    remote: &RemoteStore,
    user: Uuid,
) -> Result<ResumeView, AppError> {
    drafts.discard(user).await?;
    let record = compose_remote(remote, user).await?;
    info!(%user, "draft discarded, record reloaded from remote");
    Ok(ResumeView {
        source: RecordSource::Remote,
        record,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
