//! Draft store — makes the working record durable across reloads.
//!
//! The entire record is serialized on every mutation (no partial writes;
//! the record is small) under a fixed per-user key. A draft fully supersedes
//! the remote composition until it is discarded, which happens only after a
//! successful remote save or an explicit reset.

pub mod backend;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::resume::ResumeRecord;
use backend::DraftBackend;

pub const DRAFT_KEY_PREFIX: &str = "resume:draft";

fn draft_key(user: Uuid) -> String {
    format!("{DRAFT_KEY_PREFIX}:{user}")
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("draft backend error: {0}")]
    Backend(String),

    #[error("draft serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted shape: the record plus a save timestamp.
#[derive(Debug, Serialize, Deserialize)]
struct DraftEnvelope {
    saved_at: DateTime<Utc>,
    record: ResumeRecord,
}

#[derive(Clone)]
pub struct DraftStore {
    backend: Arc<dyn DraftBackend>,
}

impl DraftStore {
    pub fn new(backend: Arc<dyn DraftBackend>) -> Self {
        Self { backend }
    }

    /// Returns the stored draft, if any. An unparseable draft is discarded
    /// and reported as absent: corrupt local state must never block the
    /// session.
    pub async fn load(&self, user: Uuid) -> Result<Option<ResumeRecord>, DraftError> {
        let key = draft_key(user);
        let Some(raw) = self.backend.get(&key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<DraftEnvelope>(&raw) {
            Ok(envelope) => Ok(Some(envelope.record)),
            Err(err) => {
                warn!(%user, %err, "stored draft is unparseable, discarding it");
                self.backend.remove(&key).await?;
                Ok(None)
            }
        }
    }

    /// Serializes the whole record under the user's draft key.
    pub async fn persist(&self, user: Uuid, record: &ResumeRecord) -> Result<(), DraftError> {
        let envelope = DraftEnvelope {
            saved_at: Utc::now(),
            record: record.clone(),
        };
        let raw = serde_json::to_string(&envelope)?;
        self.backend.set(&draft_key(user), &raw).await
    }

    /// Clears the draft. Called after a successful remote save and on reset.
    pub async fn discard(&self, user: Uuid) -> Result<(), DraftError> {
        self.backend.remove(&draft_key(user)).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
