//! In-memory fakes for the remote collaborator seams, with call counters.
//! Shared by the sync-engine and session tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{Collection, Profile, SyncedItem};
use crate::clients::ApiError;
use crate::models::resume::PersonalInfo;

pub(crate) struct MockCollection<T> {
    store: Mutex<Vec<T>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    last_create_payload: Mutex<Option<Value>>,
    fail_creates: bool,
}

impl<T: SyncedItem> MockCollection<T> {
    pub fn new(seed: Vec<T>) -> Self {
        Self {
            store: Mutex::new(seed),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            last_create_payload: Mutex::new(None),
            fail_creates: false,
        }
    }

    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn last_create_payload(&self) -> Option<Value> {
        self.last_create_payload.lock().unwrap().clone()
    }

    pub fn reset_counters(&self) {
        self.creates.store(0, Ordering::SeqCst);
        self.updates.store(0, Ordering::SeqCst);
        self.deletes.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T: SyncedItem> Collection<T> for MockCollection<T> {
    async fn get_all(&self, _user: Uuid) -> Result<Vec<T>, ApiError> {
        Ok(self.store.lock().unwrap().clone())
    }

    async fn create(&self, _user: Uuid, item: &T) -> Result<T, ApiError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates {
            return Err(ApiError::Status {
                status: 500,
                message: "mock create failure".to_string(),
            });
        }
        *self.last_create_payload.lock().unwrap() = Some(item.payload());
        let mut stored = item.clone();
        stored.set_remote_id(Uuid::new_v4());
        self.store.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, _user: Uuid, id: Uuid, item: &T) -> Result<T, ApiError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let slot = store
            .iter_mut()
            .find(|existing| existing.remote_id() == Some(id))
            .ok_or_else(|| ApiError::Invalid(format!("update of unknown id {id}")))?;
        let mut updated = item.clone();
        updated.set_remote_id(id);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, _user: Uuid, id: Uuid) -> Result<(), ApiError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let pos = store
            .iter()
            .position(|existing| existing.remote_id() == Some(id))
            .ok_or_else(|| ApiError::Invalid(format!("delete of unknown id {id}")))?;
        store.remove(pos);
        Ok(())
    }
}

pub(crate) struct MockProfile {
    profile: Mutex<PersonalInfo>,
    updates: AtomicUsize,
}

impl MockProfile {
    pub fn new(profile: PersonalInfo) -> Self {
        Self {
            profile: Mutex::new(profile),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Profile for MockProfile {
    async fn get(&self, _user: Uuid) -> Result<PersonalInfo, ApiError> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn update(&self, _user: Uuid, info: &PersonalInfo) -> Result<PersonalInfo, ApiError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        *self.profile.lock().unwrap() = info.clone();
        Ok(info.clone())
    }
}
