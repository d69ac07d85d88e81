#![allow(dead_code)]

//! Key-value backends for the draft store.
//!
//! The production backend is Redis; the in-memory backend serves tests and
//! local development without external services.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use redis::AsyncCommands;

use super::DraftError;

#[async_trait]
pub trait DraftBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), DraftError>;
    async fn remove(&self, key: &str) -> Result<(), DraftError>;
}

fn backend_err(err: redis::RedisError) -> DraftError {
    DraftError::Backend(err.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisDraftBackend {
    client: redis::Client,
}

impl RedisDraftBackend {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DraftBackend for RedisDraftBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend_err)?;
        conn.get(key).await.map_err(backend_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DraftError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend_err)?;
        let _: () = conn.set(key, value).await.map_err(backend_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DraftError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend_err)?;
        let _: () = conn.del(key).await.map_err(backend_err)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryDraftBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftBackend for MemoryDraftBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DraftError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DraftError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
