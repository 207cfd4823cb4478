use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::cache::keys::mastery_key;
use crate::cache::{CacheError, RedisCache};
use crate::config::Config;
use crate::planning::MasteryMap;

#[derive(Debug, thiserror::Error)]
pub enum MasteryStoreError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[derive(Clone, Default)]
pub struct InMemoryMasteryStore {
    snapshots: Arc<RwLock<HashMap<String, MasteryMap>>>,
}

impl InMemoryMasteryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, student_id: &str) -> Option<MasteryMap> {
        self.snapshots.read().get(student_id).cloned()
    }

    pub fn store(&self, student_id: &str, mastery: MasteryMap) {
        self.snapshots.write().insert(student_id.to_string(), mastery);
    }

    pub fn remove(&self, student_id: &str) -> bool {
        self.snapshots.write().remove(student_id).is_some()
    }
}

/// Per-student mastery snapshots. Reads never fail: an unavailable backend or an
/// undecodable entry reads as an empty map.
#[derive(Clone)]
pub enum MasteryStore {
    Memory(InMemoryMasteryStore),
    Redis { cache: RedisCache, ttl: Duration },
}

impl MasteryStore {
    pub fn in_memory() -> Self {
        MasteryStore::Memory(InMemoryMasteryStore::new())
    }

    pub async fn from_config(config: &Config) -> Self {
        let Some(url) = config.redis_url.as_deref() else {
            info!("REDIS_URL not set, mastery store kept in memory");
            return Self::in_memory();
        };

        match RedisCache::connect(url).await {
            Ok(cache) => {
                info!("mastery store backed by redis");
                MasteryStore::Redis {
                    cache,
                    ttl: config.mastery_ttl,
                }
            }
            Err(err) => {
                warn!(error = %err, "redis unavailable, mastery store kept in memory");
                Self::in_memory()
            }
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            MasteryStore::Memory(_) => "memory",
            MasteryStore::Redis { .. } => "redis",
        }
    }

    pub async fn lookup(&self, student_id: &str) -> MasteryMap {
        match self {
            MasteryStore::Memory(store) => store.lookup(student_id).unwrap_or_default(),
            MasteryStore::Redis { cache, .. } => {
                match cache.get::<MasteryMap>(&mastery_key(student_id)).await {
                    Ok(found) => found.unwrap_or_default(),
                    Err(err) => {
                        warn!(student_id, error = %err, "mastery lookup failed, treating as empty");
                        MasteryMap::new()
                    }
                }
            }
        }
    }

    pub async fn store(&self, student_id: &str, mastery: MasteryMap) -> Result<(), MasteryStoreError> {
        match self {
            MasteryStore::Memory(store) => {
                store.store(student_id, mastery);
                Ok(())
            }
            MasteryStore::Redis { cache, ttl } => {
                cache.set(&mastery_key(student_id), &mastery, *ttl).await?;
                Ok(())
            }
        }
    }

    pub async fn remove(&self, student_id: &str) -> Result<bool, MasteryStoreError> {
        match self {
            MasteryStore::Memory(store) => Ok(store.remove(student_id)),
            MasteryStore::Redis { cache, .. } => Ok(cache.delete(&mastery_key(student_id)).await?),
        }
    }

    pub async fn is_available(&self) -> bool {
        match self {
            MasteryStore::Memory(_) => true,
            MasteryStore::Redis { cache, .. } => cache.is_connected().await,
        }
    }
}
