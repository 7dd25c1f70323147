//! Tracker repository
//!
//! Loads and saves the profile, the weight log and the cached diet plan as
//! JSON documents under fixed keys. Unreadable documents are treated as
//! absent so a corrupted value never blocks the app.

use fitjourney_shared::diet_plan::DietPlan;
use fitjourney_shared::{StoreError, UserProfile, WeightEntry};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::store::KeyValueStore;

pub const PROFILE_KEY: &str = "fitjourney_user_profile";
pub const ENTRIES_KEY: &str = "fitjourney_weight_entries";
pub const DIET_PLAN_KEY: &str = "fitjourney_diet_plan";

/// Repository over a [`KeyValueStore`]
#[derive(Clone)]
pub struct TrackerRepository {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
    /// Serializes read-modify-write cycles on the entry list
    write_lock: Arc<Mutex<()>>,
}

impl TrackerRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Fully qualified key, `namespace:key` when a namespace is set
    pub fn key(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.namespace, key)
        }
    }

    async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let full_key = self.key(key);
        let Some(raw) = self.store.get(&full_key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %full_key, error = %e, "Ignoring unreadable stored document");
                Ok(None)
            }
        }
    }

    async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(&self.key(key), raw).await
    }

    pub async fn load_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.load_json(PROFILE_KEY).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        debug!(profile_id = %profile.id, "Saving profile");
        self.save_json(PROFILE_KEY, profile).await
    }

    /// All entries in insertion order
    pub async fn load_entries(&self) -> Result<Vec<WeightEntry>, StoreError> {
        Ok(self.load_json(ENTRIES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_entries(&self, entries: &[WeightEntry]) -> Result<(), StoreError> {
        self.save_json(ENTRIES_KEY, entries).await
    }

    /// Append one entry
    pub async fn add_entry(&self, entry: WeightEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_entries().await?;
        entries.push(entry);
        self.save_entries(&entries).await
    }

    /// Remove an entry by id, returning whether it existed
    pub async fn delete_entry(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_entries().await?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save_entries(&entries).await?;
        Ok(true)
    }

    pub async fn load_diet_plan(&self) -> Result<Option<DietPlan>, StoreError> {
        self.load_json(DIET_PLAN_KEY).await
    }

    pub async fn save_diet_plan(&self, plan: &DietPlan) -> Result<(), StoreError> {
        self.save_json(DIET_PLAN_KEY, plan).await
    }

    /// Remove the profile, every entry and the cached plan
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let keys = [PROFILE_KEY, ENTRIES_KEY, DIET_PLAN_KEY].map(|k| self.key(k));
        self.store.delete(&keys).await
    }
}
