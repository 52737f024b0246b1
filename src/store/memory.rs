use crate::{
    config::settings::StorageConfig,
    core::{PrintLog, Spool},
    errors::{Error, Result},
    store::Store,
};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// Keeps the encoded collections in a shared map.
///
/// Clones share the same map, so a test can hand one clone to a ledger and
/// keep another to inspect or reload what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    keys: StorageConfig,
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store using the default key names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON stored under `key`, if any.
    pub fn document(&self, key: &str) -> Result<Option<String>> {
        Ok(self.documents()?.get(key).cloned())
    }

    /// Overwrites the raw JSON under `key`.
    pub fn set_document(&self, key: &str, json: String) -> Result<()> {
        self.documents()?.insert(key.to_string(), json);
        Ok(())
    }

    fn documents(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.documents.lock().map_err(|_| Error::Storage {
            message: "Memory store lock poisoned".to_string(),
        })
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.document(key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.set_document(key, json)
    }
}

impl Store for MemoryStore {
    async fn load_spools(&self) -> Result<Vec<Spool>> {
        self.load(&self.keys.spools_key)
    }

    async fn load_print_logs(&self) -> Result<Vec<PrintLog>> {
        self.load(&self.keys.logs_key)
    }

    async fn save_spools(&self, spools: &[Spool]) -> Result<()> {
        self.save(&self.keys.spools_key, spools)
    }

    async fn save_print_logs(&self, logs: &[PrintLog]) -> Result<()> {
        self.save(&self.keys.logs_key, logs)
    }

    async fn save_print(&self, logs: &[PrintLog], spools: &[Spool]) -> Result<()> {
        // Encode both before touching the map so a failure leaves it unchanged
        let logs_json = serde_json::to_string_pretty(logs)?;
        let spools_json = serde_json::to_string_pretty(spools)?;
        let mut documents = self.documents()?;
        documents.insert(self.keys.logs_key.clone(), logs_json);
        documents.insert(self.keys.spools_key.clone(), spools_json);
        Ok(())
    }
}
