use async_trait::async_trait;
use chrono::Utc;
use makazi::listings::{
    ImageFile, ImageRef, ImageStorage, ListingPayload, ListingStore, OwnerId, PersistenceError,
    PropertyId, PropertyRecord, UploadError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingStore {
    records: Arc<Mutex<BTreeMap<PropertyId, PropertyRecord>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryListingStore {
    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<PropertyId, PropertyRecord>>, PersistenceError> {
        self.records
            .lock()
            .map_err(|_| PersistenceError::Unavailable("listing store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn create(
        &self,
        owner: &OwnerId,
        listing: ListingPayload,
    ) -> Result<PropertyRecord, PersistenceError> {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = PropertyId(format!("prop-{next:06}"));
        let now = Utc::now();
        let record = PropertyRecord {
            id: id.clone(),
            owner_id: owner.clone(),
            listing,
            created_at: now,
            updated_at: now,
        };

        let mut guard = self.records()?;
        if guard.contains_key(&id) {
            return Err(PersistenceError::Conflict);
        }
        guard.insert(id, record.clone());
        debug!(property_id = %record.id.0, "listing inserted");
        Ok(record)
    }

    async fn update(
        &self,
        id: &PropertyId,
        listing: ListingPayload,
    ) -> Result<PropertyRecord, PersistenceError> {
        let mut guard = self.records()?;
        let record = guard.get_mut(id).ok_or(PersistenceError::NotFound)?;
        record.listing = listing;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn fetch(&self, id: &PropertyId) -> Result<Option<PropertyRecord>, PersistenceError> {
        Ok(self.records()?.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<PropertyRecord>, PersistenceError> {
        Ok(self.records()?.values().cloned().collect())
    }
}

/// Keeps uploaded photos in memory and hands out stable URLs under `base_url`.
#[derive(Clone)]
pub(crate) struct InMemoryImageStorage {
    base_url: String,
    objects: Arc<Mutex<BTreeMap<String, usize>>>,
}

impl InMemoryImageStorage {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::default(),
        }
    }

    pub(crate) fn stored_bytes(&self) -> usize {
        self.objects
            .lock()
            .map(|objects| objects.values().sum())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload(&self, file: ImageFile) -> Result<ImageRef, UploadError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| UploadError::Transport("image storage mutex poisoned".to_string()))?;
        let key = format!("{:04}-{}", objects.len() + 1, file.file_name);
        objects.insert(key.clone(), file.bytes.len());
        Ok(ImageRef(format!("{}/{key}", self.base_url)))
    }
}
