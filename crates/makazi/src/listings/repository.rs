use async_trait::async_trait;
use mime::Mime;

use super::domain::{ImageRef, ListingPayload, OwnerId, PropertyId, PropertyRecord};

/// Backend that owns durable listing storage. The listing form only ever creates or
/// replaces whole records; consistency is the backend's concern.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn create(
        &self,
        owner: &OwnerId,
        listing: ListingPayload,
    ) -> Result<PropertyRecord, PersistenceError>;

    async fn update(
        &self,
        id: &PropertyId,
        listing: ListingPayload,
    ) -> Result<PropertyRecord, PersistenceError>;

    async fn fetch(&self, id: &PropertyId) -> Result<Option<PropertyRecord>, PersistenceError>;

    async fn list(&self) -> Result<Vec<PropertyRecord>, PersistenceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("listing already exists")]
    Conflict,
    #[error("listing not found")]
    NotFound,
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}

/// File picked by the landlord, not yet uploaded.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: Mime, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }
}

/// Object storage for listing photos. Returns the reference that ends up in `images`.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn upload(&self, file: ImageFile) -> Result<ImageRef, UploadError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("{file_name} is not an image ({content_type})")]
    UnsupportedMedia {
        file_name: String,
        content_type: String,
    },
    #[error("{file_name} is empty")]
    Empty { file_name: String },
    #[error("image upload failed: {0}")]
    Transport(String),
}
