//! Mock object storage for uploaded documents.
//!
//! Stands in for a hosted media service in this demo: objects live in
//! memory and the returned URLs are deterministic, so the document routes
//! and their tests exercise the full upload/delete flow without network
//! credentials. Keys follow the hosted layout
//! `udyam-registration/{registration_id}/{document_type}_{millis}` so the
//! URLs stored on a registration look like the real thing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;

use udyam_core::RegistrationId;
use udyam_state::DocumentType;

/// Base URL prefixed to every stored object's key.
pub const STORAGE_BASE_URL: &str = "https://storage.udyam.local";

/// Errors from the object store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// No object is stored at the given URL.
    #[error("no stored object at {0}")]
    Missing(String),
    /// The URL does not point into this store.
    #[error("URL is not under the storage base: {0}")]
    ForeignUrl(String),
}

/// A stored object's bytes and content type.
#[derive(Debug, Clone)]
struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
}

/// The handle returned for each successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// Storage key, unique per upload.
    pub public_id: String,
    /// Full URL to hand back to clients and persist on the registration.
    pub url: String,
}

/// In-memory object store keyed by public ID.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an uploaded file and return its handle.
    ///
    /// `index` disambiguates files sharing a document type within one
    /// multi-upload request, since the millisecond timestamp alone may
    /// collide.
    pub fn put(
        &self,
        registration_id: &RegistrationId,
        kind: DocumentType,
        content_type: &str,
        bytes: Vec<u8>,
        index: Option<usize>,
    ) -> UploadedObject {
        let millis = Utc::now().timestamp_millis();
        let public_id = match index {
            Some(i) => format!(
                "udyam-registration/{registration_id}/{}_{millis}_{i}",
                kind.as_str()
            ),
            None => format!("udyam-registration/{registration_id}/{}_{millis}", kind.as_str()),
        };
        let url = format!("{STORAGE_BASE_URL}/{public_id}");

        self.objects.write().insert(
            public_id.clone(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        UploadedObject { public_id, url }
    }

    /// Delete the object a stored URL points at.
    ///
    /// Callers treat failure here as non-fatal (log and continue), the
    /// way the portal ignores media-service delete errors: the record's
    /// document slot is the source of truth, the blob is best-effort.
    pub fn delete_by_url(&self, url: &str) -> Result<(), StorageError> {
        let public_id = url
            .strip_prefix(STORAGE_BASE_URL)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))?;
        self.objects
            .write()
            .remove(public_id)
            .map(|_| ())
            .ok_or_else(|| StorageError::Missing(url.to_string()))
    }

    /// Content type of a stored object, if present. Used by tests.
    pub fn content_type(&self, public_id: &str) -> Option<String> {
        self.objects
            .read()
            .get(public_id)
            .map(|o| o.content_type.clone())
    }

    /// Size in bytes of a stored object, if present.
    pub fn size(&self, public_id: &str) -> Option<usize> {
        self.objects.read().get(public_id).map(|o| o.bytes.len())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
