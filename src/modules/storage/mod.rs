//! Photo storage
//!
//! Damage report and ticket photos are written to an S3-compatible bucket under a
//! publicly readable prefix; the stored value is the public URL.

mod minio_client;
mod photo;

#[cfg(test)]
mod memory;

use async_trait::async_trait;

use crate::core::error::Result;

pub use minio_client::MinIOClient;
pub use photo::{PhotoFolder, PhotoUpload, ALLOWED_PHOTO_TYPES};

#[cfg(test)]
pub use memory::MemoryObjectStore;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write a publicly readable object and return its public URL.
    /// `path` is relative to the public prefix.
    async fn put_public(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<String>;

    async fn put_photo(&self, folder: PhotoFolder, photo: PhotoUpload) -> Result<String> {
        let path = photo.object_path(folder);
        self.put_public(&path, photo.data, &photo.content_type).await
    }
}
