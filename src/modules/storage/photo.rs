use axum::extract::multipart::Field;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_PHOTO_SIZE;

pub const ALLOWED_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Where a photo lives inside the public prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFolder {
    DamageBefore,
    DamageAfter,
    ClientTicket,
}

impl PhotoFolder {
    pub fn as_path(&self) -> &'static str {
        match self {
            PhotoFolder::DamageBefore => "damage-reports/before",
            PhotoFolder::DamageAfter => "damage-reports/after",
            PhotoFolder::ClientTicket => "client-tickets",
        }
    }
}

/// A photo received from a multipart form, not yet stored
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    /// Read a multipart file field. Empty parts (a form submitted with no file chosen)
    /// yield `None`.
    pub async fn from_field(field: Field<'_>) -> Result<Option<Self>> {
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "photo".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read photo bytes: {}", e);
            AppError::BadRequest(format!("Failed to read photo data: {}", e))
        })?;

        if data.is_empty() {
            return Ok(None);
        }

        let photo = Self {
            file_name,
            content_type,
            data: data.to_vec(),
        };
        photo.validate()?;
        Ok(Some(photo))
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.len() > MAX_PHOTO_SIZE {
            return Err(AppError::BadRequest(format!(
                "Photo too large. Maximum size is {} MB",
                MAX_PHOTO_SIZE / 1024 / 1024
            )));
        }
        if !ALLOWED_PHOTO_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Photo type '{}' is not allowed. Allowed types: {}",
                self.content_type,
                ALLOWED_PHOTO_TYPES.join(", ")
            )));
        }
        Ok(())
    }

    /// Object key relative to the public prefix: `<folder>/<uuid>_<sanitized name>`
    pub fn object_path(&self, folder: PhotoFolder) -> String {
        format!(
            "{}/{}_{}",
            folder.as_path(),
            Uuid::now_v7(),
            sanitize_file_name(&self.file_name)
        )
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "photo".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str, content_type: &str, size: usize) -> PhotoUpload {
        PhotoUpload {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: vec![0u8; size],
        }
    }

    #[test]
    fn test_object_path_uses_folder_and_sanitized_name() {
        let key = photo("../Fuite évier.jpg", "image/jpeg", 4).object_path(PhotoFolder::DamageBefore);
        assert!(key.starts_with("damage-reports/before/"));
        assert!(key.ends_with("_Fuite__vier.jpg"));
        assert!(!key.contains(".."));
    }

    #[test]
    fn test_sanitize_falls_back_for_empty_names() {
        assert_eq!(sanitize_file_name(""), "photo");
        assert_eq!(sanitize_file_name("dir/.."), "photo");
    }

    #[test]
    fn test_validate_rejects_non_images_and_oversized() {
        assert!(photo("a.pdf", "application/pdf", 10).validate().is_err());
        assert!(photo("a.png", "image/png", MAX_PHOTO_SIZE + 1)
            .validate()
            .is_err());
        assert!(photo("a.png", "image/png", 10).validate().is_ok());
    }
}
