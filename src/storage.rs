//! Local object storage for avatars and reel videos.
//!
//! Keys follow `{user_id}/{timestamp}.{ext}` and are never overwritten; the
//! media root is served statically so every stored object has a public URL.

use std::path::PathBuf;

use crate::services::ServiceError;

const ALLOWED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "mp4", "mov", "webm"];

#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Store a blob under a fresh key and return its public URL.
    pub fn save(&self, user_id: i32, ext: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ServiceError::Validation(format!(
                "Unsupported file extension '{}'",
                ext
            )));
        }
        if bytes.is_empty() {
            return Err(ServiceError::Validation("Empty upload".to_string()));
        }

        let key = format!("{}/{}.{}", user_id, chrono::Utc::now().timestamp_millis(), ext);
        let path = self.root.join(&key);

        // Keys are timestamped, so a collision means a duplicate submission.
        if path.exists() {
            return Err(ServiceError::Database(format!(
                "Object key '{}' already exists",
                key
            )));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ServiceError::Database(e.to_string()))?;
        }
        std::fs::write(&path, bytes).map_err(|e| ServiceError::Database(e.to_string()))?;

        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key
        ))
    }

}
