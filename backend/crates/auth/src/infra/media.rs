//! Profile picture storage on the local filesystem

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::repository::{PictureStore, PictureUpload};
use crate::error::{AuthError, AuthResult};

/// Subdirectory of the media root holding profile pictures
pub const PROFILE_IMAGES_DIR: &str = "profile_images";

#[derive(Debug, Clone)]
pub struct FsPictureStore {
    media_root: PathBuf,
}

impl FsPictureStore {
    pub fn new(media_root: impl AsRef<Path>) -> Self {
        Self {
            media_root: media_root.as_ref().to_path_buf(),
        }
    }
}

impl PictureStore for FsPictureStore {
    /// Files get a random name so uploads can never overwrite each other or
    /// escape the media root; only a short alphanumeric extension is kept.
    async fn save(&self, upload: PictureUpload) -> AuthResult<String> {
        let dir = self.media_root.join(PROFILE_IMAGES_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = match safe_extension(&upload.file_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4().simple()),
            None => Uuid::new_v4().simple().to_string(),
        };
        tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

        tracing::debug!(file = %file_name, bytes = upload.bytes.len(), "Stored profile picture");
        Ok(format!("{PROFILE_IMAGES_DIR}/{file_name}"))
    }

    async fn delete(&self, path: &str) -> AuthResult<()> {
        let file_name = path
            .strip_prefix(PROFILE_IMAGES_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
            .ok_or_else(|| AuthError::Internal(format!("not a stored picture: {path}")))?;

        let file = self.media_root.join(PROFILE_IMAGES_DIR).join(file_name);
        match tokio::fs::remove_file(file).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn safe_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_extension() {
        assert_eq!(safe_extension("cat.JPG"), Some("jpg".to_string()));
        assert_eq!(safe_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(safe_extension("noext"), None);
        assert_eq!(safe_extension("../../etc/passwd"), None);
        assert_eq!(safe_extension("x.p;hp"), None);
    }

    #[tokio::test]
    async fn test_save_writes_under_profile_images() {
        let root = tempfile::tempdir().unwrap();
        let store = FsPictureStore::new(root.path());

        let path = store
            .save(PictureUpload {
                file_name: "../escape.gif".to_string(),
                bytes: b"GIF89a".to_vec(),
            })
            .await
            .unwrap();

        assert!(path.starts_with("profile_images/"));
        assert!(path.ends_with(".gif"));
        assert!(!path.contains(".."));
        assert_eq!(std::fs::read(root.path().join(path)).unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_delete_removes_stored_picture() {
        let root = tempfile::tempdir().unwrap();
        let store = FsPictureStore::new(root.path());
        let path = store
            .save(PictureUpload {
                file_name: "me.png".to_string(),
                bytes: b"png".to_vec(),
            })
            .await
            .unwrap();

        store.delete(&path).await.unwrap();
        assert!(!root.path().join(&path).exists());

        // Deleting twice is fine
        store.delete(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_refuses_paths_outside_profile_images() {
        let root = tempfile::tempdir().unwrap();
        let store = FsPictureStore::new(root.path());

        assert!(store.delete("../secret.txt").await.is_err());
        assert!(store.delete("profile_images/../x").await.is_err());
        assert!(store.delete("profile_images/").await.is_err());
    }
}
