use std::path::Path;

use crate::error::{GalleryError, GalleryResult};

pub const DEFAULT_ADMIN_SECRET: &str = "artist123";

pub const ENV_CLOUD_NAME: &str = "GALLERY_CLOUDINARY_CLOUD_NAME";
pub const ENV_UPLOAD_PRESET: &str = "GALLERY_CLOUDINARY_UPLOAD_PRESET";
pub const ENV_PROJECT_ID: &str = "GALLERY_FIRESTORE_PROJECT_ID";
pub const ENV_API_KEY: &str = "GALLERY_FIRESTORE_API_KEY";
pub const ENV_ADMIN_PASSWORD: &str = "GALLERY_ADMIN_PASSWORD";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageHostConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

impl ImageHostConfig {
    pub fn validate(&self) -> GalleryResult<()> {
        if self.cloud_name.trim().is_empty() || self.upload_preset.trim().is_empty() {
            return Err(GalleryError::config(
                "image host needs cloud_name and upload_preset",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentStoreConfig {
    pub project_id: String,
    pub api_key: String,
}

/// Collaborator credentials. The animation core needs none of them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub image_host: Option<ImageHostConfig>,
    #[serde(default)]
    pub document_store: Option<DocumentStoreConfig>,
    #[serde(default = "default_admin_secret")]
    pub admin_secret: String,
}

fn default_admin_secret() -> String {
    DEFAULT_ADMIN_SECRET.to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_host: None,
            document_store: None,
            admin_secret: default_admin_secret(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let image_host = match (get(ENV_CLOUD_NAME), get(ENV_UPLOAD_PRESET)) {
            (Some(cloud_name), Some(upload_preset)) => Some(ImageHostConfig {
                cloud_name,
                upload_preset,
            }),
            _ => None,
        };
        let document_store = match (get(ENV_PROJECT_ID), get(ENV_API_KEY)) {
            (Some(project_id), Some(api_key)) => Some(DocumentStoreConfig { project_id, api_key }),
            _ => None,
        };
        Self {
            image_host,
            document_store,
            admin_secret: get(ENV_ADMIN_PASSWORD).unwrap_or_else(default_admin_secret),
        }
    }

    pub fn from_json_path(path: &Path) -> GalleryResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GalleryError::config(format!("read '{}': {e}", path.display())))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn image_host(&self) -> GalleryResult<&ImageHostConfig> {
        let host = self.image_host.as_ref().ok_or_else(|| {
            GalleryError::config(format!(
                "image host not configured (set {ENV_CLOUD_NAME} and {ENV_UPLOAD_PRESET})"
            ))
        })?;
        host.validate()?;
        Ok(host)
    }

    pub fn document_store(&self) -> GalleryResult<&DocumentStoreConfig> {
        self.document_store.as_ref().ok_or_else(|| {
            GalleryError::config(format!(
                "document store not configured (set {ENV_PROJECT_ID} and {ENV_API_KEY})"
            ))
        })
    }
}
