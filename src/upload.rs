//! Image files and the hosting collaborator they are uploaded to.

use std::path::Path;

use crate::error::{GalleryError, GalleryResult};

/// Largest accepted upload.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Reads the file and sniffs its MIME type from content, then extension.
    pub fn from_path(path: &Path) -> GalleryResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            GalleryError::validation(format!("read image '{}': {e}", path.display()))
        })?;
        let mime = image::guess_format(&bytes)
            .or_else(|_| image::ImageFormat::from_path(path))
            .map(|f| f.to_mime_type().to_owned())
            .unwrap_or_else(|_| FALLBACK_MIME.to_owned());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, mime, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size first, then type, so an oversized file is rejected whatever its MIME.
    pub fn validate(&self) -> GalleryResult<()> {
        if self.size() > MAX_IMAGE_BYTES {
            return Err(GalleryError::validation("Image size must be less than 5MB"));
        }
        if !self.mime.starts_with("image/") {
            return Err(GalleryError::validation("Please select an image file"));
        }
        Ok(())
    }
}

/// External image host. Returns the public URL of the stored image.
pub trait ImageHost {
    fn upload_image(&mut self, file: &ImageFile) -> GalleryResult<String>;
}

#[cfg(feature = "network")]
pub use cloudinary::CloudinaryHost;

#[cfg(feature = "network")]
mod cloudinary {
    use super::{ImageFile, ImageHost};
    use crate::{
        config::ImageHostConfig,
        error::{GalleryError, GalleryResult},
    };

    #[derive(serde::Deserialize)]
    struct UploadResponse {
        secure_url: String,
    }

    /// Unsigned multipart upload using an upload preset.
    pub struct CloudinaryHost {
        config: ImageHostConfig,
        client: reqwest::blocking::Client,
    }

    impl CloudinaryHost {
        pub fn new(config: ImageHostConfig) -> GalleryResult<Self> {
            config.validate()?;
            Ok(Self {
                config,
                client: reqwest::blocking::Client::new(),
            })
        }

        pub fn endpoint(&self) -> String {
            format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.config.cloud_name
            )
        }
    }

    impl ImageHost for CloudinaryHost {
        #[tracing::instrument(skip_all, fields(file = %file.name, bytes = file.bytes.len()))]
        fn upload_image(&mut self, file: &ImageFile) -> GalleryResult<String> {
            let part = reqwest::blocking::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.mime)
                .map_err(|e| GalleryError::transport(format!("mime '{}': {e}", file.mime)))?;
            let form = reqwest::blocking::multipart::Form::new()
                .part("file", part)
                .text("upload_preset", self.config.upload_preset.clone());

            let response = self
                .client
                .post(self.endpoint())
                .multipart(form)
                .send()
                .map_err(|e| GalleryError::transport(e.to_string()))?;
            if !response.status().is_success() {
                return Err(GalleryError::transport(format!(
                    "image host returned {}",
                    response.status()
                )));
            }
            let body: UploadResponse = response
                .json()
                .map_err(|e| GalleryError::transport(format!("decode upload response: {e}")))?;
            Ok(body.secure_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_file_is_rejected_before_type_check() {
        let big = ImageFile::new("movie.mp4", "video/mp4", vec![0; 6 * 1024 * 1024]);
        let err = big.validate().unwrap_err();
        assert!(err.to_string().contains("5MB"));
    }

    #[test]
    fn non_image_is_rejected() {
        let f = ImageFile::new("notes.txt", "text/plain", b"hi".to_vec());
        assert!(f.validate().unwrap_err().to_string().contains("image file"));
        let ok = ImageFile::new("a.png", "image/png", vec![1, 2, 3]);
        ok.validate().unwrap();
    }

    #[test]
    fn from_path_sniffs_png_content() {
        let dir = std::env::temp_dir().join(format!("gallery-ll-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        // PNG signature under a misleading extension
        let path = dir.join("drawing.txt");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.name, "drawing.txt");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
