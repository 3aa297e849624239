use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Errors raised while loading an image from disk.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The file could not be read.
    #[error("failed to read image {path}: {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path has no usable file name component.
    #[error("image path has no file name: {0}")]
    NoFileName(String),
}

/// An in-memory image selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME content type (e.g. `"image/png"`).
    pub content_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

impl ImageBlob {
    /// Create a blob from raw parts.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read an image from disk, inferring the content type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ImageError::NoFileName(path.display().to_string()))?
            .to_owned();
        let data = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let content_type = content_type_for(&file_name).to_owned();

        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }

    /// Size of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Image bytes never show up in logs or debug output.
impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Guess an image MIME type from a file name.
#[must_use]
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
