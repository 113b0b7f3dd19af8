use crate::constants::MAX_IMAGE_BYTES;
use crate::errors::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An image picked for the add-task form.
///
/// The size ceiling is checked when the file is selected; the bytes are only
/// read and encoded when the task is actually submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    path: PathBuf,
    size: u64,
}

impl ImageAttachment {
    /// Selects `path` as the attachment, rejecting files over 5 MB
    pub fn select(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > MAX_IMAGE_BYTES {
            return Err(Error::ImageTooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }
        debug!("Selected image {} ({} bytes)", path.display(), size);
        Ok(ImageAttachment {
            path: path.to_path_buf(),
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &'static str {
        mime_for_path(&self.path)
    }

    /// Reads the full file and encodes it as a data URI.
    ///
    /// The ceiling is checked again on the bytes actually read, since the
    /// file may have changed since selection.
    pub async fn to_data_uri(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        let size = bytes.len() as u64;
        if size > MAX_IMAGE_BYTES {
            return Err(Error::ImageTooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }
        Ok(encode_data_uri(self.mime_type(), &bytes))
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
