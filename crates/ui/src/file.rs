//! A file picked for upload.

use ikms_api::{PdfUpload, PDF_CONTENT_TYPE};
use ikms_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// A local file chosen in the upload widget.
///
/// The content type is declared from the file extension; the file itself is
/// not opened until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

impl SelectedFile {
    /// Inspect `path` and declare its type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(AppError::Validation(format!("Not a file: {}", path.display())));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size_bytes: metadata.len(),
            content_type,
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type == PDF_CONTENT_TYPE
    }

    /// Size in mebibytes, as shown in the upload widget.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }

    /// Read the file into an upload payload.
    pub async fn read(&self) -> AppResult<PdfUpload> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(PdfUpload {
            file_name: self.name.clone(),
            content_type: self.content_type.clone(),
            bytes,
        })
    }
}
