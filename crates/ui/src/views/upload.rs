//! PDF upload widget.

use super::card::{bar, Card};
use crate::file::SelectedFile;
use ikms_core::AppResult;
use std::path::Path;

const PROGRESS_BAR_WIDTH: usize = 30;

/// Holds the single file selected for upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfUploadWidget {
    selected: Option<SelectedFile>,
}

impl PdfUploadWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the file at `path`, replacing any previous selection.
    pub fn select(&mut self, path: impl AsRef<Path>) -> AppResult<&SelectedFile> {
        let file = SelectedFile::from_path(path)?;
        Ok(self.selected.insert(file))
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Drop the selection. Ignored while an upload is running.
    pub fn clear(&mut self, loading: bool) -> bool {
        if loading {
            return false;
        }
        self.selected = None;
        true
    }

    pub fn can_upload(&self, loading: bool) -> bool {
        self.selected.is_some() && !loading
    }

    pub fn render(&self, loading: bool, progress: u8) -> String {
        let mut card = Card::titled("Upload PDF Document");

        match &self.selected {
            None => {
                card.push("⇪ Choose a PDF to upload (:file <path>)");
            }
            Some(file) => {
                card.push(format!("📄 {}  ({:.2} MB)  (:clear)", file.name, file.size_mb()));
            }
        }

        if progress > 0 {
            card = card.blank().line(format!(
                "{} {}% uploaded",
                bar(usize::from(progress), 100, PROGRESS_BAR_WIDTH),
                progress
            ));
        }

        let action = if self.can_upload(loading) {
            "[ Index Document ]"
        } else if loading {
            "[ Index Document ] (uploading...)"
        } else {
            "[ Index Document ] (disabled)"
        };
        card.blank().line(action).render()
    }
}
