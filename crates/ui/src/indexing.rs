//! Upload flow controller.
//!
//! Validates the selected file, runs the synthetic progress bar while the
//! backend indexes the document, and reports the outcome as a toast.

use crate::file::SelectedFile;
use crate::progress::{ProgressReporter, SyntheticProgress};
use crate::toast::Toaster;
use ikms_api::{RagApi, UploadResult};
use ikms_core::AppResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const MSG_NO_FILE: &str = "Please select a file";
pub const MSG_NOT_PDF: &str = "Please upload a PDF file";
pub const MSG_INDEXED: &str = "PDF indexed successfully!";
pub const MSG_INDEX_FAILED: &str = "Failed to index PDF";

/// State and operations behind the upload widget.
pub struct IndexingController {
    api: Arc<dyn RagApi>,
    toaster: Toaster,
    reporter: ProgressReporter,
    policy: SyntheticProgress,

    loading: bool,
    progress: u8,
    /// When the displayed progress drops back to zero
    reset_at: Option<Instant>,
    result: Option<UploadResult>,
    /// Name of the file being uploaded, for progress events and logs
    file_name: String,
}

impl IndexingController {
    pub fn new(api: Arc<dyn RagApi>, toaster: Toaster) -> Self {
        Self {
            api,
            toaster,
            reporter: ProgressReporter::noop(),
            policy: SyntheticProgress::default(),
            loading: false,
            progress: 0,
            reset_at: None,
            result: None,
            file_name: String::new(),
        }
    }

    pub fn with_policy(mut self, policy: SyntheticProgress) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reporter(mut self, reporter: ProgressReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current bar value in `0..=100`. Reads 0 once a scheduled reset is due.
    pub fn progress(&self) -> u8 {
        match self.reset_at {
            Some(at) if Instant::now() >= at => 0,
            _ => self.progress,
        }
    }

    /// Last successful upload result; kept until the next success.
    pub fn result(&self) -> Option<&UploadResult> {
        self.result.as_ref()
    }

    /// Time between synthetic progress ticks.
    pub fn tick_interval(&self) -> Duration {
        self.policy.interval
    }

    /// Upload `file` for indexing.
    ///
    /// Returns `Ok(None)` when the file is rejected locally (a toast explains
    /// why and no request is made). Backend and transport failures are shown
    /// as a toast and then returned.
    pub async fn upload_pdf(
        &mut self,
        file: Option<&SelectedFile>,
    ) -> AppResult<Option<UploadResult>> {
        let Some(call) = self.begin_upload(file) else {
            return Ok(None);
        };
        let outcome = self.run_upload(call).await;
        self.finish_upload(outcome).map(Some)
    }

    /// First half of [`upload_pdf`](Self::upload_pdf): validate the file and
    /// mark the controller as loading.
    ///
    /// While the returned call runs, the caller drives the bar with
    /// [`tick`](Self::tick) every [`tick_interval`](Self::tick_interval) and
    /// passes the outcome to [`finish_upload`](Self::finish_upload).
    pub fn begin_upload(&mut self, file: Option<&SelectedFile>) -> Option<UploadCall> {
        let Some(file) = file else {
            self.toaster.error(MSG_NO_FILE);
            return None;
        };

        if !file.is_pdf() {
            tracing::debug!(
                "Rejected {} with declared type {}",
                file.name,
                file.content_type
            );
            self.toaster.error(MSG_NOT_PDF);
            return None;
        }

        tracing::info!("Indexing {} ({} bytes)", file.name, file.size_bytes);

        self.loading = true;
        self.progress = 0;
        self.reset_at = None;
        self.file_name = file.name.clone();

        Some(UploadCall {
            api: Arc::clone(&self.api),
            file: file.clone(),
        })
    }

    /// Advance the synthetic bar by one step. Ignored when idle.
    pub fn tick(&mut self) {
        if !self.loading {
            return;
        }
        let next = self.policy.advance(self.progress);
        if next != self.progress {
            self.set_progress(next);
        }
    }

    /// Second half of [`upload_pdf`](Self::upload_pdf): store the outcome,
    /// toast it, clear `loading` and schedule the bar reset.
    pub fn finish_upload(&mut self, outcome: AppResult<UploadResult>) -> AppResult<UploadResult> {
        self.loading = false;
        self.reset_at = Some(Instant::now() + self.policy.reset_delay);

        match outcome {
            Ok(result) => {
                self.set_progress(100);
                self.result = Some(result.clone());
                self.toaster.success(MSG_INDEXED);
                Ok(result)
            }
            Err(err) => {
                tracing::error!("Indexing {} failed: {}", self.file_name, err);
                self.toaster.error(err.user_message(MSG_INDEX_FAILED));
                Err(err)
            }
        }
    }

    /// Read the file and call the backend, ticking progress until it resolves.
    async fn run_upload(&mut self, call: UploadCall) -> AppResult<UploadResult> {
        let upload = call.file.read().await?;
        let request = call.api.index_pdf(&upload);
        tokio::pin!(request);

        let interval = self.policy.interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);

        loop {
            tokio::select! {
                outcome = &mut request => return outcome,
                _ = ticker.tick() => self.tick(),
            }
        }
    }

    fn set_progress(&mut self, value: u8) {
        self.progress = value.min(100);
        self.reporter.upload(self.progress, &self.file_name);
    }
}

/// An upload request detached from its controller.
pub struct UploadCall {
    api: Arc<dyn RagApi>,
    file: SelectedFile,
}

impl UploadCall {
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Read the file and send it to the backend.
    pub async fn send(self) -> AppResult<UploadResult> {
        let upload = self.file.read().await?;
        self.api.index_pdf(&upload).await
    }
}
