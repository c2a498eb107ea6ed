//! Scripted `RagApi` double for controller and page tests.

use ikms_api::{
    AnswerResult, HealthStatus, PdfUpload, QuestionRequest, RagApi, UploadResult,
};
use ikms_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Replays queued responses and records every call.
#[derive(Default)]
pub(crate) struct MockApi {
    answers: Mutex<VecDeque<AppResult<AnswerResult>>>,
    uploads: Mutex<VecDeque<AppResult<UploadResult>>>,
    questions: Mutex<Vec<QuestionRequest>>,
    uploaded: Mutex<Vec<PdfUpload>>,
    delay: Duration,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every call take `delay` (tokio time, so paused clocks apply).
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn push_answer(&self, answer: AppResult<AnswerResult>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub(crate) fn push_upload(&self, result: AppResult<UploadResult>) {
        self.uploads.lock().unwrap().push_back(result);
    }

    pub(crate) fn questions(&self) -> Vec<QuestionRequest> {
        self.questions.lock().unwrap().clone()
    }

    pub(crate) fn uploaded(&self) -> Vec<PdfUpload> {
        self.uploaded.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn unscripted() -> AppError {
    AppError::Transport("no scripted response".to_string())
}

/// An answer with just the final text.
pub(crate) fn answer(text: &str) -> AnswerResult {
    AnswerResult {
        answer: text.to_string(),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl RagApi for MockApi {
    fn base_url(&self) -> &str {
        "http://mock"
    }

    async fn ask_question(&self, request: &QuestionRequest) -> AppResult<AnswerResult> {
        self.questions.lock().unwrap().push(request.clone());
        self.pause().await;
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn index_pdf(&self, upload: &PdfUpload) -> AppResult<UploadResult> {
        self.uploaded.lock().unwrap().push(upload.clone());
        self.pause().await;
        self.uploads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn health(&self) -> AppResult<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            version: None,
        })
    }
}
