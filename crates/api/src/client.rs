//! API client abstraction and request types.
//!
//! The controllers only see the `RagApi` trait, so the HTTP implementation can
//! be swapped for a test double.

use crate::types::{AnswerResult, HealthStatus, UploadResult};
use ikms_core::AppResult;
use serde::{Deserialize, Serialize};

/// Multipart field the document is sent under.
pub const PDF_FIELD_NAME: &str = "file";

/// Declared content type accepted by the indexing endpoint.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A question for the `/qa` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// Question text, forwarded as typed
    pub question: String,

    /// Context critic toggle. Only sent when the client knows the wire name.
    #[serde(skip)]
    pub use_critic: bool,
}

impl QuestionRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            use_critic: true,
        }
    }

    /// Set the context critic flag.
    pub fn with_critic(mut self, use_critic: bool) -> Self {
        self.use_critic = use_critic;
        self
    }
}

/// A document for the `/index-pdf` endpoint. The bytes are passed through unopened.
#[derive(Clone, PartialEq)]
pub struct PdfUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            bytes,
        }
    }
}

impl std::fmt::Debug for PdfUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Trait for the RAG backend.
///
/// Every call is a single attempt: no retry, no backoff, no timeout. Transport
/// and HTTP failures are returned to the caller unchanged.
#[async_trait::async_trait]
pub trait RagApi: Send + Sync {
    /// Base URL this client talks to.
    fn base_url(&self) -> &str;

    /// Ask a question.
    ///
    /// # Arguments
    /// * `request` - The question and critic flag
    ///
    /// # Returns
    /// The parsed answer body
    async fn ask_question(&self, request: &QuestionRequest) -> AppResult<AnswerResult>;

    /// Upload a PDF for indexing.
    async fn index_pdf(&self, upload: &PdfUpload) -> AppResult<UploadResult>;

    /// Check that the backend is up.
    async fn health(&self) -> AppResult<HealthStatus>;
}
