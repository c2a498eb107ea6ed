//! Client crate for the IKMS multi-agent RAG backend.
//!
//! The backend does retrieval, context-critic filtering, summarization and
//! verification; this crate only formats requests and parses responses.
//!
//! # Example
//! ```no_run
//! use ikms_api::{HttpRagClient, QuestionRequest, RagApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpRagClient::with_base_url("http://localhost:8000");
//! let answer = client.ask_question(&QuestionRequest::new("What is HNSW?")).await?;
//! println!("{}", answer.answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod http;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main types
pub use client::{PdfUpload, QuestionRequest, RagApi, PDF_CONTENT_TYPE, PDF_FIELD_NAME};
pub use factory::create_client;
pub use http::HttpRagClient;
pub use types::{
    AnswerResult, ChunkRelevanceScore, HealthStatus, Relevance, Source, SourceMetadata,
    UploadResult,
};
