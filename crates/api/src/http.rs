//! HTTP implementation of the RAG backend client.
//!
//! Endpoints:
//! - `POST /qa` with a JSON body
//! - `POST /index-pdf` with a multipart body
//! - `GET /health`

use crate::client::{PdfUpload, QuestionRequest, RagApi, PDF_FIELD_NAME};
use crate::types::{AnswerResult, HealthStatus, UploadResult};
use ikms_core::{AppError, AppResult};
use serde::de::DeserializeOwned;

/// Backend client over reqwest.
pub struct HttpRagClient {
    /// Base URL without trailing slash
    base_url: String,

    /// Wire name of the critic flag, when the backend accepts one
    critic_param: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpRagClient {
    /// Create a client for the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            critic_param: None,
            client: reqwest::Client::new(),
        }
    }

    /// Send the critic flag under `param` on every question.
    pub fn with_critic_param(mut self, param: impl Into<String>) -> Self {
        self.critic_param = Some(param.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the JSON body for `/qa`.
    fn to_wire_request(&self, request: &QuestionRequest) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(
            "question".to_string(),
            serde_json::Value::String(request.question.clone()),
        );
        if let Some(ref param) = self.critic_param {
            body.insert(param.clone(), serde_json::Value::Bool(request.use_critic));
        }
        serde_json::Value::Object(body)
    }

    /// Turn a response into a parsed body or an `AppError::Api`.
    async fn read_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        endpoint: &str,
    ) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(endpoint, "Failed to read error body: {}", e);
                    String::new()
                }
            };
            let message = extract_error_message(&body);
            tracing::warn!(
                endpoint,
                status = status.as_u16(),
                message = ?message,
                "Backend returned an error"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            AppError::Transport(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at a string `message` field first, then a string `detail` field.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| {
            value
                .get(*key)
                .and_then(|v| v.as_str())
                .filter(|msg| !msg.is_empty())
        })
        .map(str::to_string)
}

#[async_trait::async_trait]
impl RagApi for HttpRagClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ask_question(&self, request: &QuestionRequest) -> AppResult<AnswerResult> {
        tracing::info!("Sending question to backend");
        tracing::debug!("Request: {:?}", request);

        let body = self.to_wire_request(request);
        let response = self
            .client
            .post(self.url("/qa"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to send question: {}", e)))?;

        let answer: AnswerResult = self.read_response(response, "/qa").await?;

        tracing::info!("Received answer from backend");
        tracing::debug!(
            "Answer has {} critic scores, {} sources",
            answer.chunk_relevance_scores.as_ref().map_or(0, Vec::len),
            answer.sources.as_ref().map_or(0, Vec::len)
        );

        Ok(answer)
    }

    async fn index_pdf(&self, upload: &PdfUpload) -> AppResult<UploadResult> {
        tracing::info!("Uploading {} for indexing", upload.file_name);
        tracing::debug!("Upload: {:?}", upload);

        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| AppError::Transport(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part(PDF_FIELD_NAME, part);

        let response = self
            .client
            .post(self.url("/index-pdf"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to upload document: {}", e)))?;

        let result: UploadResult = self.read_response(response, "/index-pdf").await?;

        tracing::info!("Backend indexed {}", upload.file_name);
        Ok(result)
    }

    async fn health(&self) -> AppResult<HealthStatus> {
        tracing::debug!("Checking backend health at {}", self.base_url);

        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to reach backend: {}", e)))?;

        self.read_response(response, "/health").await
    }
}
