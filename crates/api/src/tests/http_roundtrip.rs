//! Tests for the reqwest client against an in-process fake backend.

use crate::client::{PdfUpload, QuestionRequest, RagApi};
use crate::http::HttpRagClient;
use ikms_core::AppError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[cfg(test)]
mod tests {
    use super::*;

    /// Serve exactly one request with a canned response.
    ///
    /// Returns the base URL and a handle resolving to the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        serve_raw(response).await
    }

    /// Serve exactly one request, replying with `response` verbatim.
    async fn serve_raw(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            // Read headers, then as many body bytes as Content-Length announces.
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&buf);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.trim()
                                .eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_ask_question_posts_json_and_parses_answer() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"answer": "HNSW is a graph index.", "chunk_relevance_scores": [{"chunk_id": 1, "relevance": "HIGHLY_RELEVANT", "keep": true, "rationale": "r1"}]}"#,
        )
        .await;

        let client = HttpRagClient::with_base_url(base_url);
        let answer = client
            .ask_question(&QuestionRequest::new("What is HNSW?"))
            .await
            .unwrap();

        assert_eq!(answer.answer, "HNSW is a graph index.");
        assert_eq!(answer.critic_scores().map(|s| s.len()), Some(1));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /qa HTTP/1.1"));
        assert!(request.contains(r#"{"question":"What is HNSW?"}"#));
    }

    #[tokio::test]
    async fn test_index_pdf_sends_multipart_file_field() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"filename": "paper.pdf", "chunks_indexed": 12, "message": "PDF indexed successfully."}"#,
        )
        .await;

        let client = HttpRagClient::with_base_url(base_url);
        let upload = PdfUpload::new("paper.pdf", b"%PDF-1.4 fake".to_vec());
        let result = client.index_pdf(&upload).await.unwrap();

        assert_eq!(result.message.as_deref(), Some("PDF indexed successfully."));
        assert_eq!(result.chunks_indexed, Some(12));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /index-pdf HTTP/1.1"));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains(r#"name="file"; filename="paper.pdf""#));
        assert!(request.contains("application/pdf"));
        assert!(request.contains("%PDF-1.4 fake"));
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let (base_url, _server) = serve_once(
            "400 Bad Request",
            r#"{"detail": "Only PDF files are supported."}"#,
        )
        .await;

        let client = HttpRagClient::with_base_url(base_url);
        let err = client
            .index_pdf(&PdfUpload::new("paper.pdf", Vec::new()))
            .await
            .unwrap_err();

        match err {
            AppError::Api { status, ref message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Only PDF files are supported."));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_truncated_error_body_still_maps_status() {
        // Announces more body bytes than it sends, then closes.
        let (base_url, _server) = serve_raw(
            "HTTP/1.1 502 Bad Gateway\r\nContent-Type: application/json\r\nContent-Length: 64\r\nConnection: close\r\n\r\n{\"detail\": \"up"
                .to_string(),
        )
        .await;

        let client = HttpRagClient::with_base_url(base_url);
        let err = client
            .ask_question(&QuestionRequest::new("anything"))
            .await
            .unwrap_err();

        match err {
            AppError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, None);
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"status": "healthy", "version": "0.1.0"}"#).await;

        let client = HttpRagClient::with_base_url(format!("{}/", base_url));
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version.as_deref(), Some("0.1.0"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /health HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpRagClient::with_base_url(format!("http://{}", addr));
        let err = client
            .ask_question(&QuestionRequest::new("anything"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transport(_)));
        assert_eq!(err.server_message(), None);
    }
}
