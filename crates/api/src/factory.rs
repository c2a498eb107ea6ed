//! Backend client factory.
//!
//! Builds the `RagApi` implementation from application configuration.

use crate::client::RagApi;
use crate::http::HttpRagClient;
use ikms_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Create a backend client from configuration.
///
/// # Errors
/// Returns `AppError::Config` if the base URL has no http(s) scheme.
pub fn create_client(config: &AppConfig) -> AppResult<Arc<dyn RagApi>> {
    let base_url = config.api_base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "Unsupported backend URL: {}",
            config.api_base_url
        )));
    }

    let mut client = HttpRagClient::with_base_url(base_url);
    if let Some(ref param) = config.critic_param {
        client = client.with_critic_param(param.clone());
    }

    tracing::debug!("Created backend client for {}", client.base_url());
    Ok(Arc::new(client))
}
