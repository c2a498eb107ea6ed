//! Index command handler.

use super::{indexing_controller, stderr_toaster};
use clap::Args;
use ikms_api::create_client;
use ikms_core::{config::AppConfig, AppError, AppResult};
use ikms_ui::indexing::MSG_NOT_PDF;
use ikms_ui::views::render_upload_success;
use ikms_ui::SelectedFile;
use std::path::PathBuf;

/// Upload a PDF so the backend indexes it
#[derive(Args, Debug)]
pub struct IndexCommand {
    /// Path to the PDF file
    pub file: PathBuf,

    /// Output the server response as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndexCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing index command");
        tracing::debug!("Index command options: {:?}", self);

        let file = SelectedFile::from_path(&self.file)?;
        let client = create_client(config)?;
        let mut indexing = indexing_controller(config, client, stderr_toaster());

        // Only a non-PDF file is rejected locally here; a file is always given
        let result = indexing
            .upload_pdf(Some(&file))
            .await?
            .ok_or_else(|| AppError::Validation(MSG_NOT_PDF.to_string()))?;

        if self.json {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        } else {
            print!("{}", render_upload_success(&result));
        }

        Ok(())
    }
}
