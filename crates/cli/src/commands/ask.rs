//! Ask command handler.
//!
//! Runs one question through the backend and renders the answer display.

use super::stderr_toaster;
use clap::Args;
use ikms_api::create_client;
use ikms_core::{config::AppConfig, AppError, AppResult};
use ikms_ui::qa::MSG_EMPTY_QUESTION;
use ikms_ui::views::{render_answer, AnswerViewState};
use ikms_ui::QaController;

/// Ask a question about the indexed documents
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Use all retrieved chunks without context critic filtering
    #[arg(long)]
    pub no_critic: bool,

    /// Expand the full analysis log and the before-critic context
    #[arg(long)]
    pub expand_all: bool,

    /// Output the raw answer as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let client = create_client(config)?;
        let mut qa = QaController::new(client, stderr_toaster())
            .with_critic(config.use_critic && !self.no_critic);

        let answer = qa
            .submit_question(&self.question)
            .await?
            .ok_or_else(|| AppError::Validation(MSG_EMPTY_QUESTION.to_string()))?;

        if self.json {
            let json = serde_json::to_string_pretty(&answer)?;
            println!("{}", json);
            return Ok(());
        }

        let mut state = AnswerViewState::default();
        if self.expand_all {
            state.relevance.toggle_full_log();
            state.comparison.toggle_before();
        }

        print!(
            "{}",
            render_answer(&answer, answer.comparison_baseline(), &state)
        );
        Ok(())
    }
}
