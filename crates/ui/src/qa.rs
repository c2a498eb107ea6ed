//! Question flow controller.

use crate::toast::Toaster;
use ikms_api::{AnswerResult, QuestionRequest, RagApi};
use ikms_core::AppResult;
use std::sync::Arc;

pub const MSG_EMPTY_QUESTION: &str = "Please enter a question";
pub const MSG_ANSWERED: &str = "Answer retrieved successfully!";
pub const MSG_ANSWER_FAILED: &str = "Failed to get answer";

/// State and operations behind the question form and answer display.
///
/// Submitting takes `&mut self`, so one controller never has two questions in
/// flight; the stored answer is always the one for the latest submission.
pub struct QaController {
    api: Arc<dyn RagApi>,
    toaster: Toaster,

    loading: bool,
    answer: Option<AnswerResult>,
    error: Option<String>,
    use_critic: bool,
}

impl QaController {
    pub fn new(api: Arc<dyn RagApi>, toaster: Toaster) -> Self {
        Self {
            api,
            toaster,
            loading: false,
            answer: None,
            error: None,
            use_critic: true,
        }
    }

    pub fn with_critic(mut self, use_critic: bool) -> Self {
        self.use_critic = use_critic;
        self
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn answer(&self) -> Option<&AnswerResult> {
        self.answer.as_ref()
    }

    /// Message of the last failed submission, cleared when a new one starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn use_critic(&self) -> bool {
        self.use_critic
    }

    /// Flip the context critic flag and return the new value.
    pub fn toggle_critic(&mut self) -> bool {
        self.use_critic = !self.use_critic;
        tracing::debug!("Context critic {}", if self.use_critic { "on" } else { "off" });
        self.use_critic
    }

    /// Ask `question`.
    ///
    /// Returns `Ok(None)` for a blank question (toast only, no request). On
    /// success the previous answer is replaced wholesale. Failures are stored,
    /// shown as a toast and returned.
    pub async fn submit_question(&mut self, question: &str) -> AppResult<Option<AnswerResult>> {
        let Some(call) = self.begin_question(question) else {
            return Ok(None);
        };
        let outcome = call.send().await;
        self.finish_question(outcome).map(Some)
    }

    /// First half of [`submit_question`](Self::submit_question): validate and
    /// mark the controller as loading.
    ///
    /// The returned call owns everything it needs, so the caller can keep
    /// rendering this controller while it runs. Pass its outcome to
    /// [`finish_question`](Self::finish_question).
    pub fn begin_question(&mut self, question: &str) -> Option<QuestionCall> {
        if question.trim().is_empty() {
            self.toaster.error(MSG_EMPTY_QUESTION);
            return None;
        }

        self.loading = true;
        self.error = None;

        Some(QuestionCall {
            api: Arc::clone(&self.api),
            request: QuestionRequest::new(question).with_critic(self.use_critic),
        })
    }

    /// Second half of [`submit_question`](Self::submit_question): store the
    /// outcome, toast it and clear `loading`.
    pub fn finish_question(&mut self, outcome: AppResult<AnswerResult>) -> AppResult<AnswerResult> {
        self.loading = false;

        match outcome {
            Ok(answer) => {
                self.answer = Some(answer.clone());
                self.toaster.success(MSG_ANSWERED);
                Ok(answer)
            }
            Err(err) => {
                tracing::error!("Question failed: {}", err);
                let message = err.user_message(MSG_ANSWER_FAILED).to_string();
                self.toaster.error(message.clone());
                self.error = Some(message);
                Err(err)
            }
        }
    }
}

/// A question request detached from its controller.
pub struct QuestionCall {
    api: Arc<dyn RagApi>,
    request: QuestionRequest,
}

impl QuestionCall {
    pub fn request(&self) -> &QuestionRequest {
        &self.request
    }

    pub async fn send(self) -> AppResult<AnswerResult> {
        self.api.ask_question(&self.request).await
    }
}
