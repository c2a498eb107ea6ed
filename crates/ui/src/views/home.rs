//! The single page: upload step, question step, answers step.

use super::answer::{render_answer, AnswerViewState};
use super::card::Card;
use super::layout::render_layout;
use super::question_form::QuestionForm;
use super::upload::PdfUploadWidget;
use crate::indexing::{IndexingController, UploadCall};
use crate::qa::{QaController, QuestionCall};
use ikms_api::{AnswerResult, UploadResult};
use ikms_core::AppResult;

pub const UPLOAD_FALLBACK_MESSAGE: &str =
    "Your document has been processed and is ready for queries.";

/// Page state: both controllers plus the widgets' local state.
pub struct HomePage {
    indexing: IndexingController,
    qa: QaController,
    upload: PdfUploadWidget,
    form: QuestionForm,
    answer_view: AnswerViewState,
    /// Before-critic context of the latest answer that carried one
    original_context: Option<String>,
}

impl HomePage {
    pub fn new(indexing: IndexingController, qa: QaController) -> Self {
        Self {
            indexing,
            qa,
            upload: PdfUploadWidget::new(),
            form: QuestionForm::new(),
            answer_view: AnswerViewState::default(),
            original_context: None,
        }
    }

    pub fn indexing(&self) -> &IndexingController {
        &self.indexing
    }

    pub fn qa(&self) -> &QaController {
        &self.qa
    }

    pub fn upload_widget(&self) -> &PdfUploadWidget {
        &self.upload
    }

    pub fn upload_widget_mut(&mut self) -> &mut PdfUploadWidget {
        &mut self.upload
    }

    pub fn form(&self) -> &QuestionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuestionForm {
        &mut self.form
    }

    pub fn answer_view_mut(&mut self) -> &mut AnswerViewState {
        &mut self.answer_view
    }

    pub fn original_context(&self) -> Option<&str> {
        self.original_context.as_deref()
    }

    pub fn toggle_critic(&mut self) -> bool {
        self.qa.toggle_critic()
    }

    /// Send the selected file to the upload controller.
    pub async fn handle_upload(&mut self) -> AppResult<Option<UploadResult>> {
        self.indexing.upload_pdf(self.upload.selected()).await
    }

    /// Start uploading the selected file without waiting for it.
    pub fn begin_upload(&mut self) -> Option<UploadCall> {
        self.indexing.begin_upload(self.upload.selected())
    }

    pub fn tick_upload(&mut self) {
        self.indexing.tick();
    }

    pub fn finish_upload(&mut self, outcome: AppResult<UploadResult>) -> AppResult<UploadResult> {
        self.indexing.finish_upload(outcome)
    }

    /// Submit whatever is in the question form. Does nothing if the form
    /// does not allow submitting.
    pub async fn submit_form(&mut self) -> AppResult<Option<AnswerResult>> {
        let Some(call) = self.begin_form_question() else {
            return Ok(None);
        };
        let outcome = call.send().await;
        self.finish_question(outcome).map(Some)
    }

    /// Take the form's question and start asking it without waiting for the
    /// answer. `None` if the form does not allow submitting.
    pub fn begin_form_question(&mut self) -> Option<QuestionCall> {
        let question = self.form.take_submission(self.qa.loading())?;
        self.qa.begin_question(&question)
    }

    /// Ask `question` and remember the comparison baseline from the result.
    pub async fn handle_question_submit(
        &mut self,
        question: &str,
    ) -> AppResult<Option<AnswerResult>> {
        let Some(call) = self.qa.begin_question(question) else {
            return Ok(None);
        };
        let outcome = call.send().await;
        self.finish_question(outcome).map(Some)
    }

    /// Hand a finished question to the controller and reset the answer view.
    pub fn finish_question(&mut self, outcome: AppResult<AnswerResult>) -> AppResult<AnswerResult> {
        let answer = self.qa.finish_question(outcome)?;

        self.answer_view.reset();
        if let Some(baseline) = answer.comparison_baseline() {
            self.original_context = Some(baseline.to_string());
        }

        Ok(answer)
    }

    /// Render the whole page inside the layout shell.
    pub fn render(&self) -> String {
        let mut main = String::new();

        main.push_str(&section_heading(1, "Upload Documents", "Index PDF documents for querying"));
        main.push_str(
            &self
                .upload
                .render(self.indexing.loading(), self.indexing.progress()),
        );
        if let Some(result) = self.indexing.result() {
            main.push_str(&render_upload_success(result));
        }
        main.push_str(
            &Card::titled("📋 Instructions")
                .line("• Upload PDF documents to index them")
                .line("• Wait for confirmation message")
                .line("• Then ask questions below ↓")
                .render(),
        );

        main.push('\n');
        main.push_str(&section_heading(
            2,
            "Ask Questions",
            "Get intelligent answers with context filtering",
        ));
        main.push_str(&self.form.render(self.qa.loading(), self.qa.use_critic()));

        let answer = self.qa.answer();
        if self.qa.loading() || answer.is_some() {
            main.push('\n');
            main.push_str(&section_heading(
                3,
                "Answers & Analysis",
                "AI-powered responses with context filtering and verification",
            ));
            if self.qa.loading() {
                main.push_str(&render_loading_panel(self.qa.use_critic()));
            } else if let Some(answer) = answer {
                main.push_str(&render_answer(
                    answer,
                    self.original_context.as_deref(),
                    &self.answer_view,
                ));
            }
        }

        if answer.is_none() && !self.qa.loading() {
            main.push_str(&render_critic_advisory());
        }

        render_layout(&main)
    }
}

fn section_heading(step: u8, title: &str, subtitle: &str) -> String {
    format!("({}) {}\n    {}\n", step, title, subtitle)
}

/// Confirmation card for a finished upload.
pub fn render_upload_success(result: &UploadResult) -> String {
    let mut card = Card::titled("✅ Document Indexed Successfully").line(
        result
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(UPLOAD_FALLBACK_MESSAGE),
    );
    if let (Some(name), Some(chunks)) = (result.filename.as_deref(), result.chunks_indexed) {
        card.push(format!("{} chunks indexed from {}", chunks, name));
    }
    card.render()
}

/// Panel shown while a question is in flight.
pub fn render_loading_panel(use_critic: bool) -> String {
    let mut card = Card::titled("⏳ Working");
    if use_critic {
        card.push("Filtering context and processing...");
        card.push("Context Critic is analyzing retrieved chunks");
    } else {
        card.push("Processing your question...");
    }
    card.render()
}

fn render_critic_advisory() -> String {
    Card::titled("✨ New: Context Critic Agent")
        .line("• ✅ Automatically filters irrelevant chunks")
        .line("• 📊 Ranks content by relevance")
        .line("• 🔍 Shows which chunks were used and why")
        .line("• 🎯 Improves answer accuracy")
        .line("• 🔄 Toggle on/off to compare results")
        .render()
}
