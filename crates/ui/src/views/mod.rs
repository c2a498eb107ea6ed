//! Text views. Each one is a pure function of data plus its own view state.

pub mod answer;
pub mod card;
pub mod comparison;
pub mod home;
pub mod layout;
pub mod question_form;
pub mod relevance;
pub mod upload;

pub use answer::{render_answer, AnswerViewState};
pub use comparison::{render_comparison, split_context, ComparisonViewState, ContextSegment};
pub use home::{render_upload_success, HomePage};
pub use layout::render_layout;
pub use question_form::QuestionForm;
pub use relevance::{render_relevance, RelevanceSummary, RelevanceViewState};
pub use upload::PdfUploadWidget;
