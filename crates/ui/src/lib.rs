//! Presentation layer for the IKMS client.
//!
//! Two controllers own the request flows (PDF indexing and question
//! answering). Views are plain functions that turn controller state into
//! terminal text; feedback goes out through a [`Toaster`].

pub mod file;
pub mod indexing;
pub mod progress;
pub mod qa;
pub mod toast;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;


// Re-export commonly used types
pub use file::SelectedFile;
pub use indexing::{IndexingController, UploadCall};
pub use progress::{ProgressCallback, ProgressEvent, ProgressReporter, SyntheticProgress};
pub use qa::{QaController, QuestionCall};
pub use toast::{Toast, ToastCallback, ToastKind, Toaster};
pub use views::HomePage;
