//! Command handlers for the IKMS CLI.
//!
//! Toasts and progress go to stderr so stdout only carries rendered output.

pub mod ask;
pub mod health;
pub mod index;
pub mod shell;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use health::HealthCommand;
pub use index::IndexCommand;
pub use shell::ShellCommand;

use ikms_api::RagApi;
use ikms_core::config::AppConfig;
use ikms_ui::{IndexingController, ProgressEvent, ProgressReporter, SyntheticProgress, Toast, Toaster};
use std::sync::Arc;

/// Toaster that prints each toast on its own stderr line.
pub fn stderr_toaster() -> Toaster {
    Toaster::new(Arc::new(|toast: Toast| eprintln!("{}", toast)))
}

/// Reporter that prints each upload progress change to stderr.
pub fn stderr_reporter() -> ProgressReporter {
    ProgressReporter::new(Arc::new(|event: ProgressEvent| {
        eprintln!("{}", event.format_simple())
    }))
}

/// Upload controller wired to the configured progress policy.
pub fn indexing_controller(
    config: &AppConfig,
    api: Arc<dyn RagApi>,
    toaster: Toaster,
) -> IndexingController {
    IndexingController::new(api, toaster)
        .with_policy(SyntheticProgress::from(&config.progress))
        .with_reporter(stderr_reporter())
}
