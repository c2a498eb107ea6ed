//! Page shell: header banner above the page body.

pub const APP_TITLE: &str = "IKMS Multi-Agent RAG System";

/// Stages of the backend pipeline, in order.
pub const PIPELINE_STEPS: [&str; 4] = [
    "Retrieval",
    "Context Filtering ✨",
    "Summarization",
    "Verification",
];

pub fn render_header() -> String {
    let steps = PIPELINE_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| format!("({}) {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("  →  ");

    let rule = "═".repeat(64);
    format!(
        "{rule}\n  ✨ {APP_TITLE}\n  Upload PDFs, then ask questions and get verified answers with sources.\n  {steps}\n{rule}\n"
    )
}

/// Wrap a rendered page in the shell.
pub fn render_layout(main: &str) -> String {
    let mut out = render_header();
    out.push('\n');
    out.push_str(main);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lists_pipeline() {
        let header = render_header();
        assert!(header.contains(APP_TITLE));
        assert!(header.contains("(1) Retrieval  →  (2) Context Filtering ✨"));
        assert!(header.contains("(4) Verification"));
    }

    #[test]
    fn test_layout_wraps_body() {
        let out = render_layout("BODY\n");
        assert!(out.starts_with(&render_header()));
        assert!(out.ends_with("BODY\n"));
    }
}
