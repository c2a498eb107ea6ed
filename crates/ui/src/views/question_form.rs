//! Question input with the context critic toggle.

use super::card::Card;

pub const CRITIC_ON_CAPTION: &str = "Filtering and ranking chunks for better accuracy";
pub const CRITIC_OFF_CAPTION: &str = "Using all retrieved chunks without filtering";

/// Local state of the question form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionForm {
    text: String,
    show_info: bool,
}

impl QuestionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn show_info(&self) -> bool {
        self.show_info
    }

    /// Submitting is disabled for blank input and while a request is in flight.
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && !self.text.trim().is_empty()
    }

    /// Take the trimmed question and clear the field, if submitting is allowed.
    pub fn take_submission(&mut self, loading: bool) -> Option<String> {
        if !self.can_submit(loading) {
            return None;
        }
        let question = self.text.trim().to_string();
        self.text.clear();
        Some(question)
    }

    pub fn render(&self, loading: bool, use_critic: bool) -> String {
        let mut card = Card::titled("Ask a Question");
        if self.text.is_empty() {
            card.push("Ask your question here...");
        } else {
            card.push(&self.text);
        }

        card = card
            .blank()
            .line(format!(
                "✨ Context Critic Agent [{}]  (:info)",
                if use_critic { "on" } else { "off" }
            ))
            .line(format!("   {}", critic_caption(use_critic)));

        if self.show_info {
            card = card
                .blank()
                .line("How Context Critic Works:")
                .line("• Analyzes each retrieved chunk for relevance")
                .line("• Filters irrelevant or noisy chunks")
                .line("• Ranks remaining chunks by importance")
                .line("• Improves answer quality by reducing noise")
                .line("• Shows which chunks were kept and why");
        }

        let action = if loading {
            "[ Processing... ]"
        } else if self.can_submit(loading) {
            "[ Ask Question ]"
        } else {
            "[ Ask Question ] (disabled)"
        };
        card.blank().line(action).render()
    }
}

/// Static description of what the critic flag does.
pub fn critic_caption(use_critic: bool) -> &'static str {
    if use_critic {
        CRITIC_ON_CAPTION
    } else {
        CRITIC_OFF_CAPTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_trims_and_clears() {
        let mut form = QuestionForm::new();
        form.set_text("  What is HNSW?  \n");
        assert_eq!(form.take_submission(false).as_deref(), Some("What is HNSW?"));
        assert_eq!(form.text(), "");
    }

    #[test]
    fn test_submit_disabled_when_blank_or_loading() {
        let mut form = QuestionForm::new();
        form.set_text("   ");
        assert!(!form.can_submit(false));
        assert!(form.take_submission(false).is_none());

        form.set_text("question");
        assert!(!form.can_submit(true));
        assert!(form.take_submission(true).is_none());
        assert_eq!(form.text(), "question");
    }

    #[test]
    fn test_caption_and_info_panel() {
        let mut form = QuestionForm::new();
        let out = form.render(false, true);
        assert!(out.contains(CRITIC_ON_CAPTION));
        assert!(!out.contains("How Context Critic Works"));
        assert!(out.contains("(disabled)"));

        form.toggle_info();
        let out = form.render(false, false);
        assert!(out.contains(CRITIC_OFF_CAPTION));
        assert!(out.contains("How Context Critic Works"));
    }

    #[test]
    fn test_processing_label() {
        let mut form = QuestionForm::new();
        form.set_text("q");
        assert!(form.render(true, true).contains("[ Processing... ]"));
        assert!(form.render(false, true).contains("[ Ask Question ]"));
    }
}
