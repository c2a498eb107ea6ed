//! Answer display: final answer, optional draft, critic diagnostics and sources.

use super::card::Card;
use super::comparison::{render_comparison, ComparisonViewState};
use super::relevance::{render_relevance, RelevanceViewState};
use ikms_api::{AnswerResult, Source};

/// View state owned by the answer display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerViewState {
    pub relevance: RelevanceViewState,
    pub comparison: ComparisonViewState,
}

impl AnswerViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Render everything shown for one answer.
///
/// `original_context` is the before-critic baseline remembered by the page;
/// the comparison only appears when it and the answer's context are both present.
pub fn render_answer(
    answer: &AnswerResult,
    original_context: Option<&str>,
    state: &AnswerViewState,
) -> String {
    let mut out = String::new();

    out.push_str(
        &Card::titled("✅ Final Answer  [✓ Verified]")
            .line(&answer.answer)
            .render(),
    );

    if let Some(draft) = answer.distinct_draft() {
        out.push_str(
            &Card::titled("📝 Draft Answer (Before Verification)")
                .line(draft)
                .render(),
        );
    }

    match answer.critic_scores() {
        Some(scores) => {
            if let Some(panel) = render_relevance(
                scores,
                answer.context_rationale.as_deref(),
                &state.relevance,
            ) {
                out.push_str(&panel);
            }

            let before = original_context.filter(|c| !c.is_empty());
            let after = answer.context.as_deref().filter(|c| !c.is_empty());
            if before.is_some() && after.is_some() {
                if let Some(panel) = render_comparison(before, after, &state.comparison) {
                    out.push_str(&panel);
                }
            }
        }
        None => out.push_str(&render_critic_disabled()),
    }

    if let Some(sources) = answer.source_list() {
        out.push_str(&render_sources(sources));
    }

    out
}

fn render_critic_disabled() -> String {
    Card::titled("ℹ️ Context Critic Disabled")
        .line("All retrieved chunks were used without filtering. Enable Context Critic for better results.")
        .render()
}

fn render_sources(sources: &[Source]) -> String {
    let mut card = Card::titled("📚 Sources");
    for (idx, source) in sources.iter().enumerate() {
        if idx > 0 {
            card = card.blank();
        }
        card.push(format!("📄 {}", source.content()));

        let Some(meta) = source.metadata() else {
            continue;
        };
        let mut origin = Vec::new();
        if let Some(doc) = meta.document() {
            origin.push(format!("📄 {}", doc));
        }
        if let Some(page) = meta.page_label() {
            origin.push(format!("📖 Page {}", page));
        }
        if !origin.is_empty() {
            card.push(format!("   {}", origin.join("   ")));
        }
    }
    card.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikms_api::{ChunkRelevanceScore, Relevance, SourceMetadata};

    fn scored_answer() -> AnswerResult {
        AnswerResult {
            answer: "HNSW is a graph index.".to_string(),
            context: Some("[Chunk 0]\nA\n\n[Chunk 2]\nC".to_string()),
            raw_context: Some("[Chunk 0]\nA\n\n[Chunk 1]\nB\n\n[Chunk 2]\nC".to_string()),
            chunk_relevance_scores: Some(vec![
                ChunkRelevanceScore {
                    chunk_id: 0,
                    relevance: Relevance::HighlyRelevant,
                    keep: true,
                    rationale: "on topic".to_string(),
                },
                ChunkRelevanceScore {
                    chunk_id: 1,
                    relevance: Relevance::Irrelevant,
                    keep: false,
                    rationale: "off topic".to_string(),
                },
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_hidden_when_equal() {
        let answer = AnswerResult {
            answer: "same".to_string(),
            draft_answer: Some("same".to_string()),
            ..Default::default()
        };
        let out = render_answer(&answer, None, &AnswerViewState::default());
        assert!(out.contains("Final Answer"));
        assert!(!out.contains("Draft Answer"));
    }

    #[test]
    fn test_draft_shown_when_different() {
        let answer = AnswerResult {
            answer: "final".to_string(),
            draft_answer: Some("draft".to_string()),
            ..Default::default()
        };
        let out = render_answer(&answer, None, &AnswerViewState::default());
        assert!(out.contains("Draft Answer (Before Verification)"));
        assert!(out.contains("│ draft"));
    }

    #[test]
    fn test_no_scores_shows_advisory() {
        let answer = AnswerResult {
            answer: "x".to_string(),
            context: Some("A\n\nB".to_string()),
            ..Default::default()
        };
        let out = render_answer(&answer, Some("A\n\nB"), &AnswerViewState::default());
        assert!(out.contains("Context Critic Disabled"));
        assert!(!out.contains("Context Critic Analysis"));
        assert!(!out.contains("Context Filtering Analysis"));
    }

    #[test]
    fn test_scores_with_baseline_show_comparison() {
        let answer = scored_answer();
        let baseline = answer.comparison_baseline().map(str::to_string);
        let out = render_answer(&answer, baseline.as_deref(), &AnswerViewState::default());

        assert!(out.contains("Context Critic Analysis"));
        assert!(out.contains("Context Filtering Analysis"));
        assert!(out.contains("Retrieved: 3   Kept: 2   Filtered: 1"));
        assert!(!out.contains("Context Critic Disabled"));
    }

    #[test]
    fn test_scores_without_baseline_skip_comparison() {
        let out = render_answer(&scored_answer(), None, &AnswerViewState::default());
        assert!(out.contains("Context Critic Analysis"));
        assert!(!out.contains("Context Filtering Analysis"));
    }

    #[test]
    fn test_sources_rendered_with_origin() {
        let answer = AnswerResult {
            answer: "x".to_string(),
            sources: Some(vec![
                Source::Document {
                    content: "HNSW builds layers".to_string(),
                    metadata: Some(SourceMetadata {
                        source: Some("paper.pdf".to_string()),
                        page: Some(serde_json::json!(3)),
                    }),
                },
                Source::Text("bare passage".to_string()),
            ]),
            ..Default::default()
        };
        let out = render_answer(&answer, None, &AnswerViewState::default());
        assert!(out.contains("📚 Sources"));
        assert!(out.contains("📄 HNSW builds layers"));
        assert!(out.contains("📄 paper.pdf   📖 Page 3"));
        assert!(out.contains("📄 bare passage"));
    }
}
