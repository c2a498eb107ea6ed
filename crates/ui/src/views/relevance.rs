//! Context critic diagnostics: summary counts, category breakdown and a
//! per-chunk list with one expandable row.

use super::card::{bar, Card};
use ikms_api::{ChunkRelevanceScore, Relevance};

const BAR_WIDTH: usize = 20;

/// Aggregate counts over a list of critic scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelevanceSummary {
    pub retrieved: usize,
    pub kept: usize,
    pub filtered: usize,
    pub highly_relevant: usize,
    pub marginal: usize,
    pub irrelevant: usize,
}

impl RelevanceSummary {
    pub fn from_scores(scores: &[ChunkRelevanceScore]) -> Self {
        let count = |r: Relevance| scores.iter().filter(|s| s.relevance == r).count();
        let kept = scores.iter().filter(|s| s.keep).count();

        Self {
            retrieved: scores.len(),
            kept,
            filtered: scores.len() - kept,
            highly_relevant: count(Relevance::HighlyRelevant),
            marginal: count(Relevance::Marginal),
            irrelevant: count(Relevance::Irrelevant),
        }
    }

    /// Share of retrieved chunks that were kept, as a rounded percentage.
    pub fn kept_rate(&self) -> u32 {
        if self.kept == 0 || self.retrieved == 0 {
            return 0;
        }
        ((self.kept as f64 / self.retrieved as f64) * 100.0).round() as u32
    }
}

/// Expand/collapse state of the relevance panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevanceViewState {
    selected_chunk: Option<u32>,
    show_full_log: bool,
}

impl RelevanceViewState {
    /// Expand `chunk_id`, or collapse it if it is already the expanded one.
    pub fn toggle_chunk(&mut self, chunk_id: u32) {
        self.selected_chunk = if self.selected_chunk == Some(chunk_id) {
            None
        } else {
            Some(chunk_id)
        };
    }

    pub fn selected_chunk(&self) -> Option<u32> {
        self.selected_chunk
    }

    pub fn toggle_full_log(&mut self) {
        self.show_full_log = !self.show_full_log;
    }

    pub fn show_full_log(&self) -> bool {
        self.show_full_log
    }

    /// Forget any expansion, e.g. when a new answer arrives.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Render the panel; `None` when there are no scores.
pub fn render_relevance(
    scores: &[ChunkRelevanceScore],
    rationale: Option<&str>,
    state: &RelevanceViewState,
) -> Option<String> {
    if scores.is_empty() {
        return None;
    }

    let summary = RelevanceSummary::from_scores(scores);
    let mut card = Card::titled("🎯 Context Critic Analysis").line(format!(
        "Retrieved: {}   Kept: {}   Filtered: {}   Kept Rate: {}%",
        summary.retrieved,
        summary.kept,
        summary.filtered,
        summary.kept_rate()
    ));

    card = card.blank().line("Relevance Breakdown");
    for (relevance, count) in [
        (Relevance::HighlyRelevant, summary.highly_relevant),
        (Relevance::Marginal, summary.marginal),
        (Relevance::Irrelevant, summary.irrelevant),
    ] {
        card.push(format!(
            "{} {:<16} {} {}",
            relevance.emoji(),
            relevance.label(),
            bar(count, summary.retrieved, BAR_WIDTH),
            count
        ));
    }

    card = card.blank().line("Chunk-by-Chunk Analysis");
    for chunk in scores {
        render_chunk_row(&mut card, chunk, state.selected_chunk == Some(chunk.chunk_id));
    }

    if let Some(log) = rationale.filter(|r| !r.is_empty()) {
        card = card.blank();
        if state.show_full_log {
            card = card.line("▾ Hide Full Analysis Log").line(log);
        } else {
            card = card.line("▸ Show Full Analysis Log");
        }
    }

    Some(card.render())
}

fn render_chunk_row(card: &mut Card, chunk: &ChunkRelevanceScore, expanded: bool) {
    let marker = if expanded { "▾" } else { "▸" };
    let filtered = if chunk.keep { "" } else { " [FILTERED]" };
    card.push(format!(
        "{} {} Chunk {} [{}]{}",
        marker,
        chunk.relevance.emoji(),
        chunk.chunk_id,
        chunk.relevance.label(),
        filtered
    ));

    if !expanded {
        if let Some(first) = chunk.rationale.lines().next() {
            card.push(format!("    {}", first));
        }
        return;
    }

    card.push("    Detailed Rationale:");
    for line in chunk.rationale.lines() {
        card.push(format!("    {}", line));
    }
    let decision = if chunk.keep { "✓ Kept" } else { "✗ Filtered" };
    card.push(format!(
        "    Relevance: {} {}   Decision: {}",
        chunk.relevance.emoji(),
        chunk.relevance.label(),
        decision
    ));
}
