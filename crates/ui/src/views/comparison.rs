//! Before/after view of the context around the critic step.

use super::card::{clamp_lines, Card};
use regex::Regex;
use std::sync::LazyLock;

/// Separator between chunks in a context string.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

const SEGMENT_PREVIEW_LINES: usize = 3;

static CHUNK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Chunk \d+\]").expect("chunk marker pattern is valid"));

/// One chunk of a context string, numbered by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSegment {
    pub index: usize,
    pub text: String,
}

impl ContextSegment {
    /// Text with the first `[Chunk N]` marker removed and whitespace trimmed.
    pub fn display_text(&self) -> String {
        CHUNK_MARKER.replace(&self.text, "").trim().to_string()
    }
}

/// Split a context on blank-line separators. An empty context has no segments.
pub fn split_context(context: &str) -> Vec<ContextSegment> {
    if context.is_empty() {
        return Vec::new();
    }
    context
        .split(SEGMENT_SEPARATOR)
        .enumerate()
        .map(|(index, text)| ContextSegment {
            index,
            text: text.to_string(),
        })
        .collect()
}

/// Segment counts on both sides of the critic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonStats {
    pub retrieved: usize,
    pub kept: usize,
    /// Can be negative when the baseline has fewer segments than the result
    pub filtered: i64,
}

impl ComparisonStats {
    pub fn new(before: &[ContextSegment], after: &[ContextSegment]) -> Self {
        Self {
            retrieved: before.len(),
            kept: after.len(),
            filtered: before.len() as i64 - after.len() as i64,
        }
    }
}

/// Which halves of the comparison are expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonViewState {
    show_before: bool,
    show_after: bool,
}

impl Default for ComparisonViewState {
    fn default() -> Self {
        Self {
            show_before: false,
            show_after: true,
        }
    }
}

impl ComparisonViewState {
    pub fn toggle_before(&mut self) {
        self.show_before = !self.show_before;
    }

    pub fn toggle_after(&mut self) {
        self.show_after = !self.show_after;
    }

    pub fn show_before(&self) -> bool {
        self.show_before
    }

    pub fn show_after(&self) -> bool {
        self.show_after
    }
}

/// Render the comparison; `None` when neither side has text.
pub fn render_comparison(
    before: Option<&str>,
    after: Option<&str>,
    state: &ComparisonViewState,
) -> Option<String> {
    let before = before.filter(|t| !t.is_empty());
    let after = after.filter(|t| !t.is_empty());
    if before.is_none() && after.is_none() {
        return None;
    }

    let before = split_context(before.unwrap_or_default());
    let after = split_context(after.unwrap_or_default());
    let stats = ComparisonStats::new(&before, &after);

    let mut card = Card::titled("Context Filtering Analysis").line(format!(
        "Retrieved: {}   Kept: {}   Filtered: {}",
        stats.retrieved, stats.kept, stats.filtered
    ));

    card = card.blank();
    push_side(&mut card, "Before Critic", &before, state.show_before, "");
    card = card.blank();
    push_side(&mut card, "After Critic", &after, state.show_after, " ✓");

    Some(card.render())
}

fn push_side(
    card: &mut Card,
    title: &str,
    segments: &[ContextSegment],
    expanded: bool,
    badge: &str,
) {
    let marker = if expanded { "▾" } else { "▸" };
    card.push(format!("{} {} ({} chunks)", marker, title, segments.len()));
    if !expanded {
        return;
    }

    for segment in segments {
        card.push(format!("  Chunk {}{}", segment.index, badge));
        let preview = clamp_lines(&segment.display_text(), SEGMENT_PREVIEW_LINES);
        for line in preview.lines() {
            card.push(format!("    {}", line));
        }
    }
}
