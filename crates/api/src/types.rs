//! Response types returned by the RAG backend.
//!
//! These are request-scoped view-model values. Fields the backend may omit are
//! optional; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response from the document indexing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Human-readable confirmation
    #[serde(default)]
    pub message: Option<String>,

    /// Name the backend stored the document under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Number of chunks written to the vector store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_indexed: Option<u64>,
}

/// Response from the question-answering endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Final, verified answer
    #[serde(default)]
    pub answer: String,

    /// Answer produced before the verification step
    #[serde(default)]
    pub draft_answer: Option<String>,

    /// Context after critic filtering, chunks separated by blank lines
    #[serde(default)]
    pub context: Option<String>,

    /// Context as retrieved, before filtering
    #[serde(default)]
    pub raw_context: Option<String>,

    #[serde(default)]
    pub sources: Option<Vec<Source>>,

    /// Per-chunk verdicts from the context critic, in backend order
    #[serde(default)]
    pub chunk_relevance_scores: Option<Vec<ChunkRelevanceScore>>,

    /// Narrative log of the critic's analysis
    #[serde(default)]
    pub context_rationale: Option<String>,
}

impl AnswerResult {
    /// Critic scores, if the backend returned a non-empty list.
    pub fn critic_scores(&self) -> Option<&[ChunkRelevanceScore]> {
        self.chunk_relevance_scores
            .as_deref()
            .filter(|scores| !scores.is_empty())
    }

    /// The draft answer, only when it is non-empty and differs from the final one.
    pub fn distinct_draft(&self) -> Option<&str> {
        self.draft_answer
            .as_deref()
            .filter(|draft| !draft.is_empty() && *draft != self.answer)
    }

    /// Text to keep as the "before" side of a context comparison.
    ///
    /// Only available when the result carries a filtered context; prefers the
    /// raw context and falls back to the filtered one.
    pub fn comparison_baseline(&self) -> Option<&str> {
        let context = self.context.as_deref().filter(|c| !c.is_empty())?;
        Some(
            self.raw_context
                .as_deref()
                .filter(|raw| !raw.is_empty())
                .unwrap_or(context),
        )
    }

    /// Non-empty source list.
    pub fn source_list(&self) -> Option<&[Source]> {
        self.sources.as_deref().filter(|s| !s.is_empty())
    }
}

/// A source passage cited by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Document {
        content: String,
        #[serde(default)]
        metadata: Option<SourceMetadata>,
    },
    Text(String),
}

impl Source {
    pub fn content(&self) -> &str {
        match self {
            Source::Document { content, .. } => content,
            Source::Text(text) => text,
        }
    }

    pub fn metadata(&self) -> Option<&SourceMetadata> {
        match self {
            Source::Document { metadata, .. } => metadata.as_ref(),
            Source::Text(_) => None,
        }
    }
}

/// Where a source passage came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Originating document name
    #[serde(default)]
    pub source: Option<String>,

    /// Page number; backends send either a number or a string
    #[serde(default)]
    pub page: Option<serde_json::Value>,
}

impl SourceMetadata {
    /// Document name, if present and non-empty.
    pub fn document(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }

    /// Page label, if present. Zero and empty values are treated as absent.
    pub fn page_label(&self) -> Option<String> {
        match self.page.as_ref()? {
            serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// The critic's verdict on one retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRelevanceScore {
    pub chunk_id: u32,
    pub relevance: Relevance,
    #[serde(default)]
    pub keep: bool,
    #[serde(default)]
    pub rationale: String,
}

/// Relevance category assigned by the context critic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relevance {
    HighlyRelevant,
    Marginal,
    Irrelevant,
    /// Any label this client does not know
    #[serde(other)]
    Unknown,
}

impl Relevance {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Relevance::HighlyRelevant => "Highly Relevant",
            Relevance::Irrelevant => "Irrelevant",
            Relevance::Marginal | Relevance::Unknown => "Marginal",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Relevance::HighlyRelevant => "✅",
            Relevance::Irrelevant => "❌",
            Relevance::Marginal | Relevance::Unknown => "⚠️",
        }
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response from the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}
