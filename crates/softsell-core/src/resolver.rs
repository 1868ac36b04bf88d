//! Scripted chat replies
//!
//! Used by the chat widget when no AI backend is configured. Matching is
//! greedy and order dependent, not a relevance ranking:
//!
//! 1. An exact match of the normalized query wins outright.
//! 2. Otherwise the first entry (in table order) whose fragment occurs
//!    anywhere in the query wins, even if a later fragment is longer.
//! 3. Otherwise the fixed fallback reply is returned.

use serde::Serialize;
use tracing::debug;

use crate::knowledge::{KnowledgeBase, FALLBACK_REPLY};

/// Lowercase and trim. Internal punctuation and spacing are left alone.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase().trim().to_string()
}

/// Which pass produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
    Fallback,
}

/// A resolved reply and how it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub reply: String,
    pub kind: MatchKind,
    /// Index of the matched entry in the knowledge table
    pub entry: Option<usize>,
}

/// Resolves free-text questions against a knowledge table
#[derive(Debug, Clone, Default)]
pub struct ResponseResolver {
    knowledge: KnowledgeBase,
}

impl ResponseResolver {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Reply text for `query`. Never fails.
    pub fn resolve(&self, query: &str) -> String {
        self.resolve_with_kind(query).reply
    }

    pub fn resolve_with_kind(&self, query: &str) -> Resolution {
        let normalized = normalize_query(query);
        let entries = self.knowledge.entries();

        if let Some(index) = entries.iter().position(|e| e.question == normalized) {
            debug!(entry = index, "chat query matched exactly");
            return Resolution {
                reply: entries[index].answer.clone(),
                kind: MatchKind::Exact,
                entry: Some(index),
            };
        }

        if let Some(index) = entries
            .iter()
            .position(|e| normalized.contains(e.question.as_str()))
        {
            debug!(entry = index, "chat query matched by fragment");
            return Resolution {
                reply: entries[index].answer.clone(),
                kind: MatchKind::Substring,
                entry: Some(index),
            };
        }

        debug!("chat query fell back to default reply");
        Resolution {
            reply: FALLBACK_REPLY.to_string(),
            kind: MatchKind::Fallback,
            entry: None,
        }
    }
}
