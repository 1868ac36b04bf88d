//! Support chat knowledge table
//!
//! Question fragments are stored lowercase and trimmed, the same shape the
//! resolver normalizes queries into. Table order is significant: the resolver
//! uses declaration order to break ties between overlapping fragments.

use serde::{Deserialize, Serialize};

use crate::error::KnowledgeError;
use crate::resolver::normalize_query;

/// Reply used when no entry matches the user's question
pub const FALLBACK_REPLY: &str = "I don't have specific information on that yet. \
Please contact our support team for more detailed assistance.";

/// Suggested questions offered as one-click buttons in the chat widget
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "How do I sell my license?",
    "What payment methods do you accept?",
    "How long does delivery take?",
    "Can I get a refund?",
    "How do I contact support?",
];

/// Built-in (fragment, answer) pairs, in matching priority order
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    (
        "how do i sell my license",
        "To sell your license, go to your dashboard, click on \"List New License\", \
         fill out the details, set your price, and publish the listing.",
    ),
    (
        "what payment methods do you accept",
        "We accept credit cards, PayPal, and bank transfers for most transactions.",
    ),
    (
        "how long does delivery take",
        "License keys are usually delivered instantly after payment confirmation. \
         Physical items may take 3-5 business days.",
    ),
    (
        "can i get a refund",
        "Yes, we offer a 30-day money-back guarantee for most products. \
         Please contact our support team for assistance.",
    ),
    (
        "how do i contact support",
        "You can reach our support team via email at support@softsell.com \
         or through the contact form on our website.",
    ),
    (
        "help",
        "I can help with questions about selling licenses, payment methods, delivery, \
         refunds, and contacting support. What would you like to know?",
    ),
    ("hello", "Hello! How can I assist you with SoftSell today?"),
    ("hi", "Hi there! How can I help you with SoftSell today?"),
];

/// A question fragment and the answer given when it matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered, immutable knowledge table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// The SoftSell table shipped with the site
    pub fn softsell() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(question, answer)| KnowledgeEntry::new(*question, *answer))
                .collect(),
        }
    }

    /// Build a table from custom entries, keeping their order.
    ///
    /// Every question must be non-empty and already normalized, otherwise it
    /// could never match a normalized query.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Result<Self, KnowledgeError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.question.is_empty() {
                return Err(KnowledgeError::EmptyQuestion { index });
            }
            if normalize_query(&entry.question) != entry.question {
                return Err(KnowledgeError::NotNormalized {
                    index,
                    question: entry.question.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of `{"question": ..., "answer": ...}` objects
    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let entries: Vec<KnowledgeEntry> =
            serde_json::from_str(json).map_err(|e| KnowledgeError::Parse(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::softsell()
    }
}
