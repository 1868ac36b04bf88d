//! SoftSell site logic
//!
//! This crate holds the logic behind the SoftSell landing page:
//! - Contact form validation (`contact`)
//! - The support chat knowledge table (`knowledge`)
//! - Scripted reply resolution used when no AI backend is configured (`resolver`)
//! - Chat transcript types, the backend capability and the chat session (`chat`)
//!
//! The validator and resolver are pure functions. Everything stateful lives in
//! explicit session objects owned by the caller.

pub mod chat;
pub mod contact;
pub mod error;
pub mod knowledge;
pub mod resolver;

pub use chat::{ChatMessage, Role, Transcript};
pub use contact::{
    validate_field, validate_name, validate_submission, ContactSubmission, FormField,
    LicenseType, ValidationErrors,
};
pub use error::{ChatError, KnowledgeError};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, EXAMPLE_QUESTIONS, FALLBACK_REPLY};
pub use resolver::{normalize_query, MatchKind, Resolution, ResponseResolver};

#[cfg(feature = "session")]
pub use chat::backend::{ChatBackend, MockBackend};
#[cfg(feature = "session")]
pub use chat::session::ChatSession;
