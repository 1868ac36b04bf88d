use thiserror::Error;

/// Failures of a chat backend call.
///
/// These never reach the transcript as errors: the session turns any of them
/// into the fixed apology reply.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Backend request failed: {0}")]
    Request(String),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend response had no reply content")]
    EmptyReply,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Problems with a custom knowledge table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("Knowledge entry {index} has an empty question")]
    EmptyQuestion { index: usize },

    #[error("Knowledge entry {index} question is not normalized: {question:?}")]
    NotNormalized { index: usize, question: String },

    #[error("Invalid knowledge table: {0}")]
    Parse(String),
}
