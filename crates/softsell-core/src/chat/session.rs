//! One chat widget session
//!
//! Owns the transcript and the injected backend. Each call to
//! [`ChatSession::send_message`] appends exactly one user message and, once the
//! backend completes, exactly one assistant message.

use std::sync::Arc;

use tracing::{info, warn};

use crate::chat::backend::ChatBackend;
use crate::chat::{ChatMessage, Transcript, APOLOGY_REPLY};

pub struct ChatSession {
    transcript: Transcript,
    backend: Arc<dyn ChatBackend>,
}

impl ChatSession {
    /// Start a fresh session with the initial transcript
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self::with_transcript(backend, Transcript::initial())
    }

    /// Continue a session from an existing transcript
    pub fn with_transcript(backend: Arc<dyn ChatBackend>, transcript: Transcript) -> Self {
        Self {
            transcript,
            backend,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub fn is_demo(&self) -> bool {
        self.backend.is_demo()
    }

    /// Send one user message and wait for the reply.
    ///
    /// Blank input is ignored and returns `None`. Backend failures are logged
    /// and answered with the fixed apology, never returned as errors.
    pub async fn send_message(&mut self, content: &str) -> Option<&ChatMessage> {
        if content.trim().is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(content));

        let reply = match self.backend.send(self.transcript.messages()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Error calling AI service: {}", e);
                APOLOGY_REPLY.to_string()
            }
        };

        self.transcript.push(ChatMessage::assistant(reply));
        info!(messages = self.transcript.len(), "chat turn complete");

        self.transcript.last()
    }
}
