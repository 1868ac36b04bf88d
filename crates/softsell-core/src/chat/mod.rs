//! Chat transcript types
//!
//! A transcript only ever grows: messages are appended, never edited or
//! removed, for the lifetime of one widget session.

#[cfg(feature = "session")]
pub mod backend;
#[cfg(feature = "session")]
pub mod session;

use serde::{Deserialize, Serialize};

/// Instructions sent to a live AI backend as the first message
pub const SYSTEM_PROMPT: &str = "You are a helpful customer support assistant for a software \
license marketplace called SoftSell. Keep your answers brief, friendly, and helpful.";

/// First assistant message shown when the widget opens
pub const GREETING: &str = "Hi there! I'm your SoftSell assistant. How can I help you today?";

/// Reply appended when the live backend fails
pub const APOLOGY_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please try again later.";

/// Placeholder credential that means "no credential configured"
pub const MOCK_API_KEY: &str = "mock-api-key";

/// True when `api_key` does not name a real credential, so the widget should
/// run in demo mode with scripted replies.
pub fn is_demo_credential(api_key: Option<&str>) -> bool {
    match api_key {
        None => true,
        Some(key) => key.is_empty() || key == MOCK_API_KEY,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Append-only list of chat messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transcript every widget session starts with: the system prompt
    /// followed by the assistant greeting.
    pub fn initial() -> Self {
        Self {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::assistant(GREETING)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages shown to the user (everything but system messages)
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::User)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<ChatMessage>> for Transcript {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_transcript() {
        let transcript = Transcript::initial();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.messages()[1], ChatMessage::assistant(GREETING));
    }

    #[test]
    fn test_visible_skips_system() {
        let transcript = Transcript::initial();
        let visible: Vec<_> = transcript.visible().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].role, Role::Assistant);
    }

    #[test]
    fn test_last_user_message() {
        let mut transcript = Transcript::initial();
        assert!(transcript.last_user_message().is_none());
        transcript.push(ChatMessage::user("first"));
        transcript.push(ChatMessage::assistant("reply"));
        transcript.push(ChatMessage::user("second"));
        assert_eq!(transcript.last_user_message().unwrap().content, "second");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::user("hey")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hey"}"#);
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"yo"}"#).unwrap();
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn test_transcript_serializes_as_array() {
        let json = serde_json::to_value(Transcript::initial()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["role"], "system");
    }

    #[test]
    fn test_demo_credential() {
        assert!(is_demo_credential(None));
        assert!(is_demo_credential(Some("")));
        assert!(!is_demo_credential(Some("  ")));
        assert!(is_demo_credential(Some("mock-api-key")));
        assert!(!is_demo_credential(Some("sk-live-123")));
    }
}
