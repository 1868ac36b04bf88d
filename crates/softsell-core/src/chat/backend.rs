//! Chat backend capability
//!
//! A backend receives the whole transcript (system prompt included) and
//! returns one reply. The scripted `MockBackend` satisfies the same
//! interface, so a session never needs to know which one it has.

use std::time::Duration;

use async_trait::async_trait;

use crate::chat::ChatMessage;
use crate::error::ChatError;
use crate::resolver::ResponseResolver;

/// Delay before a scripted reply appears
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1000);

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, transcript: &[ChatMessage]) -> Result<String, ChatError>;

    /// True for scripted backends; the widget shows a demo badge
    fn is_demo(&self) -> bool {
        false
    }
}

/// Scripted replies from the knowledge table, after a simulated delay
#[derive(Debug, Clone)]
pub struct MockBackend {
    resolver: ResponseResolver,
    delay: Duration,
}

impl MockBackend {
    pub fn new(resolver: ResponseResolver) -> Self {
        Self {
            resolver,
            delay: DEFAULT_THINKING_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(ResponseResolver::default())
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn send(&self, transcript: &[ChatMessage]) -> Result<String, ChatError> {
        let query = transcript
            .iter()
            .rev()
            .find(|m| m.role == crate::chat::Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(self.resolver.resolve(query))
    }

    fn is_demo(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::FALLBACK_REPLY;

    #[tokio::test(start_paused = true)]
    async fn test_mock_answers_last_user_message() {
        let backend = MockBackend::default();
        let transcript = vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("Hello!"),
            ChatMessage::user("xyz nonsense"),
        ];
        let reply = backend.send(&transcript).await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_for_thinking_delay() {
        let backend = MockBackend::default().with_delay(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        backend.send(&[ChatMessage::user("hi")]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_mock_without_user_message_falls_back() {
        let backend = MockBackend::default().with_delay(Duration::ZERO);
        let reply = backend.send(&[]).await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
        assert!(backend.is_demo());
    }
}
