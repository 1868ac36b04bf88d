//! Tests for the SoftSell server API
//!
//! Test categories:
//! - Router tests through axum-test (health, contact, chat)
//! - Property tests for chat request preparation

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use softsell_core::{ChatMessage, Role};

    use crate::api::{prepare_chat_turn, ChatApiRequest};

    fn role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::User), Just(Role::Assistant), Just(Role::System)]
    }

    fn message() -> impl Strategy<Value = ChatMessage> {
        (role(), ".{0,40}").prop_map(|(role, content)| ChatMessage::new(role, content))
    }

    proptest! {
        /// Property: prior messages are passed through untouched and in order
        #[test]
        fn prior_messages_are_preserved(
            messages in prop::collection::vec(message(), 0..8),
            text in "[a-z]{1,20}",
        ) {
            let req = ChatApiRequest { messages: Some(messages.clone()), message: text.clone() };
            let (transcript, message) = prepare_chat_turn(req).unwrap();
            prop_assert_eq!(transcript.messages(), messages.as_slice());
            prop_assert_eq!(message, text);
        }

        /// Property: whitespace-only messages are always rejected
        #[test]
        fn blank_messages_rejected(text in "[ \t\n]{0,10}") {
            let req = ChatApiRequest { messages: None, message: text };
            prop_assert!(prepare_chat_turn(req).is_err());
        }
    }

    #[test]
    fn first_turn_starts_from_initial_transcript() {
        let req = ChatApiRequest {
            messages: None,
            message: "hello".to_string(),
        };
        let (transcript, _) = prepare_chat_turn(req).unwrap();
        assert_eq!(transcript, softsell_core::Transcript::initial());
    }
}

#[cfg(test)]
mod api_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use softsell_core::chat::{APOLOGY_REPLY, GREETING};
    use softsell_core::{ChatBackend, ChatError, ChatMessage, MockBackend, FALLBACK_REPLY};

    use crate::{app_router, AppState};

    struct DownBackend;

    #[async_trait]
    impl ChatBackend for DownBackend {
        async fn send(&self, _transcript: &[ChatMessage]) -> Result<String, ChatError> {
            Err(ChatError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn create_server_with(backend: Arc<dyn ChatBackend>) -> TestServer {
        let state = AppState {
            backend,
            submit_delay: Duration::ZERO,
        };
        TestServer::new(app_router(state)).unwrap()
    }

    /// Create a test server with scripted chat and no artificial delays
    fn create_test_server() -> TestServer {
        create_server_with(Arc::new(MockBackend::default().with_delay(Duration::ZERO)))
    }

    fn valid_contact() -> serde_json::Value {
        json!({
            "name": "Jane O'Neil",
            "email": "jane@example.com",
            "company": "Acme",
            "licenseType": "Adobe Creative Cloud",
            "message": "We have 15 Creative Cloud seats we no longer need."
        })
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "softsell-server");
    }

    #[tokio::test]
    async fn test_license_types() {
        let server = create_test_server();
        let response = server.get("/api/license-types").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["count"], 5);
        assert_eq!(json["license_types"][3], "Microsoft 365");
    }

    #[tokio::test]
    async fn test_contact_accepts_valid_submission() {
        let server = create_test_server();
        let response = server.post("/api/contact").json(&valid_contact()).await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], crate::api::CONTACT_THANKS);
    }

    #[tokio::test]
    async fn test_contact_reports_all_field_errors() {
        let server = create_test_server();
        let response = server.post("/api/contact").json(&json!({})).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "VALIDATION_FAILED");
        let errors = json["errors"].as_object().unwrap();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors["company"], "Company name is required");
        assert_eq!(errors["licenseType"], "Please select a license type");
    }

    #[tokio::test]
    async fn test_contact_reports_only_bad_fields() {
        let server = create_test_server();
        let mut body = valid_contact();
        body["name"] = json!("John123");
        let response = server.post("/api/contact").json(&body).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let json = response.json::<serde_json::Value>();
        let errors = json["errors"].as_object().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors["name"],
            "Name can only contain letters, spaces, hyphens, and apostrophes"
        );
    }

    #[tokio::test]
    async fn test_chat_suggestions() {
        let server = create_test_server();
        let response = server.get("/api/chat/suggestions").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["demo"], true);
        assert_eq!(json["questions"][0], "How do I sell my license?");
    }

    #[tokio::test]
    async fn test_chat_first_turn() {
        let server = create_test_server();
        let response = server
            .post("/api/chat")
            .json(&json!({ "message": "Hello" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(
            json["reply"],
            "Hello! How can I assist you with SoftSell today?"
        );
        assert_eq!(json["demo"], true);
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1]["content"], GREETING);
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(messages[3]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_chat_continues_transcript() {
        let server = create_test_server();
        let response = server
            .post("/api/chat")
            .json(&json!({
                "messages": [
                    { "role": "assistant", "content": "Hi!" },
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "Hi there!" }
                ],
                "message": "xyz nonsense"
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["reply"], FALLBACK_REPLY);
        assert_eq!(json["messages"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let server = create_test_server();
        let response = server
            .post("/api/chat")
            .json(&json!({ "message": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_chat_backend_failure_returns_apology() {
        let server = create_server_with(Arc::new(DownBackend));
        let response = server
            .post("/api/chat")
            .json(&json!({ "message": "Can I get a refund?" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["reply"], APOLOGY_REPLY);
        assert_eq!(json["demo"], false);
    }

    #[test]
    fn test_mock_backend_delay_is_configurable() {
        let backend = MockBackend::default().with_delay(Duration::from_millis(250));
        assert_eq!(backend.delay(), Duration::from_millis(250));
        // Scripted replies complete without touching the network
        let reply = tokio_test::block_on(
            backend
                .with_delay(Duration::ZERO)
                .send(&[ChatMessage::user("help")]),
        )
        .unwrap();
        assert!(reply.starts_with("I can help with questions about selling licenses"));
    }
}
