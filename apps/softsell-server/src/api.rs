//! API handlers for the SoftSell server
//!
//! Provides REST endpoints for:
//! - Contact form submission
//! - Support chat turns
//! - Form and chat metadata (license types, suggested questions)

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use softsell_core::{
    validate_submission, ChatMessage, ChatSession, ContactSubmission, LicenseType, Transcript,
    EXAMPLE_QUESTIONS,
};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Shown once a contact submission is accepted
pub const CONTACT_THANKS: &str =
    "Thank you! We've received your message and will get back to you soon.";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "softsell-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// License type list response
#[derive(Serialize)]
pub struct LicenseTypesResponse {
    pub success: bool,
    pub license_types: Vec<&'static str>,
    pub count: usize,
}

/// Handler: GET /api/license-types
pub async fn handle_license_types() -> Json<LicenseTypesResponse> {
    let license_types: Vec<&'static str> = LicenseType::ALL.iter().map(|t| t.label()).collect();
    let count = license_types.len();

    Json(LicenseTypesResponse {
        success: true,
        license_types,
        count,
    })
}

/// Contact submission response
#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Handler: POST /api/contact
///
/// Invalid submissions are rejected with every field error at once.
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<ContactResponse>, ServerError> {
    let errors = validate_submission(&submission);
    if !errors.is_valid() {
        debug!("Contact submission rejected: {} invalid fields", errors.len());
        return Err(ServerError::Validation(errors));
    }

    info!(
        "Contact submission accepted: license_type={}",
        submission.license_type
    );

    // No delivery backend yet; the request only simulates processing time
    if !state.submit_delay.is_zero() {
        tokio::time::sleep(state.submit_delay).await;
    }

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_THANKS,
    }))
}

/// Suggested questions response
#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub questions: Vec<&'static str>,
    /// True when replies are scripted rather than from a live model
    pub demo: bool,
}

/// Handler: GET /api/chat/suggestions
pub async fn handle_chat_suggestions(State(state): State<AppState>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        success: true,
        questions: EXAMPLE_QUESTIONS.to_vec(),
        demo: state.backend.is_demo(),
    })
}

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatApiRequest {
    /// Transcript so far. Omitted on the first turn, which starts from the
    /// system prompt and greeting.
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,

    /// The new user message
    pub message: String,
}

/// Chat response
#[derive(Serialize)]
pub struct ChatApiResponse {
    pub success: bool,
    /// Assistant reply for this turn
    pub reply: String,
    /// Full transcript including this turn
    pub messages: Transcript,
    pub demo: bool,
}

/// Check the request and rebuild the transcript it continues
pub fn prepare_chat_turn(req: ChatApiRequest) -> Result<(Transcript, String), ServerError> {
    if req.message.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "Message must not be empty".to_string(),
        ));
    }

    let transcript = match req.messages {
        Some(messages) => Transcript::from(messages),
        None => Transcript::initial(),
    };

    Ok((transcript, req.message))
}

/// Handler: POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatApiRequest>,
) -> Result<Json<ChatApiResponse>, ServerError> {
    let (transcript, message) = prepare_chat_turn(req)?;
    info!("Chat turn: {} prior messages", transcript.len());

    let mut session = ChatSession::with_transcript(state.backend.clone(), transcript);
    let reply = session
        .send_message(&message)
        .await
        .map(|m| m.content.clone())
        .ok_or_else(|| ServerError::Internal("Chat turn produced no reply".to_string()))?;

    let demo = session.is_demo();
    Ok(Json(ChatApiResponse {
        success: true,
        reply,
        messages: session.into_transcript(),
        demo,
    }))
}
