//! WASM bindings for the SoftSell landing page
//!
//! Form and chat state are held in Rust; JavaScript only handles DOM events,
//! timers and network calls.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ContactFormSession, ChatWidgetSession, submitDelayMs } from './pkg/softsell_wasm.js';
//!
//! await init();
//!
//! const form = new ContactFormSession();
//! input.addEventListener('input', e => form.setValue(e.target.name, e.target.value));
//! input.addEventListener('blur', e => form.blur(e.target.name));
//! formEl.addEventListener('submit', e => {
//!   e.preventDefault();
//!   if (form.submit()) setTimeout(() => { form.completeSubmit(); render(); }, submitDelayMs());
//!   render();
//! });
//!
//! const chat = new ChatWidgetSession(!window.SOFTSELL_AI_ENABLED);
//! ```

pub mod chat_widget;
pub mod contact_form;

use serde::Serialize;
use softsell_core::{ContactSubmission, FormField, LicenseType, ResponseResolver};
use wasm_bindgen::prelude::*;

pub use chat_widget::ChatWidgetSession;
pub use contact_form::ContactFormSession;

/// Simulated contact form request time
pub const SUBMIT_DELAY_MS: u32 = 1000;
/// Simulated "thinking" time before a scripted chat reply
pub const THINKING_DELAY_MS: u32 = 1000;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[wasm_bindgen(js_name = submitDelayMs)]
pub fn submit_delay_ms() -> u32 {
    SUBMIT_DELAY_MS
}

#[wasm_bindgen(js_name = thinkingDelayMs)]
pub fn thinking_delay_ms() -> u32 {
    THINKING_DELAY_MS
}

/// Validate a whole submission object without a session.
/// Returns an object of field name to error message; empty when valid.
#[wasm_bindgen(js_name = validateContactForm)]
pub fn validate_contact_form(submission: JsValue) -> Result<JsValue, JsValue> {
    let submission: ContactSubmission = serde_wasm_bindgen::from_value(submission)
        .map_err(|e| JsValue::from_str(&format!("Invalid submission: {}", e)))?;
    let errors = softsell_core::validate_submission(&submission);

    to_js(&errors)
}

/// Validate one field by its form key
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(key: &str, value: &str) -> Result<Option<String>, JsValue> {
    let field = FormField::from_key(key)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown form field: {}", key)))?;
    Ok(softsell_core::validate_field(field, value))
}

/// Scripted reply for a chat question
#[wasm_bindgen(js_name = resolveReply)]
pub fn resolve_reply(query: &str) -> String {
    ResponseResolver::default().resolve(query)
}

/// Options for the license type select box
#[wasm_bindgen(js_name = licenseTypes)]
pub fn license_types() -> Vec<String> {
    license_type_labels()
}

/// Suggested questions shown under the chat transcript
#[wasm_bindgen(js_name = exampleQuestions)]
pub fn example_questions() -> Vec<String> {
    softsell_core::EXAMPLE_QUESTIONS
        .iter()
        .map(|q| q.to_string())
        .collect()
}

/// Serialize with maps as plain JS objects
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn license_type_labels() -> Vec<String> {
    LicenseType::ALL
        .iter()
        .map(|t| t.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn test_license_type_labels() {
        assert_eq!(
            license_type_labels(),
            vec![
                "Microsoft Office",
                "Adobe Creative Cloud",
                "Windows Server",
                "Microsoft 365",
                "Other",
            ]
        );
    }

    #[test]
    fn test_example_questions() {
        let questions = example_questions();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0], "How do I sell my license?");
    }

    #[test]
    fn test_resolve_reply() {
        assert_eq!(
            resolve_reply("HELLO"),
            "Hello! How can I assist you with SoftSell today?"
        );
    }
}
