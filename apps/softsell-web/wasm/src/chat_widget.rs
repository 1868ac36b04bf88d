//! Support chat widget state
//!
//! The transcript lives here; JavaScript owns timing and networking. A send is
//! split in two so the page can show the typing indicator in between:
//!
//! ```javascript
//! const query = widget.sendMessage();        // appends the user message
//! if (query !== undefined) {
//!   if (widget.isDemo) {
//!     setTimeout(() => { widget.completeScripted(query); render(); }, thinkingDelayMs());
//!   } else {
//!     fetch("/api/chat", { method: "POST", body: widget.pendingRequest(), ... })
//!       .then(r => r.json())
//!       .then(body => widget.completeWithReply(body.reply))
//!       .catch(() => widget.completeWithError());
//!   }
//! }
//! ```

use serde::Serialize;
use softsell_core::chat::APOLOGY_REPLY;
use softsell_core::{ChatMessage, ResponseResolver, Transcript};
use wasm_bindgen::prelude::*;

/// Body for `POST /api/chat`
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    messages: &'a [ChatMessage],
    message: &'a str,
}

#[wasm_bindgen]
pub struct ChatWidgetSession {
    transcript: Transcript,
    resolver: ResponseResolver,
    demo: bool,
    open: bool,
    input: String,
    pending: usize,
}

impl ChatWidgetSession {
    fn with_resolver(demo: bool, resolver: ResponseResolver) -> Self {
        Self {
            transcript: Transcript::initial(),
            resolver,
            demo,
            open: false,
            input: String::new(),
            pending: 0,
        }
    }

    /// Append the user message and mark a reply as pending.
    /// Falls back to the input box contents when `content` is `None`.
    fn send_message_internal(&mut self, content: Option<String>) -> Option<String> {
        let content = content.unwrap_or_else(|| self.input.clone());
        if content.trim().is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage::user(content.clone()));
        self.input.clear();
        self.pending += 1;
        Some(content)
    }

    fn complete(&mut self, reply: String) {
        self.transcript.push(ChatMessage::assistant(reply));
        self.pending = self.pending.saturating_sub(1);
    }

    fn request_body_internal(&self) -> Result<String, String> {
        let messages = self.transcript.messages();
        let (last, prior) = messages
            .split_last()
            .ok_or_else(|| "Transcript is empty".to_string())?;
        let body = ChatRequestBody {
            messages: prior,
            message: &last.content,
        };
        serde_json::to_string(&body).map_err(|e| format!("Serialization error: {}", e))
    }

    fn can_send_internal(&self) -> bool {
        self.pending == 0 && !self.input.trim().is_empty()
    }
}

#[wasm_bindgen]
impl ChatWidgetSession {
    /// `demo` is true when no AI credential is configured
    #[wasm_bindgen(constructor)]
    pub fn new(demo: bool) -> Self {
        Self::with_resolver(demo, ResponseResolver::default())
    }

    #[wasm_bindgen(getter, js_name = isDemo)]
    pub fn is_demo(&self) -> bool {
        self.demo
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the widget; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    #[wasm_bindgen(getter)]
    pub fn input(&self) -> String {
        self.input.clone()
    }

    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
    }

    /// Whether the send button is enabled
    #[wasm_bindgen(getter, js_name = canSend)]
    pub fn can_send(&self) -> bool {
        self.can_send_internal()
    }

    /// Send `content`, or the input box when omitted. Returns the text sent,
    /// or undefined if it was blank.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&mut self, content: Option<String>) -> Option<String> {
        self.send_message_internal(content)
    }

    /// Finish a demo-mode send with the scripted reply for `query`
    #[wasm_bindgen(js_name = completeScripted)]
    pub fn complete_scripted(&mut self, query: &str) -> String {
        let reply = self.resolver.resolve(query);
        self.complete(reply.clone());
        reply
    }

    /// Finish a live send with the backend's reply
    #[wasm_bindgen(js_name = completeWithReply)]
    pub fn complete_with_reply(&mut self, reply: &str) {
        self.complete(reply.to_string());
    }

    /// Finish a live send that failed
    #[wasm_bindgen(js_name = completeWithError)]
    pub fn complete_with_error(&mut self) {
        self.complete(APOLOGY_REPLY.to_string());
    }

    /// JSON body for `POST /api/chat` covering the latest user message
    #[wasm_bindgen(js_name = pendingRequest)]
    pub fn pending_request(&self) -> Result<String, JsValue> {
        self.request_body_internal().map_err(|e| JsValue::from_str(&e))
    }

    /// Messages to render (system messages excluded)
    pub fn messages(&self) -> Result<JsValue, JsValue> {
        let visible: Vec<&ChatMessage> = self.transcript.visible().collect();
        serde_wasm_bindgen::to_value(&visible)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
