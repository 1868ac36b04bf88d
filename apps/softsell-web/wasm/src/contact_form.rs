//! Contact form state held in Rust
//!
//! JavaScript forwards input/blur/submit events and renders whatever this
//! session reports. Errors are only reported for fields the user has touched.

use std::collections::{BTreeMap, BTreeSet};

use softsell_core::{
    validate_field, validate_submission, ContactSubmission, FormField, ValidationErrors,
};
use wasm_bindgen::prelude::*;

fn parse_field(key: &str) -> Result<FormField, String> {
    FormField::from_key(key).ok_or_else(|| format!("Unknown form field: {}", key))
}

/// Stateful contact form session
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct ContactFormSession {
    values: ContactSubmission,
    touched: BTreeSet<FormField>,
    errors: ValidationErrors,
    submitting: bool,
    submit_success: bool,
}

impl ContactFormSession {
    fn set_value_internal(&mut self, field: FormField, value: &str) {
        self.values.set(field, value);
        if self.touched.contains(&field) {
            self.errors.apply(field, validate_field(field, value));
        }
    }

    fn blur_internal(&mut self, field: FormField) {
        self.touched.insert(field);
        self.errors
            .apply(field, validate_field(field, self.values.get(field)));
    }

    /// Touch every field and validate. Returns true if the (simulated)
    /// request should now be sent.
    fn begin_submit_internal(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.touched.extend(FormField::ALL);
        self.errors = validate_submission(&self.values);
        if !self.errors.is_valid() {
            return false;
        }
        self.submitting = true;
        true
    }

    fn complete_submit_internal(&mut self) {
        if !self.submitting {
            return;
        }
        self.submit_success = true;
        self.submitting = false;
        self.values = ContactSubmission::default();
        self.touched.clear();
    }

    /// Errors for touched fields only, keyed by form field name
    fn visible_errors(&self) -> BTreeMap<&'static str, String> {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(field))
            .map(|(field, msg)| (field.key(), msg.to_string()))
            .collect()
    }

    fn error_for_internal(&self, field: FormField) -> Option<String> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(field).map(str::to_string)
    }
}

#[wasm_bindgen]
impl ContactFormSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an input change event
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        let field = parse_field(key).map_err(|e| JsValue::from_str(&e))?;
        self.set_value_internal(field, value);
        Ok(())
    }

    /// Handle a blur event
    pub fn blur(&mut self, key: &str) -> Result<(), JsValue> {
        let field = parse_field(key).map_err(|e| JsValue::from_str(&e))?;
        self.blur_internal(field);
        Ok(())
    }

    /// Handle the submit event.
    /// Returns true when the form is valid and the submission has started;
    /// call `completeSubmit` once the request finishes.
    pub fn submit(&mut self) -> bool {
        self.begin_submit_internal()
    }

    #[wasm_bindgen(js_name = completeSubmit)]
    pub fn complete_submit(&mut self) {
        self.complete_submit_internal();
    }

    #[wasm_bindgen(getter, js_name = isSubmitting)]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[wasm_bindgen(getter, js_name = submitSuccess)]
    pub fn submit_success(&self) -> bool {
        self.submit_success
    }

    /// Current field values as `{name, email, company, licenseType, message}`
    pub fn values(&self) -> Result<JsValue, JsValue> {
        crate::to_js(&self.values)
    }

    /// Errors to display, for touched fields only
    pub fn errors(&self) -> Result<JsValue, JsValue> {
        crate::to_js(&self.visible_errors())
    }

    /// Error message to show under one field, if any
    #[wasm_bindgen(js_name = errorFor)]
    pub fn error_for(&self, key: &str) -> Result<Option<String>, JsValue> {
        let field = parse_field(key).map_err(|e| JsValue::from_str(&e))?;
        Ok(self.error_for_internal(field))
    }
}
