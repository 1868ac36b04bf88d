//! Contact form validation
//!
//! Every field is checked on every call; a failing field never hides the
//! errors of another. Within one field the rules are ordered and the first
//! one that applies produces the single message for that field.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Letters, whitespace, hyphens and apostrophes only
    static ref NAME_PATTERN: Regex = Regex::new(r"^[a-zA-Z\s\-']+$").unwrap();

    /// local@domain.tld with no whitespace or extra '@' in any part
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const COMPANY_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 500;

/// License categories offered by the form's select box.
///
/// The validator only requires that *something* was selected; it does not
/// check membership in this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseType {
    #[serde(rename = "Microsoft Office")]
    MicrosoftOffice,
    #[serde(rename = "Adobe Creative Cloud")]
    AdobeCreativeCloud,
    #[serde(rename = "Windows Server")]
    WindowsServer,
    #[serde(rename = "Microsoft 365")]
    Microsoft365,
    #[serde(rename = "Other")]
    Other,
}

impl LicenseType {
    pub const ALL: [LicenseType; 5] = [
        LicenseType::MicrosoftOffice,
        LicenseType::AdobeCreativeCloud,
        LicenseType::WindowsServer,
        LicenseType::Microsoft365,
        LicenseType::Other,
    ];

    /// Display label, also the value submitted by the form
    pub fn label(&self) -> &'static str {
        match self {
            LicenseType::MicrosoftOffice => "Microsoft Office",
            LicenseType::AdobeCreativeCloud => "Adobe Creative Cloud",
            LicenseType::WindowsServer => "Windows Server",
            LicenseType::Microsoft365 => "Microsoft 365",
            LicenseType::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Company,
    LicenseType,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Company,
        FormField::LicenseType,
        FormField::Message,
    ];

    /// Key used by the form markup and the JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Company => "company",
            FormField::LicenseType => "licenseType",
            FormField::Message => "message",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One contact form submission.
///
/// Missing JSON fields deserialize to empty strings, which the validator then
/// reports as "required".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub license_type: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Company => &self.company,
            FormField::LicenseType => &self.license_type,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Company => self.company = value,
            FormField::LicenseType => self.license_type = value,
            FormField::Message => self.message = value,
        }
    }
}

/// Field name to error message. A field is present only while it is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Record the outcome of checking one field: set the message, or clear
    /// any previous one when the field now passes.
    pub fn apply(&mut self, field: FormField, outcome: Option<String>) {
        match outcome {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length in UTF-16 code units, the unit browser form fields report
fn char_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Check the name field
pub fn validate_name(name: &str) -> Option<String> {
    if is_blank(name) {
        return Some("Name is required".to_string());
    }
    let len = char_len(name);
    if len < NAME_MIN_CHARS {
        return Some("Name must be at least 2 characters".to_string());
    }
    if len > NAME_MAX_CHARS {
        return Some("Name must be less than 50 characters".to_string());
    }
    if !NAME_PATTERN.is_match(name) {
        return Some(
            "Name can only contain letters, spaces, hyphens, and apostrophes".to_string(),
        );
    }
    None
}

fn validate_email(email: &str) -> Option<String> {
    if is_blank(email) {
        Some("Email is required".to_string())
    } else if !EMAIL_PATTERN.is_match(email) {
        Some("Invalid email format".to_string())
    } else {
        None
    }
}

fn validate_company(company: &str) -> Option<String> {
    if is_blank(company) {
        Some("Company name is required".to_string())
    } else if char_len(company) < COMPANY_MIN_CHARS {
        Some("Company name must be at least 2 characters".to_string())
    } else {
        None
    }
}

fn validate_license_type(license_type: &str) -> Option<String> {
    if license_type.is_empty() {
        Some("Please select a license type".to_string())
    } else {
        None
    }
}

fn validate_message(message: &str) -> Option<String> {
    if is_blank(message) {
        return Some("Message is required".to_string());
    }
    let len = char_len(message);
    if len < MESSAGE_MIN_CHARS {
        Some("Message must be at least 10 characters".to_string())
    } else if len > MESSAGE_MAX_CHARS {
        Some("Message must be less than 500 characters".to_string())
    } else {
        None
    }
}

/// Check a single field value, returning its error message if it fails
pub fn validate_field(field: FormField, value: &str) -> Option<String> {
    match field {
        FormField::Name => validate_name(value),
        FormField::Email => validate_email(value),
        FormField::Company => validate_company(value),
        FormField::LicenseType => validate_license_type(value),
        FormField::Message => validate_message(value),
    }
}

/// Validate a whole submission. An empty result means the form can be sent.
pub fn validate_submission(submission: &ContactSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in FormField::ALL {
        errors.apply(field, validate_field(field, submission.get(field)));
    }
    errors
}
