// src/domain/validation.rs

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Select,
    TextArea,
    Hidden,
}

/// A form field as the validator sees it: no DOM, just the attributes that
/// matter for validation.
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    /// Whole-value pattern, like the HTML `pattern` attribute.
    pub pattern: Option<String>,
}

impl FormField {
    pub fn new(id: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            value: value.into(),
            required: false,
            pattern: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Pattern used by the membership form's "title" field.
pub const TITLE_PATTERN: &str = r"[A-Za-z\- ]{7,}";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("static phone regex"))
}

/// Validates one field. Type-specific checks only run on a non-empty value
/// that already passed the required check.
pub fn validate_field(field: &FormField) -> Result<(), FieldError> {
    let value = field.value.trim();
    let fail = |message: &str| -> Result<(), FieldError> {
        Err(FieldError {
            field_id: field.id.clone(),
            message: message.to_string(),
        })
    };

    if value.is_empty() {
        return if field.required {
            fail("This field is required.")
        } else {
            Ok(())
        };
    }

    match field.kind {
        FieldKind::Email if !email_regex().is_match(value) => {
            fail("Please enter a valid email address.")
        }
        FieldKind::Tel => {
            let digits: String = value
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
                .collect();
            if phone_regex().is_match(&digits) {
                Ok(())
            } else {
                fail("Please enter a valid phone number.")
            }
        }
        FieldKind::Text => match field.pattern.as_deref() {
            Some(pattern) if !matches_whole(pattern, value) => {
                if field.id == "title" {
                    fail("Title must be at least 7 characters and contain only letters, spaces, and hyphens.")
                } else {
                    fail("Please enter a valid value.")
                }
            }
            _ => Ok(()),
        },
        FieldKind::Number if value.parse::<f64>().is_err() => fail("Please enter a number."),
        _ => Ok(()),
    }
}

/// HTML `pattern` semantics: the pattern must match the entire value. An
/// invalid pattern never rejects input.
fn matches_whole(pattern: &str, value: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "ignoring invalid field pattern");
            true
        }
    }
}

#[derive(Debug, Default)]
pub struct FormReport {
    pub errors: Vec<FieldError>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The field that should receive focus after a failed submit.
    pub fn first_invalid(&self) -> Option<&str> {
        self.errors.first().map(|e| e.field_id.as_str())
    }

    pub fn error_for(&self, field_id: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field_id == field_id)
            .map(|e| e.message.as_str())
    }
}

pub fn validate_form(fields: &[FormField]) -> FormReport {
    FormReport {
        errors: fields
            .iter()
            .filter_map(|f| validate_field(f).err())
            .collect(),
    }
}
