// src/domain/submission.rs

use crate::domain::forms::{form_by_id, FormSpec, MEMBERSHIP_LEVELS};
use crate::domain::listing::format_dollars;
use crate::domain::validation::{validate_form, FieldKind, FormField, FormReport, TITLE_PATTERN};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const NOT_PROVIDED: &str = "Not provided";

/// Form values echoed back on the thank-you page, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Which form produced the values, from the hidden `form` input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    pub fields: Vec<(String, String)>,
}

/// One row of the thank-you page.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayField {
    pub label: String,
    pub value: String,
    /// `mailto:` / `tel:` target when the value is contact information.
    pub link: Option<String>,
}

impl Submission {
    /// Parses a raw (still percent-encoded) query string. The `form` and
    /// `save` controls are not values.
    pub fn from_query(query: &str) -> Self {
        let mut form_id = None;
        let mut fields = Vec::new();
        for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
            match k.as_ref() {
                "" | "save" => {}
                "form" => form_id = Some(v.trim().to_string()).filter(|v| !v.is_empty()),
                _ => fields.push((k.into_owned(), v.trim().to_string())),
            }
        }
        Self { form_id, fields }
    }

    /// The known form that produced this submission, if any.
    pub fn form(&self) -> Option<&'static FormSpec> {
        self.form_id.as_deref().and_then(form_by_id)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// "First Last", whichever half exists, or "Not provided".
    pub fn display_name(&self) -> String {
        match (self.get("firstName"), self.get("lastName")) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => NOT_PROVIDED.to_string(),
        }
    }

    /// The submitted values as validator fields. Only keys present in the
    /// submission are checked; names, emails and the listing address are
    /// required once present.
    pub fn form_fields(&self) -> Vec<FormField> {
        self.fields
            .iter()
            .map(|(key, value)| {
                let kind = match key.as_str() {
                    "email" | "ownerEmail" => FieldKind::Email,
                    "phone" | "ownerPhone" => FieldKind::Tel,
                    "propertyPrice" | "propertyBedrooms" => FieldKind::Number,
                    "propertyDescription" => FieldKind::TextArea,
                    "listingType" => FieldKind::Select,
                    _ => FieldKind::Text,
                };
                let mut field = FormField::new(key.clone(), kind, value.clone());
                if matches!(
                    key.as_str(),
                    "firstName" | "lastName" | "email" | "ownerName" | "ownerEmail" | "propertyAddress"
                ) {
                    field = field.required();
                }
                if key == "title" {
                    field = field.with_pattern(TITLE_PATTERN);
                }
                field
            })
            .collect()
    }

    /// A known form checks all of its fields; otherwise only the submitted
    /// keys are checked.
    pub fn validate(&self) -> FormReport {
        match self.form() {
            Some(form) => form.validate(self),
            None => validate_form(&self.form_fields()),
        }
    }

    pub fn display_fields(&self) -> Vec<DisplayField> {
        self.fields
            .iter()
            .map(|(key, value)| DisplayField {
                label: field_label(key),
                value: format_value(key, value),
                link: contact_link(key, value),
            })
            .collect()
    }
}

pub fn field_label(key: &str) -> String {
    let known = match key {
        "firstName" => "First Name",
        "lastName" => "Last Name",
        "email" | "ownerEmail" => "Email Address",
        "phone" | "ownerPhone" => "Phone Number",
        "businessName" => "Business Name",
        "membershipLevel" => "Membership Level",
        "timestamp" => "Submitted",
        "ownerName" => "Your Name",
        "listingType" => "Listing Type",
        "propertyAddress" => "Property Address",
        "propertyPrice" => "Price",
        "propertyBedrooms" => "Bedrooms",
        "propertyDescription" => "Description",
        _ => "",
    };
    if !known.is_empty() {
        return known.to_string();
    }

    // camelCase -> "Camel Case"
    let mut label = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}

fn format_value(key: &str, value: &str) -> String {
    if value.is_empty() {
        return NOT_PROVIDED.to_string();
    }

    match key {
        "propertyPrice" => value
            .parse::<f64>()
            .map(format_dollars)
            .unwrap_or_else(|_| value.to_string()),
        "listingType" => match value {
            "rent" => "For Rent".to_string(),
            "sale" | "buy" => "For Sale".to_string(),
            other => other.to_string(),
        },
        "membershipLevel" => MEMBERSHIP_LEVELS
            .iter()
            .find(|(code, _)| *code == value)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| value.to_string()),
        "propertyBedrooms" => {
            let plural = if value == "1" { "" } else { "s" };
            format!("{value} Bedroom{plural}")
        }
        "phone" | "ownerPhone" => format_phone(value),
        "timestamp" => format_timestamp(value),
        _ => value.to_string(),
    }
}

fn contact_link(key: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match key {
        "email" | "ownerEmail" => Some(format!("mailto:{value}")),
        "phone" | "ownerPhone" => Some(format!("tel:{value}")),
        _ => None,
    }
}

/// Ten-digit US numbers as "(208) 555-0101"; anything else unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.len() {
        11 if digits.starts_with('1') => &digits[1..],
        _ => digits.as_str(),
    };

    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%B %-d, %Y at %-I:%M %p")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}
