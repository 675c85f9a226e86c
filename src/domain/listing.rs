// src/domain/listing.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const RENT: &str = "rent";
pub const BUY: &str = "buy";

/// A flat record for a property, directory member or service entry.
///
/// Source documents are loose: numbers arrive as JSON numbers or as strings
/// (`"650"`, `"0.3 miles"`), ids as either. Every numeric field is parsed
/// leniently and a malformed value becomes `None`, so one bad field never
/// throws away the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,

    #[serde(alias = "name", default)]
    pub title: String,

    #[serde(rename = "type", alias = "category", default)]
    pub listing_type: Option<String>,

    // Numeric attributes
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bathrooms: Option<f64>,
    #[serde(alias = "sqft", default, deserialize_with = "lenient_number")]
    pub area: Option<f64>,
    #[serde(
        alias = "distanceToCampus",
        default,
        deserialize_with = "lenient_number"
    )]
    pub distance: Option<f64>,

    // Text attributes
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,

    #[serde(
        alias = "amenities",
        alias = "features",
        alias = "specialties",
        default,
        deserialize_with = "lenient_tags"
    )]
    pub tags: Vec<String>,

    /// Directory membership level ("Gold", "Silver", "Member").
    #[serde(alias = "membershipLevel", default, deserialize_with = "lenient_tier")]
    pub tier: Option<String>,

    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub available: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Listing {
    /// Bare listing with only an id, used by tests and synthetic sources.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            listing_type: None,
            price: None,
            bedrooms: None,
            bathrooms: None,
            area: None,
            distance: None,
            neighborhood: None,
            address: String::new(),
            description: String::new(),
            tags: Vec::new(),
            tier: None,
            contact: None,
            image: None,
            available: None,
            website: None,
        }
    }

    pub fn is_rental(&self) -> bool {
        self.listing_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(RENT))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim();
        self.tags
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(wanted))
    }

    /// Lowercased concatenation of every searchable text attribute.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.address.len() + self.description.len() + 64,
        );
        for part in [
            self.title.as_str(),
            self.address.as_str(),
            self.description.as_str(),
            self.neighborhood.as_deref().unwrap_or(""),
        ] {
            text.push_str(part);
            text.push('\n');
        }
        for tag in &self.tags {
            text.push_str(tag);
            text.push('\n');
        }
        text.to_lowercase()
    }

    /// "$650/month" for rentals, "$285,000" otherwise.
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => {
                let amount = format_dollars(price);
                if self.is_rental() {
                    format!("{amount}/month")
                } else {
                    amount
                }
            }
            None => "Price on request".to_string(),
        }
    }
}

/// "$1,234" style formatting, rounded to whole dollars.
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Parses the leading number of a string the way a browser's `parseFloat`
/// does: `"0.3 miles"` is 0.3, `"650"` is 650, `"n/a"` is nothing.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, ch) in s.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    s[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "listing id must be a non-empty string or number, got {other}"
        ))),
    }
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_tier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(3) => Some("Gold".to_string()),
            Some(2) => Some("Silver".to_string()),
            Some(1) => Some("Member".to_string()),
            _ => None,
        },
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}
