// src/domain/forms.rs
//
// The site's two forms: chamber membership and list-a-property. A form is a
// static description; values arrive as a `Submission`.

use crate::domain::submission::Submission;
use crate::domain::validation::{validate_form, FieldKind, FormField, FormReport, TITLE_PATTERN};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub pattern: Option<&'static str>,
    pub hint: Option<&'static str>,
    /// `(value, label)` pairs for selects.
    pub options: &'static [(&'static str, &'static str)],
}

const TEXT: FieldSpec = FieldSpec {
    name: "",
    label: "",
    kind: FieldKind::Text,
    required: false,
    pattern: None,
    hint: None,
    options: &[],
};

#[derive(Debug)]
pub struct FormSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub intro: &'static str,
    /// Where the form page lives; "Save draft" submits here.
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const MEMBERSHIP_LEVELS: [(&str, &str); 4] = [
    ("np", "NP Membership (free for non-profits)"),
    ("bronze", "Bronze Membership"),
    ("silver", "Silver Membership"),
    ("gold", "Gold Membership"),
];

pub const LISTING_TYPES: [(&str, &str); 2] = [("rent", "For Rent"), ("sale", "For Sale")];

pub static JOIN_FORM: FormSpec = FormSpec {
    id: "join",
    title: "Join the Chamber",
    intro: "Tell us about you and your business. Fields marked * are required.",
    path: "/join",
    fields: &[
        FieldSpec { name: "firstName", label: "First name", required: true, ..TEXT },
        FieldSpec { name: "lastName", label: "Last name", required: true, ..TEXT },
        FieldSpec {
            name: "title",
            label: "Organizational title",
            pattern: Some(TITLE_PATTERN),
            hint: Some("At least 7 letters, spaces or hyphens."),
            ..TEXT
        },
        FieldSpec { name: "email", label: "Email", kind: FieldKind::Email, required: true, ..TEXT },
        FieldSpec { name: "phone", label: "Mobile phone", kind: FieldKind::Tel, required: true, ..TEXT },
        FieldSpec { name: "businessName", label: "Business name", required: true, ..TEXT },
        FieldSpec {
            name: "membershipLevel",
            label: "Membership level",
            kind: FieldKind::Select,
            required: true,
            options: &MEMBERSHIP_LEVELS,
            ..TEXT
        },
        FieldSpec { name: "description", label: "Business description", kind: FieldKind::TextArea, ..TEXT },
        FieldSpec { name: "timestamp", label: "Submitted", kind: FieldKind::Hidden, ..TEXT },
    ],
};

pub static LIST_PROPERTY_FORM: FormSpec = FormSpec {
    id: "list-property",
    title: "List your property",
    intro: "Reach students and families looking for housing near campus. Fields marked * are required.",
    path: "/list-property",
    fields: &[
        FieldSpec { name: "ownerName", label: "Your name", required: true, ..TEXT },
        FieldSpec { name: "ownerEmail", label: "Email", kind: FieldKind::Email, required: true, ..TEXT },
        FieldSpec { name: "ownerPhone", label: "Phone", kind: FieldKind::Tel, ..TEXT },
        FieldSpec {
            name: "listingType",
            label: "Listing type",
            kind: FieldKind::Select,
            required: true,
            options: &LISTING_TYPES,
            ..TEXT
        },
        FieldSpec { name: "propertyAddress", label: "Property address", required: true, ..TEXT },
        FieldSpec { name: "propertyPrice", label: "Price", kind: FieldKind::Number, required: true, ..TEXT },
        FieldSpec { name: "propertyBedrooms", label: "Bedrooms", kind: FieldKind::Number, ..TEXT },
        FieldSpec { name: "propertyDescription", label: "Description", kind: FieldKind::TextArea, ..TEXT },
    ],
};

pub fn form_by_id(id: &str) -> Option<&'static FormSpec> {
    [&JOIN_FORM, &LIST_PROPERTY_FORM].into_iter().find(|f| f.id == id)
}

impl FormSpec {
    /// Every visible field is checked, so a missing required field fails.
    pub fn validate(&self, submission: &Submission) -> FormReport {
        let fields: Vec<FormField> = self
            .fields
            .iter()
            .filter(|f| f.kind != FieldKind::Hidden)
            .map(|spec| {
                let mut field = FormField::new(spec.name, spec.kind, submission.get(spec.name).unwrap_or(""));
                if spec.required {
                    field = field.required();
                }
                if let Some(pattern) = spec.pattern {
                    field = field.with_pattern(pattern);
                }
                field
            })
            .collect();

        validate_form(&fields)
    }

    /// Values worth keeping in a draft: known visible fields, non-empty.
    pub fn draft_values<'a>(&self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
        pairs
            .into_iter()
            .filter(|(k, v)| !v.trim().is_empty() && self.is_draftable(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn is_draftable(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == name && f.kind != FieldKind::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lookup() {
        assert_eq!(form_by_id("join").map(|f| f.path), Some("/join"));
        assert_eq!(form_by_id("list-property").map(|f| f.fields.len()), Some(8));
        assert!(form_by_id("survey").is_none());
    }

    #[test]
    fn test_missing_required_fields_fail() {
        let report = JOIN_FORM.validate(&Submission::from_query("form=join&firstName=Ada"));

        assert_eq!(report.error_for("lastName"), Some("This field is required."));
        assert_eq!(report.error_for("membershipLevel"), Some("This field is required."));
        assert_eq!(report.error_for("title"), None, "optional and empty");
        assert_eq!(report.error_for("timestamp"), None);
        assert_eq!(report.first_invalid(), Some("lastName"));
    }

    #[test]
    fn test_complete_listing_form_passes() {
        let submission = Submission::from_query(
            "form=list-property&ownerName=Sam&ownerEmail=sam%40example.com&listingType=rent\
             &propertyAddress=12+Elm+St&propertyPrice=650",
        );
        assert!(LIST_PROPERTY_FORM.validate(&submission).is_valid());

        let bad_price = Submission::from_query(
            "ownerName=Sam&ownerEmail=sam%40example.com&listingType=rent&propertyAddress=12+Elm+St&propertyPrice=cheap",
        );
        assert_eq!(
            LIST_PROPERTY_FORM.validate(&bad_price).error_for("propertyPrice"),
            Some("Please enter a number.")
        );
    }

    #[test]
    fn test_draft_values_keep_known_fields() {
        let values = JOIN_FORM.draft_values([
            ("firstName", "Ada"),
            ("lastName", "  "),
            ("timestamp", "2024-01-01T00:00:00Z"),
            ("save", "draft"),
            ("form", "join"),
        ]);

        assert_eq!(values.len(), 1);
        assert_eq!(values.get("firstName").map(String::as_str), Some("Ada"));
    }
}
