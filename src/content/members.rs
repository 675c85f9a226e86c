// src/content/members.rs

use crate::domain::Listing;
use serde::{Deserialize, Serialize};

/// Directory layout, remembered in the stored preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryView {
    #[default]
    Grid,
    List,
}

impl DirectoryView {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "grid" => Some(DirectoryView::Grid),
            "list" => Some(DirectoryView::List),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectoryView::Grid => "grid",
            DirectoryView::List => "list",
        }
    }
}

/// Card class for a member's level.
pub fn membership_class(member: &Listing) -> &'static str {
    match member.tier.as_deref() {
        Some(t) if t.eq_ignore_ascii_case("gold") => "gold-member",
        Some(t) if t.eq_ignore_ascii_case("silver") => "silver-member",
        _ => "member",
    }
}
