// src/content/neighborhoods.rs

use crate::domain::Listing;
use crate::domain::query::group_by_neighborhood;
use crate::ui::{Dialog, ModalController, ModalError, ModalState};
use serde::{Deserialize, Serialize};

/// Filter buttons on the neighborhoods page, in display order.
pub const FILTERS: [&str; 4] = ["all", "campus", "family", "downtown"];
pub const DEFAULT_FILTER: &str = "all";

pub const DETAILS_DIALOG: &str = "neighborhood-details";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub distance_to_campus: String,
    pub average_rent: u32,
    pub safety_score: u8,
    pub walk_score: u8,
    pub parking: String,
    pub public_transit: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub description: String,
    pub full_description: String,
    pub amenities: NearbyAmenities,
    pub transportation: Transportation,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub best_for: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyAmenities {
    #[serde(default)]
    pub shopping: Vec<String>,
    #[serde(default)]
    pub dining: Vec<String>,
    #[serde(default)]
    pub recreation: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    #[serde(default)]
    pub bus_routes: Vec<String>,
    pub bike_paths: String,
    pub walking_to_campus: String,
}

impl Neighborhood {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Element id of the card, where focus returns when the dialog closes.
    pub fn card_id(&self) -> String {
        format!("neighborhood-{}", self.id)
    }
}

pub fn details_dialog(neighborhood: &Neighborhood) -> Dialog {
    Dialog::new(DETAILS_DIALOG, neighborhood.name.clone())
        .with_close_button("neighborhood-close")
        .with_focusable("neighborhood-listings")
}

/// The details dialog opened from the neighborhood's card. The returned
/// controller remembers the card as the return-focus target.
pub fn open_details(neighborhood: &Neighborhood) -> Result<ModalController, ModalError> {
    let mut modal = ModalController::new();
    modal.register(details_dialog(neighborhood));
    modal.set_focus(neighborhood.card_id());
    modal.show(DETAILS_DIALOG)?;
    Ok(modal)
}

/// Where focus goes once the open dialog closes.
pub fn return_focus(modal: &ModalController) -> Option<&str> {
    match modal.state() {
        ModalState::Open { return_focus, .. } => return_focus.as_deref(),
        ModalState::Closed => None,
    }
}

/// One of the known filter names, or `None` for anything else.
pub fn parse_filter(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    FILTERS.iter().copied().find(|f| f.eq_ignore_ascii_case(raw))
}

/// Neighborhoods matching a filter; `all` keeps everything.
pub fn filter_neighborhoods<'a>(all: &'a [Neighborhood], filter: &str) -> Vec<&'a Neighborhood> {
    all.iter()
        .filter(|n| filter == DEFAULT_FILTER || n.has_category(filter))
        .collect()
}

pub fn category_label(category: &str) -> &str {
    match category {
        "all" => "All",
        "campus" => "Near Campus",
        "family" => "Family-Friendly",
        "downtown" => "Downtown",
        "quiet" => "Quiet",
        "affordable" => "Affordable",
        "luxury" => "Luxury",
        other => other,
    }
}

/// How many catalog listings sit in each neighborhood, matched by name.
pub fn listing_counts(neighborhoods: &[&Neighborhood], listings: &[Listing]) -> Vec<usize> {
    let groups = group_by_neighborhood(listings);
    neighborhoods
        .iter()
        .map(|n| {
            groups
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case(n.name.trim()))
                .map(|(_, items)| items.len())
                .sum()
        })
        .collect()
}
