// src/storage/prefs.rs
//
// Typed records kept in namespaced storage: favorites, history, preferences,
// form drafts and the visit greeting.

use crate::domain::query::Criteria;
use crate::domain::submission::Submission;
use crate::storage::NamespacedStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const FAVORITES_KEY: &str = "favorite_properties";
const SEARCH_HISTORY_KEY: &str = "search_history";
const VIEWED_KEY: &str = "viewed_properties";
const PREFERENCES_KEY: &str = "user_preferences";
const LATEST_SUBMISSION_KEY: &str = "latest_submission";
const LAST_VISIT_KEY: &str = "last_visit";
const SERVICE_INTERACTIONS_KEY: &str = "service_interactions";
const NEIGHBORHOOD_FILTER_KEY: &str = "neighborhoodFilter";

pub const SEARCH_HISTORY_LIMIT: usize = 10;
pub const VIEWED_LIMIT: usize = 20;
pub const SERVICE_INTERACTIONS_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub id: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub criteria: Criteria,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedEntry {
    pub listing_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInteraction {
    pub service_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Stored preferences; fields missing from an older record take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub sort_by: String,
    pub view_mode: String,
    pub results_per_page: usize,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            sort_by: "price-low".to_string(),
            view_mode: "grid".to_string(),
            results_per_page: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub fields: BTreeMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

fn counter_key(name: &str) -> String {
    format!("counter_{name}")
}

fn draft_key(form_id: &str) -> String {
    format!("form_draft_{form_id}")
}

impl NamespacedStorage {
    // Favorites

    pub fn favorites(&self) -> Vec<String> {
        self.get(FAVORITES_KEY).unwrap_or_default()
    }

    pub fn is_favorite(&self, listing_id: &str) -> bool {
        self.favorites().iter().any(|id| id == listing_id)
    }

    /// Returns false when the listing was already a favorite.
    pub fn add_favorite(&self, listing_id: &str) -> bool {
        let mut favorites = self.favorites();
        if favorites.iter().any(|id| id == listing_id) {
            return false;
        }
        favorites.push(listing_id.to_string());
        self.set(FAVORITES_KEY, &favorites)
    }

    /// Returns false when the listing was not a favorite.
    pub fn remove_favorite(&self, listing_id: &str) -> bool {
        let mut favorites = self.favorites();
        let before = favorites.len();
        favorites.retain(|id| id != listing_id);
        if favorites.len() == before {
            return false;
        }
        self.set(FAVORITES_KEY, &favorites)
    }

    /// Flips the favorite flag and returns the new state.
    pub fn toggle_favorite(&self, listing_id: &str) -> bool {
        if self.is_favorite(listing_id) {
            self.remove_favorite(listing_id);
            false
        } else {
            self.add_favorite(listing_id);
            true
        }
    }

    // Search history

    pub fn search_history(&self) -> Vec<SearchEntry> {
        self.get(SEARCH_HISTORY_KEY).unwrap_or_default()
    }

    pub fn add_search(&self, term: &str, criteria: &Criteria, now: DateTime<Utc>) -> bool {
        let mut history = self.search_history();
        history.insert(
            0,
            SearchEntry {
                id: format!("search_{}", now.timestamp_millis()),
                term: term.trim().to_string(),
                criteria: criteria.clone(),
                timestamp: now,
            },
        );
        history.truncate(SEARCH_HISTORY_LIMIT);
        self.set(SEARCH_HISTORY_KEY, &history)
    }

    pub fn clear_search_history(&self) -> bool {
        self.remove(SEARCH_HISTORY_KEY)
    }

    // Recently viewed

    pub fn viewed(&self) -> Vec<ViewedEntry> {
        self.get(VIEWED_KEY).unwrap_or_default()
    }

    /// Moves the listing to the front of the viewed list.
    pub fn add_viewed(&self, listing_id: &str, now: DateTime<Utc>) -> bool {
        let mut viewed = self.viewed();
        viewed.retain(|v| v.listing_id != listing_id);
        viewed.insert(
            0,
            ViewedEntry {
                listing_id: listing_id.to_string(),
                timestamp: now,
            },
        );
        viewed.truncate(VIEWED_LIMIT);
        self.set(VIEWED_KEY, &viewed)
    }

    pub fn recently_viewed_ids(&self, limit: usize) -> Vec<String> {
        self.viewed()
            .into_iter()
            .take(limit)
            .map(|v| v.listing_id)
            .collect()
    }

    // Preferences

    pub fn preferences(&self) -> UserPreferences {
        self.get(PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn save_preferences(&self, prefs: &UserPreferences) -> bool {
        self.set(PREFERENCES_KEY, prefs)
    }

    // Resources page

    /// Appends an interaction, keeping the most recent ones.
    pub fn track_service(&self, service_id: &str, action: &str, now: DateTime<Utc>) -> bool {
        let mut interactions = self.service_interactions();
        interactions.push(ServiceInteraction {
            service_id: service_id.to_string(),
            action: action.to_string(),
            timestamp: now,
        });
        let excess = interactions.len().saturating_sub(SERVICE_INTERACTIONS_LIMIT);
        interactions.drain(..excess);
        self.set(SERVICE_INTERACTIONS_KEY, &interactions)
    }

    pub fn service_interactions(&self) -> Vec<ServiceInteraction> {
        self.get(SERVICE_INTERACTIONS_KEY).unwrap_or_default()
    }

    /// Bumps a named counter and returns its new value.
    pub fn increment_counter(&self, name: &str) -> u64 {
        let next = self.counter(name) + 1;
        self.set(&counter_key(name), &next);
        next
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.get(&counter_key(name)).unwrap_or(0)
    }

    // Neighborhoods page

    pub fn neighborhood_filter(&self) -> Option<String> {
        self.get(NEIGHBORHOOD_FILTER_KEY)
    }

    pub fn save_neighborhood_filter(&self, filter: &str) -> bool {
        self.set(NEIGHBORHOOD_FILTER_KEY, filter)
    }

    // Form drafts

    pub fn save_form_draft(&self, form_id: &str, fields: BTreeMap<String, String>, now: DateTime<Utc>) -> bool {
        self.set(&draft_key(form_id), &FormDraft { fields, saved_at: now })
    }

    pub fn form_draft(&self, form_id: &str) -> Option<FormDraft> {
        self.get(&draft_key(form_id))
    }

    pub fn clear_form_draft(&self, form_id: &str) -> bool {
        self.remove(&draft_key(form_id))
    }

    // Submissions

    pub fn latest_submission(&self) -> Option<Submission> {
        self.get(LATEST_SUBMISSION_KEY)
    }

    pub fn save_submission(&self, submission: &Submission) -> bool {
        self.set(LATEST_SUBMISSION_KEY, submission)
    }

    // Visits

    /// Greeting for this visit, then records `now` as the last visit.
    pub fn record_visit(&self, now: DateTime<Utc>) -> String {
        let last = self
            .get::<i64>(LAST_VISIT_KEY)
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        let message = visit_message(now, last);
        self.set(LAST_VISIT_KEY, &now.timestamp_millis());
        message
    }
}

pub fn visit_message(now: DateTime<Utc>, last_visit: Option<DateTime<Utc>>) -> String {
    let Some(last) = last_visit else {
        return "Welcome! Let us know if you have any questions.".to_string();
    };

    match (now - last).num_days() {
        days if days < 1 => "Back so soon! Awesome!".to_string(),
        1 => "You last visited 1 day ago.".to_string(),
        days => format!("You last visited {days} days ago."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn storage() -> NamespacedStorage {
        NamespacedStorage::in_memory("homefinder_")
    }

    #[test]
    fn test_favorites_have_no_duplicates() {
        let s = storage();
        assert!(s.add_favorite("1"));
        assert!(!s.add_favorite("1"));
        assert!(s.add_favorite("7"));
        assert_eq!(s.favorites(), vec!["1", "7"]);

        assert!(!s.toggle_favorite("1"));
        assert!(!s.is_favorite("1"));
        assert!(s.toggle_favorite("1"));
        assert_eq!(s.favorites(), vec!["7", "1"]);

        assert!(!s.remove_favorite("missing"));
    }

    #[test]
    fn test_search_history_is_capped_newest_first() {
        let s = storage();
        let start = Utc::now();
        for i in 0..12 {
            let criteria = Criteria { min_bedrooms: Some(i as f64), ..Default::default() };
            s.add_search(&format!("term {i}"), &criteria, start + Duration::seconds(i));
        }

        let history = s.search_history();
        assert_eq!(history.len(), SEARCH_HISTORY_LIMIT);
        assert_eq!(history[0].term, "term 11");
        assert_eq!(history.last().unwrap().term, "term 2");

        assert!(s.clear_search_history());
        assert!(s.search_history().is_empty());
    }

    #[test]
    fn test_viewed_moves_to_front() {
        let s = storage();
        let now = Utc::now();
        s.add_viewed("1", now);
        s.add_viewed("2", now);
        s.add_viewed("1", now);

        assert_eq!(s.recently_viewed_ids(10), vec!["1", "2"]);
        assert_eq!(s.recently_viewed_ids(1), vec!["1"]);
    }

    #[test]
    fn test_preferences_default_and_partial_records() {
        let s = storage();
        assert_eq!(s.preferences(), UserPreferences::default());

        // An older record missing fields merges with defaults.
        s.set(PREFERENCES_KEY, &serde_json::json!({ "sortBy": "distance" }));
        let prefs = s.preferences();
        assert_eq!(prefs.sort_by, "distance");
        assert_eq!(prefs.results_per_page, 6);
    }

    #[test]
    fn test_form_drafts() {
        let s = storage();
        let mut fields = BTreeMap::new();
        fields.insert("ownerName".to_string(), "Sam".to_string());

        assert!(s.save_form_draft("listing-form", fields.clone(), Utc::now()));
        assert_eq!(s.form_draft("listing-form").unwrap().fields, fields);
        assert!(s.form_draft("other").is_none());

        s.clear_form_draft("listing-form");
        assert!(s.form_draft("listing-form").is_none());
    }

    #[test]
    fn test_service_interactions_are_capped() {
        let s = storage();
        let now = Utc::now();
        for i in 0..(SERVICE_INTERACTIONS_LIMIT + 5) {
            s.track_service(&format!("svc-{i}"), "view", now);
        }

        let interactions = s.service_interactions();
        assert_eq!(interactions.len(), SERVICE_INTERACTIONS_LIMIT);
        assert_eq!(interactions[0].service_id, "svc-5");
        assert_eq!(interactions.last().unwrap().action, "view");
    }

    #[test]
    fn test_counters_and_neighborhood_filter() {
        let s = storage();
        assert_eq!(s.counter("faqInteractions"), 0);
        assert_eq!(s.increment_counter("faqInteractions"), 1);
        assert_eq!(s.increment_counter("faqInteractions"), 2);

        assert_eq!(s.neighborhood_filter(), None);
        s.save_neighborhood_filter("family");
        assert_eq!(s.neighborhood_filter().as_deref(), Some("family"));
        assert!(s.keys().contains(&"neighborhoodFilter".to_string()));
    }

    #[test]
    fn test_visit_messages() {
        let now = Utc::now();
        assert!(visit_message(now, None).starts_with("Welcome!"));
        assert_eq!(visit_message(now, Some(now - Duration::hours(3))), "Back so soon! Awesome!");
        assert_eq!(visit_message(now, Some(now - Duration::hours(30))), "You last visited 1 day ago.");
        assert_eq!(visit_message(now, Some(now - Duration::days(5))), "You last visited 5 days ago.");
    }

    #[test]
    fn test_record_visit_stores_timestamp() {
        let s = storage();
        let first = Utc::now() - Duration::days(2);
        assert!(s.record_visit(first).starts_with("Welcome!"));
        assert_eq!(s.record_visit(Utc::now()), "You last visited 2 days ago.");
    }
}
