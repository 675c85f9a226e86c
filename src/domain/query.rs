// src/domain/query.rs

use crate::domain::listing::{Listing, BUY, RENT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Optional constraints applied by [`filter`]. `Default` is "no constraints".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
}

impl Criteria {
    pub fn is_empty(&self) -> bool {
        self == &Criteria::default()
    }

    /// True iff every supplied constraint holds. A field the constraint needs
    /// that is missing on the listing fails the constraint.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(wanted) = &self.listing_type {
            match &listing.listing_type {
                Some(t) if t.eq_ignore_ascii_case(wanted.trim()) => {}
                _ => return false,
            }
        }

        if !at_least(listing.price, self.min_price) {
            return false;
        }

        if let Some(max) = self.max_price {
            match listing.price {
                Some(price) if price <= max => {}
                _ => return false,
            }
        }

        if !at_least(listing.bedrooms, self.min_bedrooms) {
            return false;
        }

        if !self.required_tags.iter().all(|tag| listing.has_tag(tag)) {
            return false;
        }

        if let Some(wanted) = &self.neighborhood {
            match &listing.neighborhood {
                Some(n) if n.trim().eq_ignore_ascii_case(wanted.trim()) => {}
                _ => return false,
            }
        }

        true
    }
}

fn at_least(value: Option<f64>, min: Option<f64>) -> bool {
    match (value, min) {
        (_, None) => true,
        (Some(v), Some(min)) => v >= min,
        (None, Some(_)) => false,
    }
}

/// Listings satisfying `criteria`, in input order.
pub fn filter(listings: &[Listing], criteria: &Criteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Bedrooms,
    Area,
    Distance,
}

impl SortKey {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "price" => Some(SortKey::Price),
            "bedrooms" => Some(SortKey::Bedrooms),
            "area" | "sqft" => Some(SortKey::Area),
            "distance" => Some(SortKey::Distance),
            _ => None,
        }
    }

    fn value(self, listing: &Listing) -> Option<f64> {
        match self {
            SortKey::Price => listing.price,
            SortKey::Bedrooms => listing.bedrooms,
            SortKey::Area => listing.area,
            SortKey::Distance => listing.distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Stable sort by `key`. Listings without a value for `key` go last, in
/// input order, whatever the direction.
pub fn sort(listings: &[Listing], key: SortKey, direction: Direction) -> Vec<Listing> {
    let mut sorted = listings.to_vec();
    sorted.sort_by(|a, b| match (key.value(a), key.value(b)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Like [`sort`] with the key given by name. An unknown key returns the
/// input order unchanged.
pub fn sort_by_name(listings: &[Listing], key: &str, direction: Direction) -> Vec<Listing> {
    match SortKey::parse(key) {
        Some(key) => sort(listings, key, direction),
        None => {
            tracing::debug!(key, "unknown sort key, keeping input order");
            listings.to_vec()
        }
    }
}

/// Sort choices offered by the listings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    PriceLow,
    PriceHigh,
    Bedrooms,
    Area,
    Distance,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Bedrooms,
        SortOption::Area,
        SortOption::Distance,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "price-low" => Some(SortOption::PriceLow),
            "price-high" => Some(SortOption::PriceHigh),
            "bedrooms" => Some(SortOption::Bedrooms),
            "area" => Some(SortOption::Area),
            "distance" => Some(SortOption::Distance),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Bedrooms => "bedrooms",
            SortOption::Area => "area",
            SortOption::Distance => "distance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::PriceLow => "Price: low to high",
            SortOption::PriceHigh => "Price: high to low",
            SortOption::Bedrooms => "Most bedrooms",
            SortOption::Area => "Smallest first",
            SortOption::Distance => "Closest to campus",
        }
    }

    pub fn key_and_direction(self) -> (SortKey, Direction) {
        match self {
            SortOption::PriceLow => (SortKey::Price, Direction::Ascending),
            SortOption::PriceHigh => (SortKey::Price, Direction::Descending),
            SortOption::Bedrooms => (SortKey::Bedrooms, Direction::Descending),
            SortOption::Area => (SortKey::Area, Direction::Ascending),
            SortOption::Distance => (SortKey::Distance, Direction::Ascending),
        }
    }
}

/// Case-insensitive substring search over text attributes and tags.
/// A blank term returns every listing.
pub fn search(listings: &[Listing], term: &str) -> Vec<Listing> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return listings.to_vec();
    }

    listings
        .iter()
        .filter(|listing| listing.search_text().contains(&term))
        .cloned()
        .collect()
}

pub const WEIGHT_SAME_TYPE: u32 = 30;
pub const WEIGHT_SIMILAR_PRICE: u32 = 25;
pub const WEIGHT_SAME_BEDROOMS: u32 = 20;
pub const WEIGHT_SIMILAR_AREA: u32 = 15;
pub const WEIGHT_SAME_NEIGHBORHOOD: u32 = 10;

const SIMILAR_RATIO: f64 = 0.2;

/// Weighted feature match between `a` and `b`, 0..=100. Price and area are
/// compared relative to `a`.
pub fn similarity_score(a: &Listing, b: &Listing) -> u32 {
    let mut score = 0;

    if same_text(a.listing_type.as_deref(), b.listing_type.as_deref()) {
        score += WEIGHT_SAME_TYPE;
    }
    if within_ratio(a.price, b.price) {
        score += WEIGHT_SIMILAR_PRICE;
    }
    if matches!((a.bedrooms, b.bedrooms), (Some(x), Some(y)) if x == y) {
        score += WEIGHT_SAME_BEDROOMS;
    }
    if within_ratio(a.area, b.area) {
        score += WEIGHT_SIMILAR_AREA;
    }
    if same_text(a.neighborhood.as_deref(), b.neighborhood.as_deref()) {
        score += WEIGHT_SAME_NEIGHBORHOOD;
    }

    score
}

fn same_text(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x.trim().eq_ignore_ascii_case(y.trim()))
}

fn within_ratio(base: Option<f64>, other: Option<f64>) -> bool {
    match (base, other) {
        (Some(base), Some(other)) if base > 0.0 => (base - other).abs() / base < SIMILAR_RATIO,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredListing {
    pub listing: Listing,
    pub score: u32,
}

pub const DEFAULT_SIMILAR_LIMIT: usize = 4;

/// Other listings ranked by descending similarity to `target`; ties keep
/// input order.
pub fn similar_listings(target: &Listing, listings: &[Listing], limit: usize) -> Vec<ScoredListing> {
    let mut scored: Vec<ScoredListing> = listings
        .iter()
        .filter(|l| l.id != target.id)
        .map(|l| ScoredListing {
            score: similarity_score(target, l),
            listing: l.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub total: usize,
    pub for_rent: usize,
    pub for_sale: usize,
    pub average_rent: i64,
    pub average_sale_price: i64,
    pub min_rent: i64,
    pub max_rent: i64,
    pub min_sale_price: i64,
    pub max_sale_price: i64,
}

/// Summary figures for the listings page; `None` for an empty catalog.
pub fn stats(listings: &[Listing]) -> Option<ListingStats> {
    if listings.is_empty() {
        return None;
    }

    let prices_of = |kind: &str| -> Vec<f64> {
        listings
            .iter()
            .filter(|l| same_text(l.listing_type.as_deref(), Some(kind)))
            .filter_map(|l| l.price)
            .collect()
    };
    let count_of = |kind: &str| {
        listings
            .iter()
            .filter(|l| same_text(l.listing_type.as_deref(), Some(kind)))
            .count()
    };

    let rents = prices_of(RENT);
    let sales = prices_of(BUY);

    Some(ListingStats {
        total: listings.len(),
        for_rent: count_of(RENT),
        for_sale: count_of(BUY),
        average_rent: average(&rents),
        average_sale_price: average(&sales),
        min_rent: extreme(&rents, f64::min),
        max_rent: extreme(&rents, f64::max),
        min_sale_price: extreme(&sales, f64::min),
        max_sale_price: extreme(&sales, f64::max),
    })
}

fn average(values: &[f64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    (values.iter().sum::<f64>() / values.len() as f64).round() as i64
}

fn extreme(values: &[f64], pick: fn(f64, f64) -> f64) -> i64 {
    values
        .iter()
        .copied()
        .reduce(pick)
        .map(|v| v.round() as i64)
        .unwrap_or(0)
}

/// Listings grouped by neighborhood name; listings without one are left out.
pub fn group_by_neighborhood(listings: &[Listing]) -> BTreeMap<String, Vec<Listing>> {
    let mut groups: BTreeMap<String, Vec<Listing>> = BTreeMap::new();
    for listing in listings {
        if let Some(n) = listing.neighborhood.as_deref().filter(|n| !n.trim().is_empty()) {
            groups.entry(n.trim().to_string()).or_default().push(listing.clone());
        }
    }
    groups
}

/// Random Gold/Silver listings for the directory spotlight.
pub fn spotlights<R: Rng + ?Sized>(listings: &[Listing], count: usize, rng: &mut R) -> Vec<Listing> {
    let mut qualified: Vec<Listing> = listings
        .iter()
        .filter(|l| {
            l.tier
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("gold") || t.eq_ignore_ascii_case("silver"))
        })
        .cloned()
        .collect();

    qualified.shuffle(rng);
    qualified.truncate(count);
    qualified
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn listing(id: &str, kind: &str, price: f64) -> Listing {
        let mut l = Listing::new(id);
        l.listing_type = Some(kind.to_string());
        l.price = Some(price);
        l
    }

    fn sample() -> Vec<Listing> {
        let mut a = listing("1", "rent", 650.0);
        a.bedrooms = Some(2.0);
        a.area = Some(800.0);
        a.distance = Some(0.3);
        a.neighborhood = Some("University Area".into());
        a.address = "123 University Blvd".into();
        a.description = "Walk to Porter Park".into();
        a.tags = vec!["Parking".into(), "Laundry".into()];

        let mut b = listing("2", "buy", 285000.0);
        b.bedrooms = Some(3.0);
        b.area = Some(1200.0);
        b.distance = Some(1.2);
        b.neighborhood = Some("Family District".into());
        b.tags = vec!["Garage".into()];

        let mut c = listing("3", "rent", 550.0);
        c.bedrooms = Some(2.0);
        c.area = Some(750.0);
        c.neighborhood = Some("University Area".into());
        c.tags = vec!["Parking".into(), "Patio".into()];

        vec![a, b, c]
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_filter_empty_criteria_is_identity() {
        let all = sample();
        assert_eq!(filter(&all, &Criteria::default()), all);
        assert!(filter(&[], &Criteria::default()).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = sample();
        let criteria = Criteria {
            listing_type: Some("rent".into()),
            required_tags: vec!["parking".into()],
            ..Default::default()
        };
        let once = filter(&all, &criteria);
        assert_eq!(filter(&once, &criteria), once);
        assert_eq!(ids(&once), vec!["1", "3"]);
    }

    #[test]
    fn test_filter_rent_under_budget_keeps_order() {
        let all = vec![
            listing("a", "rent", 400.0),
            listing("b", "rent", 900.0),
            listing("c", "rent", 1600.0),
        ];
        let criteria = Criteria {
            listing_type: Some("rent".into()),
            max_price: Some(1000.0),
            ..Default::default()
        };

        let result = filter(&all, &criteria);
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_missing_field_fails_constraint() {
        let mut no_price = Listing::new("x");
        no_price.listing_type = Some("rent".into());
        let all = vec![no_price.clone(), listing("y", "rent", 500.0)];

        let priced = Criteria {
            min_price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&all, &priced)), vec!["y"]);

        // Without a price constraint the listing is not excluded.
        let by_type = Criteria {
            listing_type: Some("RENT".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&all, &by_type)), vec!["x", "y"]);
    }

    #[test]
    fn test_filter_bedrooms_tags_and_neighborhood() {
        let all = sample();
        let criteria = Criteria {
            min_bedrooms: Some(2.0),
            required_tags: vec!["Parking".into(), "Patio".into()],
            neighborhood: Some("university area".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&all, &criteria)), vec!["3"]);
    }

    #[test]
    fn test_filter_does_not_touch_source() {
        let all = sample();
        let before = all.clone();
        let _ = filter(&all, &Criteria { max_price: Some(1.0), ..Default::default() });
        assert_eq!(all, before);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let all = vec![listing("1", "rent", 5.0), listing("2", "rent", 5.0)];
        assert_eq!(ids(&sort(&all, SortKey::Price, Direction::Ascending)), vec!["1", "2"]);
        assert_eq!(ids(&sort(&all, SortKey::Price, Direction::Descending)), vec!["1", "2"]);
    }

    #[test]
    fn test_sort_directions_and_missing_values() {
        let mut all = sample();
        all.push(Listing::new("4"));

        let asc = sort(&all, SortKey::Price, Direction::Ascending);
        assert_eq!(ids(&asc), vec!["3", "1", "2", "4"]);

        let desc = sort(&all, SortKey::Price, Direction::Descending);
        assert_eq!(ids(&desc), vec!["2", "1", "3", "4"]);

        let by_distance = sort(&all, SortKey::Distance, Direction::Ascending);
        assert_eq!(ids(&by_distance), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_unknown_key_keeps_order() {
        let all = sample();
        assert_eq!(sort_by_name(&all, "colour", Direction::Descending), all);
        assert_eq!(
            ids(&sort_by_name(&all, "bedrooms", Direction::Descending)),
            vec!["2", "1", "3"]
        );
    }

    #[test]
    fn test_sort_option_mapping() {
        for option in SortOption::ALL {
            assert_eq!(SortOption::parse(option.as_str()), Some(option));
        }
        assert_eq!(
            SortOption::PriceHigh.key_and_direction(),
            (SortKey::Price, Direction::Descending)
        );
        assert_eq!(SortOption::parse("type"), None);
    }

    #[test]
    fn test_search_blank_is_identity() {
        let all = sample();
        assert_eq!(search(&all, ""), all);
        assert_eq!(search(&all, "   "), all);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = sample();
        let upper = search(&all, "PARK");
        let lower = search(&all, "park");
        assert_eq!(upper, lower);
        // "Porter Park" in a description and "Parking" tags.
        assert_eq!(ids(&upper), vec!["1", "3"]);
        assert_eq!(ids(&search(&all, "garage")), vec!["2"]);
    }

    #[test]
    fn test_similarity_with_self_is_max() {
        for l in sample() {
            assert_eq!(similarity_score(&l, &l), 100);
        }
    }

    #[test]
    fn test_similarity_partial_matches() {
        let all = sample();
        // same type, 550 within 20% of 650, same bedrooms, 750 within 20% of 800, same neighborhood
        assert_eq!(similarity_score(&all[0], &all[2]), 100);
        assert_eq!(similarity_score(&all[0], &all[1]), 0);

        let mut far = all[2].clone();
        far.price = Some(900.0);
        far.neighborhood = None;
        assert_eq!(similarity_score(&all[0], &far), 30 + 20 + 15);
    }

    #[test]
    fn test_similarity_missing_price_scores_zero_for_factor() {
        let a = Listing::new("a");
        let b = listing("b", "rent", 100.0);
        assert_eq!(similarity_score(&a, &b), 0);
    }

    #[test]
    fn test_similar_listings_excludes_target_and_breaks_ties_by_order() {
        let all = vec![
            listing("t", "rent", 600.0),
            listing("x", "buy", 600.0),
            listing("y", "rent", 5000.0),
            listing("z", "rent", 9000.0),
        ];
        let result = similar_listings(&all[0], &all, 2);
        let got: Vec<(&str, u32)> = result.iter().map(|s| (s.listing.id.as_str(), s.score)).collect();
        assert_eq!(got, vec![("y", 30), ("z", 30)]);
    }

    #[test]
    fn test_stats() {
        let s = stats(&sample()).unwrap();
        assert_eq!(s.total, 3);
        assert_eq!(s.for_rent, 2);
        assert_eq!(s.for_sale, 1);
        assert_eq!(s.average_rent, 600);
        assert_eq!(s.min_rent, 550);
        assert_eq!(s.max_sale_price, 285000);
        assert!(stats(&[]).is_none());
    }

    #[test]
    fn test_group_by_neighborhood() {
        let groups = group_by_neighborhood(&sample());
        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups["University Area"]), vec!["1", "3"]);
    }

    #[test]
    fn test_spotlights_only_gold_and_silver() {
        let mut members = Vec::new();
        for (id, tier) in [("1", "Gold"), ("2", "Member"), ("3", "Silver"), ("4", "gold")] {
            let mut m = Listing::new(id);
            m.tier = Some(tier.to_string());
            members.push(m);
        }
        let mut rng = StdRng::seed_from_u64(7);

        let picked = spotlights(&members, 5, &mut rng);
        let mut picked_ids = ids(&picked);
        picked_ids.sort();
        assert_eq!(picked_ids, vec!["1", "3", "4"]);

        assert_eq!(spotlights(&members, 2, &mut rng).len(), 2);
    }
}
