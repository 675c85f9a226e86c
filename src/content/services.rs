// src/content/services.rs

use crate::storage::ServiceInteraction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const POPULAR_LIMIT: usize = 5;

/// A local business on the resources page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

#[derive(Debug)]
pub struct ServiceGroup<'a> {
    pub category: &'a str,
    pub services: Vec<&'a Service>,
}

impl ServiceGroup<'_> {
    pub fn label(&self) -> String {
        category_label(self.category)
    }
}

/// Services grouped by category, categories in order of first appearance.
pub fn group_by_category(services: &[Service]) -> Vec<ServiceGroup<'_>> {
    let mut groups: Vec<ServiceGroup> = Vec::new();
    for service in services {
        match groups.iter_mut().find(|g| g.category == service.category) {
            Some(group) => group.services.push(service),
            None => groups.push(ServiceGroup {
                category: &service.category,
                services: vec![service],
            }),
        }
    }
    groups
}

pub fn category_label(category: &str) -> String {
    let known = match category {
        "real-estate" => "Real Estate Agents",
        "mortgage" => "Mortgage Lenders",
        "moving" => "Moving Services",
        "utilities" => "Utilities",
        "insurance" => "Insurance",
        "legal" => "Legal Services",
        "home-services" => "Home Services",
        "storage" => "Storage Facilities",
        _ => "",
    };
    if !known.is_empty() {
        return known.to_string();
    }

    category
        .split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Most-viewed services first. Ties keep the order in which services were
/// first viewed; ids no longer in the directory are skipped.
pub fn popular_services<'a>(
    services: &'a [Service],
    interactions: &[ServiceInteraction],
    limit: usize,
) -> Vec<&'a Service> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for interaction in interactions {
        let id = interaction.service_id.as_str();
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            first_seen.push(id);
        }
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = first_seen.into_iter().map(|id| (id, counts[id])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .filter_map(|(id, _)| services.iter().find(|s| s.id == id))
        .take(limit)
        .collect()
}
