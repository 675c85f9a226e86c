// src/content/mod.rs
//
// Reference content compiled into the binary: neighborhood guides, the
// services directory and FAQ, chamber members and the course list.

pub mod courses;
pub mod faq;
pub mod members;
pub mod neighborhoods;
pub mod services;

use crate::domain::Listing;
use crate::loader::extract_listings;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use courses::{Course, Subject};
pub use faq::{Faq, FaqAccordion};
pub use members::DirectoryView;
pub use neighborhoods::Neighborhood;
pub use services::{Service, ServiceGroup};

const NEIGHBORHOODS: &str = include_str!("../../data/neighborhoods.json");
const SERVICES: &str = include_str!("../../data/services.json");
const FAQS: &str = include_str!("../../data/faqs.json");
const MEMBERS: &str = include_str!("../../data/members.json");
const COURSES: &str = include_str!("../../data/courses.json");

#[derive(Debug, Error)]
#[error("embedded {dataset} dataset is invalid: {message}")]
pub struct ContentError {
    pub dataset: &'static str,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub neighborhoods: Vec<Neighborhood>,
    pub services: Vec<Service>,
    pub faqs: Vec<Faq>,
    pub members: Vec<Listing>,
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, ContentError> {
        let members = {
            let document: Value = serde_json::from_str(MEMBERS).map_err(|e| invalid("members", e))?;
            extract_listings(&document, "members").map_err(|e| invalid("members", e))?
        };

        Ok(Self {
            neighborhoods: section(NEIGHBORHOODS, "neighborhoods")?,
            services: section(SERVICES, "services")?,
            faqs: section(FAQS, "faqs")?,
            members,
            courses: section(COURSES, "courses")?,
        })
    }

    pub fn neighborhood(&self, id: &str) -> Option<&Neighborhood> {
        self.neighborhoods.iter().find(|n| n.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}

fn invalid(dataset: &'static str, e: impl std::fmt::Display) -> ContentError {
    ContentError {
        dataset,
        message: e.to_string(),
    }
}

/// `document[key]` as a typed list. Unlike listings, every record must parse.
fn section<T: DeserializeOwned>(document: &str, key: &'static str) -> Result<Vec<T>, ContentError> {
    let mut value: Value = serde_json::from_str(document).map_err(|e| invalid(key, e))?;
    let items = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| invalid(key, format!("`{key}` array missing")))?;
    serde_json::from_value(items).map_err(|e| invalid(key, e))
}
