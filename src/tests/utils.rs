use crate::config::AppConfig;
use crate::content::Catalog;
use crate::loader::{ListingLoader, LoaderSettings};
use crate::router::handle;
use crate::state::AppState;
use crate::storage::NamespacedStorage;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use tempfile::TempDir;

pub const FIXTURE: &str = r#"{
  "properties": [
    { "id": "1", "title": "Campus View Apartment", "type": "rent", "price": "650", "bedrooms": 2,
      "bathrooms": 1, "sqft": "800", "neighborhood": "University Area", "distanceToCampus": "0.3 miles",
      "amenities": ["Parking", "Laundry"], "contact": { "phone": "(208) 555-0101", "email": "rent@example.com" } },
    { "id": "2", "title": "Family Home", "type": "buy", "price": 285000, "bedrooms": 3,
      "bathrooms": 2, "sqft": 1200, "neighborhood": "Family District", "amenities": ["Garage"] },
    { "id": "3", "title": "Studio Near Campus", "type": "rent", "price": 450, "bedrooms": 1,
      "neighborhood": "University Area", "amenities": ["Parking", "Furnished"] },
    { "id": "4", "title": "Big House Share", "type": "rent", "price": 1100, "bedrooms": 4,
      "neighborhood": "Countryside", "amenities": ["Yard"] }
  ]
}"#;

/// App state over a temp-file catalog, in-memory storage and no weather.
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn test_state() -> (TempDir, AppState) {
    test_state_with(FIXTURE)
}

pub fn test_state_with(catalog: &str) -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("properties.json");
    std::fs::write(&path, catalog).unwrap();

    let config = AppConfig {
        data_url: path.display().to_string(),
        weather_enabled: false,
        ..AppConfig::default()
    };

    let state = AppState {
        loader: ListingLoader::new(LoaderSettings::from(&config)).unwrap(),
        storage: NamespacedStorage::in_memory("test_"),
        content: Catalog::embedded().unwrap(),
        weather: None,
        config,
    };

    (dir, state)
}

pub fn send(state: &AppState, method: Method, uri: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => crate::responses::html_error_response(err),
    }
}

pub fn get(state: &AppState, uri: &str) -> Response {
    send(state, Method::GET, uri)
}

pub fn post(state: &AppState, uri: &str) -> Response {
    send(state, Method::POST, uri)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers().get("Location").unwrap().to_str().unwrap()
}
