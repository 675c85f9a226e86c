// src/tests/router_tests/listings_tests.rs

use crate::tests::utils::{body_string, get, test_state};

/// The page after the result count, so featured links don't affect ordering.
fn results(body: &str) -> &str {
    let start = body.find("results-count").unwrap();
    &body[start..]
}

#[test]
fn listings_page_renders_catalog() {
    let (_dir, state) = test_state();

    let resp = get(&state, "/");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Campus View Apartment"));
    assert!(body.contains("Showing 4 of 4 properties"));
    assert!(body.contains("$650/month"));
    assert!(body.contains("Welcome!"), "first visit greets the user");
    assert!(!body.contains("sample listings"), "live data is not the fallback");
}

#[test]
fn filters_and_sort_come_from_query() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/?type=rent&maxPrice=1000&sort=price-high"));
    assert!(body.contains("Showing 2 of 4 properties"));

    let results = results(&body);
    let campus = results.find("Campus View Apartment").unwrap();
    let studio = results.find("Studio Near Campus").unwrap();
    assert!(campus < studio, "price-high puts $650 before $450");
    assert!(!results.contains("Family Home"));
}

#[test]
fn sort_preference_is_remembered() {
    let (_dir, state) = test_state();

    get(&state, "/?sort=bedrooms");
    assert_eq!(state.storage.preferences().sort_by, "bedrooms");

    let body = body_string(get(&state, "/"));
    let results = results(&body);
    let big = results.find("Big House Share").unwrap();
    let studio = results.find("Studio Near Campus").unwrap();
    assert!(big < studio);
}

#[test]
fn searches_are_recorded() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/?q=STUDIO"));
    assert!(body.contains("Showing 1 of 4 properties"));

    let history = state.storage.search_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].term, "STUDIO");

    get(&state, "/");
    assert_eq!(state.storage.search_history().len(), 1, "blank searches are not recorded");
}

#[test]
fn invalid_params_are_ignored() {
    let (_dir, state) = test_state();

    let resp = get(&state, "/?minPrice=cheap&sort=sideways&bedrooms=");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Showing 4 of 4 properties"));
}

#[test]
fn unreachable_catalog_shows_fallback_notice() {
    let (_dir, mut state) = test_state();
    state.loader = crate::loader::ListingLoader::new(crate::loader::LoaderSettings {
        data_url: "http://127.0.0.1:9/properties.json".to_string(),
        ..Default::default()
    })
    .unwrap();

    let body = body_string(get(&state, "/"));
    assert!(body.contains("sample listings"));
    assert!(body.contains("Showing 15 of 15 properties"));
}

#[test]
fn unknown_route_is_404() {
    let (_dir, state) = test_state();
    let resp = get(&state, "/nope");
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}
