use crate::tests::utils::{body_string, get, location, post, test_state, test_state_with};

#[test]
fn detail_page_shows_listing_and_records_view() {
    let (_dir, state) = test_state();

    let resp = get(&state, "/listings/1");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Campus View Apartment"));
    assert!(body.contains("Similar properties"));
    assert!(body.contains("tel:(208) 555-0101"));
    assert!(body.contains(r#"id="listing-details""#), "contact dialog markup");
    assert!(body.contains(r#"id="details-close""#));

    assert_eq!(state.storage.recently_viewed_ids(5), vec!["1"]);
}

#[test]
fn sale_listing_has_mortgage_estimate() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/listings/2"));
    assert!(body.contains("Estimated monthly cost"));
    assert!(body.contains("$1,441"), "P&I on $228,000 at 6.5% over 30 years");
}

#[test]
fn income_adds_affordability() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/listings/3?income=3000"));
    assert!(body.contains("within your budget of $900"));
}

#[test]
fn unknown_listing_is_404() {
    let (_dir, state) = test_state();
    assert_eq!(get(&state, "/listings/999").status(), 404);
    assert_eq!(get(&state, "/listings/").status(), 404);
}

#[test]
fn listing_ids_travel_percent_encoded() {
    let (_dir, state) = test_state_with(
        r#"{ "properties": [
            { "id": "unit 4/b", "title": "Garden Unit", "type": "rent", "price": 700, "bedrooms": 2 }
        ] }"#,
    );

    let body = body_string(get(&state, "/"));
    assert!(body.contains(r#"href="/listings/unit%204%2Fb""#));
    assert!(body.contains(r#"action="/favorites/unit%204%2Fb?next="#));

    let resp = get(&state, "/listings/unit%204%2Fb");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Garden Unit"));

    let resp = post(&state, "/favorites/unit%204%2Fb");
    assert_eq!(location(&resp), "/listings/unit%204%2Fb");
    assert!(state.storage.is_favorite("unit 4/b"));

    assert_eq!(get(&state, "/listings/unit%204").status(), 404);
}
