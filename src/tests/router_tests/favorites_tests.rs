use crate::tests::utils::{body_string, get, location, post, test_state};

#[test]
fn favorite_toggle_redirects_and_persists() {
    let (_dir, state) = test_state();

    let resp = post(&state, "/favorites/3?next=%2F%3Ftype%3Drent");
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/?type=rent");
    assert!(state.storage.is_favorite("3"));

    let body = body_string(get(&state, "/favorites"));
    assert!(body.contains("Studio Near Campus"));
    assert!(!body.contains("Campus View Apartment"));

    post(&state, "/favorites/3");
    assert!(!state.storage.is_favorite("3"));
    assert!(body_string(get(&state, "/favorites")).contains("haven't saved any properties"));
}

#[test]
fn offsite_redirect_targets_are_ignored() {
    let (_dir, state) = test_state();

    let resp = post(&state, "/favorites/1?next=%2F%2Fevil.example.com");
    assert_eq!(location(&resp), "/listings/1");
}

#[test]
fn unknown_listing_cannot_be_favorited() {
    let (_dir, state) = test_state();

    assert_eq!(post(&state, "/favorites/999").status(), 404);
    assert!(state.storage.favorites().is_empty());
}

#[test]
fn get_on_favorite_toggle_is_not_routed() {
    let (_dir, state) = test_state();
    assert_eq!(get(&state, "/favorites/1").status(), 404);
}
