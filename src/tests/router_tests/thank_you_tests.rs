use crate::tests::utils::{body_string, get, test_state};

#[test]
fn submission_is_echoed_and_stored() {
    let (_dir, state) = test_state();

    let body = body_string(get(
        &state,
        "/thankyou?firstName=Ada&lastName=Lovelace&email=ada%40example.com&phone=2085550101",
    ));
    assert!(body.contains("Thank you, Ada Lovelace!"));
    assert!(body.contains("(208) 555-0101"));
    assert!(body.contains("mailto:ada@example.com"));

    let stored = state.storage.latest_submission().unwrap();
    assert_eq!(stored.get("firstName"), Some("Ada"));
}

#[test]
fn empty_request_shows_latest_submission() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/thankyou"));
    assert!(body.contains("Nothing submitted yet"));

    get(&state, "/thankyou?firstName=Grace&email=grace%40example.com");
    let body = body_string(get(&state, "/thankyou"));
    assert!(body.contains("Thank you, Grace!"));
    assert!(body.contains("most recent submission"));
}

#[test]
fn invalid_submission_lists_errors_and_is_not_stored() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/thankyou?firstName=&email=not-an-email"));
    assert!(body.contains("Please check your details"));
    assert!(body.contains("This field is required."));
    assert!(body.contains("Please enter a valid email address."));
    assert!(state.storage.latest_submission().is_none());
}
