use crate::tests::utils::{body_string, get, test_state};

const VALID_JOIN: &str = "/thankyou?form=join&firstName=Ada&lastName=Lovelace&email=ada%40example.com\
&phone=2085550101&businessName=Analytical+Engines&membershipLevel=gold&timestamp=2024-03-01T12%3A00%3A00Z";

#[test]
fn join_form_renders_fields_and_submits_to_thank_you() {
    let (_dir, state) = test_state();

    let resp = get(&state, "/join");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains(r#"action="/thankyou""#));
    assert!(body.contains(r#"name="form" value="join""#));
    assert!(body.contains(r#"type="hidden" name="timestamp""#));
    assert!(body.contains("Gold Membership"));
    assert!(body.contains(r#"formaction="/join""#));
    assert!(!body.contains("field-error"));
}

#[test]
fn draft_is_saved_and_prefills_the_form() {
    let (_dir, state) = test_state();

    let body = body_string(get(
        &state,
        "/join?form=join&firstName=Ada&businessName=Analytical+Engines&timestamp=x&save=draft",
    ));
    assert!(body.contains("Draft saved"));

    let draft = state.storage.form_draft("join").unwrap();
    assert_eq!(draft.fields.len(), 2);
    assert_eq!(draft.fields.get("firstName").map(String::as_str), Some("Ada"));

    let body = body_string(get(&state, "/join"));
    assert!(body.contains("Restored your draft"));
    assert!(body.contains(r#"name="firstName" value="Ada""#));
    assert!(body.contains(r#"name="businessName" value="Analytical Engines""#));
}

#[test]
fn listing_draft_restores_select_choice() {
    let (_dir, state) = test_state();

    get(&state, "/list-property?ownerName=Sam&listingType=sale&save=draft");
    let body = body_string(get(&state, "/list-property"));

    assert!(body.contains(r#"value="sale" selected"#));
    assert!(!body.contains(r#"value="rent" selected"#));
    assert!(body.contains(r#"name="ownerName" value="Sam""#));
    assert!(state.storage.form_draft("join").is_none());
}

#[test]
fn invalid_form_submission_shows_inline_errors() {
    let (_dir, state) = test_state();

    let body = body_string(get(
        &state,
        "/thankyou?form=join&firstName=Ada&email=not-an-email&membershipLevel=silver",
    ));

    assert!(body.contains(r#"action="/thankyou""#), "the form is shown again");
    assert!(body.contains(r#"id="lastName-error""#));
    assert!(body.contains(r#"aria-describedby="email-error""#));
    assert!(body.contains("Please enter a valid email address."));
    assert!(body.contains(r#"name="firstName" value="Ada""#));
    assert!(body.contains(r#"value="silver" selected"#));
    assert!(!body.contains("Thank you, Ada"));

    assert!(state.storage.latest_submission().is_none());
    let draft = state.storage.form_draft("join").unwrap();
    assert_eq!(draft.fields.get("email").map(String::as_str), Some("not-an-email"));
}

#[test]
fn valid_form_submission_clears_the_draft() {
    let (_dir, state) = test_state();

    get(&state, "/join?firstName=Ada&save=draft");
    assert!(state.storage.form_draft("join").is_some());

    let body = body_string(get(&state, VALID_JOIN));
    assert!(body.contains("Thank you, Ada Lovelace!"));
    assert!(body.contains("Gold Membership"));

    assert!(state.storage.form_draft("join").is_none());
    let stored = state.storage.latest_submission().unwrap();
    assert_eq!(stored.form_id.as_deref(), Some("join"));

    let body = body_string(get(&state, "/join"));
    assert!(!body.contains("Restored your draft"));
}
