use crate::tests::utils::{body_string, get, test_state};

#[test]
fn neighborhoods_show_cards_with_listing_counts() {
    let (_dir, state) = test_state();

    let resp = get(&state, "/neighborhoods");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert_eq!(body.matches("neighborhood-card").count(), 6);
    assert!(body.contains(r#"href="/?neighborhood=University+Area""#));
    assert!(body.contains("2 listings"));
    assert!(body.contains("1 listing<"));
    assert!(!body.contains(r#"role="dialog""#));
}

#[test]
fn neighborhood_filter_is_remembered() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/neighborhoods?filter=campus"));
    assert!(body.contains("Campus Area"));
    assert!(!body.contains("Pine District"));
    assert_eq!(state.storage.neighborhood_filter().as_deref(), Some("campus"));

    // No parameter and an unknown one both keep the remembered filter.
    for uri in ["/neighborhoods", "/neighborhoods?filter=luxury"] {
        let body = body_string(get(&state, uri));
        assert_eq!(body.matches("neighborhood-card").count(), 2, "{uri}");
    }

    let body = body_string(get(&state, "/neighborhoods?filter=all"));
    assert_eq!(body.matches("neighborhood-card").count(), 6);
}

#[test]
fn neighborhood_details_open_in_a_dialog() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/neighborhoods/pine-district"));
    assert!(body.contains(r#"role="dialog""#));
    assert!(!body.contains(r#"data-dialog="neighborhood-details" hidden"#));
    assert!(body.contains(r#"href="/neighborhoods#neighborhood-pine-district""#));
    assert!(body.contains("See listings in Pine District"));

    let viewed = state.storage.recently_viewed_ids(5);
    assert_eq!(viewed.first().map(String::as_str), Some("neighborhood_pine-district"));

    assert_eq!(get(&state, "/neighborhoods/nowhere").status(), 404);
}

#[test]
fn resources_group_services_and_rank_popular_ones() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/resources"));
    assert!(body.contains("Real Estate Agents"));
    assert!(body.contains("Legal Services"));
    assert!(body.contains("Frequently asked questions"));
    assert!(!body.contains("Popular with visitors"));

    let resp = get(&state, "/resources/rexburg-law");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Rexburg Law Offices"));

    let body = body_string(get(&state, "/resources"));
    let start = body.find("Popular with visitors").unwrap();
    let end = body.find("category-index").unwrap();
    let popular = &body[start..end];
    assert!(popular.contains(r#"href="/resources/rexburg-law""#));

    assert_eq!(get(&state, "/resources/unknown-shop").status(), 404);
}

#[test]
fn faq_opens_one_answer_and_counts_interactions() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/resources?faq=2"));
    assert!(body.contains(r#"class="faq-item open" id="faq-2""#));
    assert_eq!(body.matches("faq-item open").count(), 1);
    assert!(body.contains(r##"href="/resources#faq-2""##));
    assert_eq!(state.storage.counter("faqInteractions"), 1);

    get(&state, "/resources?faq=999");
    assert_eq!(state.storage.counter("faqInteractions"), 1);
}

#[test]
fn directory_spotlights_members_and_remembers_layout() {
    let (_dir, state) = test_state();

    let body = body_string(get(&state, "/directory"));
    assert!(body.contains(r#"class="members grid""#));
    assert!(body.contains("Member spotlights"));
    assert_eq!(body.matches(r#"class="card spotlight "#).count(), 3);
    assert!(!body.contains(r#"class="card spotlight member""#));

    let body = body_string(get(&state, "/directory?view=list"));
    assert!(body.contains(r#"class="members list""#));
    assert_eq!(body.matches("member-row").count(), 9);
    assert_eq!(state.storage.preferences().view_mode, "list");

    let body = body_string(get(&state, "/directory"));
    assert!(body.contains(r#"class="members list""#));
}

#[test]
fn courses_filter_by_subject_and_total_credits() {
    let (_dir, state) = test_state();

    assert!(body_string(get(&state, "/courses")).contains("Total Credits: 27"));
    assert!(body_string(get(&state, "/courses?subject=wdd")).contains("Total Credits: 13"));
    assert!(body_string(get(&state, "/courses?subject=CSE")).contains("Total Credits: 14"));
    assert!(body_string(get(&state, "/courses?subject=math")).contains("Total Credits: 27"));
}
