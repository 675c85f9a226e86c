use crate::tests::utils::{body_string, get, test_state};
use serde_json::Value;

#[test]
fn api_returns_derived_view() {
    let (_dir, state) = test_state();

    let resp = get(&state, "/api/listings?neighborhood=university%20area&sort=price-low");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json["source"], "primary");
    assert_eq!(json["count"], 2);
    assert_eq!(json["total"], 4);
    assert_eq!(json["listings"][0]["id"], "3");
    assert_eq!(json["listings"][1]["id"], "1");
    assert_eq!(json["stats"]["forRent"], 3);
}

#[test]
fn calculator_page_computes_results() {
    let (_dir, state) = test_state();

    let body = body_string(get(
        &state,
        "/calculator?homePrice=300000&downPayment=60000&interestRate=6.5&loanTerm=30",
    ));
    assert!(body.contains("Loan amount: $240,000"));
    assert!(body.contains("Down payment: 20.0%"));

    let body = body_string(get(&state, "/calculator?income=4000&debts=500"));
    assert!(body.contains("Maximum rent: <strong>$1,200</strong>"));

    let body = body_string(get(&state, "/calculator?homePrice=100&downPayment=500"));
    assert!(body.contains("down payment cannot exceed the home price"));
}

#[test]
fn stylesheet_is_served() {
    let (_dir, state) = test_state();
    let resp = get(&state, "/static/main.css");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains(".modal-backdrop"));
}

#[test]
fn calculator_rejects_absurd_loan_term() {
    let (_dir, state) = test_state();

    let resp = get(
        &state,
        "/calculator?homePrice=200000&downPayment=0&interestRate=6&loanTerm=400000000",
    );
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("loan term must be between 1 and 50 years"));
}
