use crate::domain::finance::{FinanceError, MortgageBreakdown, RentAffordability};
use crate::domain::listing::format_dollars;
use crate::templates::site_layout;
use maud::{html, Markup};
use std::collections::HashMap;

/// Raw form inputs echoed back into the fields, plus any results.
pub struct CalculatorVm<'a> {
    pub inputs: &'a HashMap<String, String>,
    pub mortgage: Option<Result<MortgageBreakdown, FinanceError>>,
    pub rent: Option<Result<RentAffordability, FinanceError>>,
}

pub fn calculator_page(vm: &CalculatorVm) -> Markup {
    let input = |name: &str| vm.inputs.get(name).cloned().unwrap_or_default();

    site_layout(
        "Calculators",
        html! {
            h1 { "Housing calculators" }

            section class="card" {
                h2 { "Mortgage" }
                form method="get" action="/calculator" {
                    label { "Home price " input type="number" name="homePrice" min="0" value=(input("homePrice")); }
                    label { "Down payment " input type="number" name="downPayment" min="0" value=(input("downPayment")); }
                    label { "Interest rate (%) " input type="number" name="interestRate" step="0.01" value=(input("interestRate")); }
                    label { "Loan term (years) " input type="number" name="loanTerm" min="1" max="50" value=(input("loanTerm")); }
                    button type="submit" { "Calculate" }
                }
                @match &vm.mortgage {
                    Some(Ok(m)) => {
                        ul class="results" {
                            li { "Loan amount: " (format_dollars(m.loan_amount)) }
                            li { "Monthly payment: " strong { (format_dollars(m.monthly_payment)) } }
                            li { "With tax and insurance: " (format_dollars(m.total_monthly_payment)) }
                            li { "Total interest: " (format_dollars(m.total_interest)) }
                            li { "Down payment: " (format!("{:.1}", m.down_payment_percent)) "%" }
                        }
                    }
                    Some(Err(e)) => { p class="field-error" { (e.to_string()) } }
                    None => {}
                }
            }

            section class="card" {
                h2 { "Rent affordability" }
                form method="get" action="/calculator" {
                    label { "Monthly income " input type="number" name="income" min="0" value=(input("income")); }
                    label { "Monthly debts " input type="number" name="debts" min="0" value=(input("debts")); }
                    label { "Rent share (%) " input type="number" name="rentPercent" min="1" max="100" value=(input("rentPercent")); }
                    button type="submit" { "Calculate" }
                }
                @match &vm.rent {
                    Some(Ok(r)) => {
                        p { "Maximum rent: " strong { (format_dollars(r.max_rent)) } }
                        p { "Recommended: " (format_dollars(r.recommended_max_rent)) }
                        ul class="results" {
                            @for s in &r.scenarios {
                                li { (s.name) ": " (format_dollars(s.rent)) }
                            }
                        }
                    }
                    Some(Err(e)) => { p class="field-error" { (e.to_string()) } }
                    None => {}
                }
            }
        },
    )
}
