// src/domain/finance.rs

use crate::domain::listing::Listing;
use serde::Serialize;
use thiserror::Error;

/// Rough annual rates for Idaho, used for the "total monthly" estimate.
const PROPERTY_TAX_RATE: f64 = 0.0069;
const INSURANCE_RATE: f64 = 0.003;

pub const MAX_LOAN_YEARS: u32 = 50;

#[derive(Debug, Error, PartialEq)]
pub enum FinanceError {
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("down payment cannot exceed the home price")]
    DownPaymentTooLarge,
    #[error("interest rate must be between 0 and 30 percent")]
    RateOutOfRange,
    #[error("rent percentage must be between 1 and 100")]
    PercentageOutOfRange,
    #[error("loan term must be between 1 and {} years", MAX_LOAN_YEARS)]
    TermOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageBreakdown {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub monthly_property_tax: f64,
    pub monthly_insurance: f64,
    pub total_monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub down_payment_percent: f64,
}

/// Amortised principal-and-interest payment per month.
pub fn monthly_payment(principal: f64, annual_rate: f64, years: u32) -> f64 {
    let payments = f64::from(years) * 12.0;
    let monthly_rate = annual_rate / 12.0;

    if monthly_rate == 0.0 {
        return principal / payments;
    }

    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-payments))
}

pub fn mortgage(
    home_price: f64,
    down_payment: f64,
    interest_rate_pct: f64,
    years: u32,
) -> Result<MortgageBreakdown, FinanceError> {
    if !(home_price > 0.0) {
        return Err(FinanceError::NotPositive("home price"));
    }
    if !(down_payment >= 0.0) {
        return Err(FinanceError::Negative("down payment"));
    }
    if down_payment > home_price {
        return Err(FinanceError::DownPaymentTooLarge);
    }
    if !(0.0..=30.0).contains(&interest_rate_pct) {
        return Err(FinanceError::RateOutOfRange);
    }
    if !(1..=MAX_LOAN_YEARS).contains(&years) {
        return Err(FinanceError::TermOutOfRange);
    }

    let loan_amount = home_price - down_payment;
    let payment = monthly_payment(loan_amount, interest_rate_pct / 100.0, years);
    let total_paid = payment * f64::from(years) * 12.0;
    let monthly_property_tax = home_price * PROPERTY_TAX_RATE / 12.0;
    let monthly_insurance = home_price * INSURANCE_RATE / 12.0;

    Ok(MortgageBreakdown {
        loan_amount,
        monthly_payment: payment,
        monthly_property_tax,
        monthly_insurance,
        total_monthly_payment: payment + monthly_property_tax + monthly_insurance,
        total_paid,
        total_interest: total_paid - loan_amount,
        down_payment_percent: down_payment / home_price * 100.0,
    })
}

/// 20% down, 6.5%, 30 years, rounded to whole dollars.
pub fn estimate_monthly_mortgage(price: f64) -> f64 {
    monthly_payment(price * 0.8, 0.065, 30).round()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentScenario {
    pub name: &'static str,
    pub rent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentAffordability {
    pub disposable_income: f64,
    pub max_rent: f64,
    pub recommended_max_rent: f64,
    pub scenarios: Vec<RentScenario>,
}

pub fn rent_affordability(
    monthly_income: f64,
    debt_payments: f64,
    rent_percentage: u32,
) -> Result<RentAffordability, FinanceError> {
    if !(monthly_income > 0.0) {
        return Err(FinanceError::NotPositive("monthly income"));
    }
    if !(debt_payments >= 0.0) {
        return Err(FinanceError::Negative("debt payments"));
    }
    if !(1..=100).contains(&rent_percentage) {
        return Err(FinanceError::PercentageOutOfRange);
    }

    let disposable_income = monthly_income - debt_payments;
    let max_rent = monthly_income * f64::from(rent_percentage) / 100.0;
    let share = |pct: f64| monthly_income * pct / 100.0;

    Ok(RentAffordability {
        disposable_income,
        max_rent,
        recommended_max_rent: max_rent.min(disposable_income * 0.3),
        scenarios: vec![
            RentScenario { name: "Conservative (25%)", rent: share(25.0) },
            RentScenario { name: "Recommended (30%)", rent: share(30.0) },
            RentScenario { name: "Maximum (35%)", rent: share(35.0) },
        ],
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    pub is_affordable: bool,
    pub monthly_payment: f64,
    pub max_affordable: f64,
    pub percentage_of_income: f64,
}

/// Monthly cost of a listing (rent, or estimated mortgage for a sale)
/// against income. `None` when the listing has no price or income is not
/// positive.
pub fn affordability(listing: &Listing, monthly_income: f64, max_percentage: f64) -> Option<Affordability> {
    let price = listing.price?;
    if !(monthly_income > 0.0) {
        return None;
    }

    let monthly_payment = if listing.is_rental() {
        price
    } else {
        estimate_monthly_mortgage(price)
    };
    let max_affordable = monthly_income * max_percentage / 100.0;

    Some(Affordability {
        is_affordable: monthly_payment <= max_affordable,
        monthly_payment,
        max_affordable,
        percentage_of_income: monthly_payment / monthly_income * 100.0,
    })
}
