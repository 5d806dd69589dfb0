use serde::Serialize;

use super::error::{FinanceError, FinanceResult, ensure_in_range};
use super::expenses::ExpenseBook;
use super::format::round_ft;
use super::reference::{
    District, HOME_SIZE_RANGE, LOAN_AMOUNT_RANGE, LOAN_YEARS_RANGE, MARKET_LOAN_RATE,
    SUPPORTED_LOAN_MAX, SUPPORTED_LOAN_RATE,
};

const MODERATE_RATIO: f64 = 0.30;
const CRITICAL_RATIO: f64 = 0.50;

/// Fixed monthly instalment amortizing `amount` over `years`.
pub fn annuity_payment(amount: f64, annual_rate: f64, years: u32) -> FinanceResult<i64> {
    if years == 0 {
        return Err(FinanceError::invalid("loanYears", "> 0"));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(FinanceError::invalid("loanAmount", ">= 0"));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(FinanceError::invalid("loanRate", ">= 0"));
    }

    let n = f64::from(years * 12);
    let r = annual_rate / 12.0;
    if r == 0.0 {
        return Ok(round_ft(amount / n));
    }
    let growth = (1.0 + r).powf(n);
    Ok(round_ft(amount * (r * growth) / (growth - 1.0)))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanWarning {
    None,
    Moderate,
    Critical,
}

impl LoanWarning {
    fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            None => LoanWarning::Critical,
            Some(r) if r > CRITICAL_RATIO => LoanWarning::Critical,
            Some(r) if r > MODERATE_RATIO => LoanWarning::Moderate,
            Some(_) => LoanWarning::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub amount: i64,
    pub years: u32,
    pub supported_amount: i64,
    pub market_amount: i64,
    pub supported_payment: i64,
    pub market_payment: i64,
    pub monthly_payment: i64,
    /// Instalment if the whole amount were borrowed at the market rate.
    pub market_only_payment: i64,
    pub is_split: bool,
    pub total_repaid: i64,
    pub market_only_total_repaid: i64,
    pub market_only_extra_cost: i64,
    pub payment_ratio: Option<f64>,
    pub warning: LoanWarning,
}

impl LoanQuote {
    pub fn new(amount: f64, years: u32, net_income: f64) -> FinanceResult<Self> {
        let amount = ensure_in_range(
            "loanAmount",
            amount,
            LOAN_AMOUNT_RANGE.0,
            LOAN_AMOUNT_RANGE.1,
        )?;
        if !(LOAN_YEARS_RANGE.0..=LOAN_YEARS_RANGE.1).contains(&years) {
            return Err(FinanceError::invalid(
                "loanYears",
                format!("between {} and {}", LOAN_YEARS_RANGE.0, LOAN_YEARS_RANGE.1),
            ));
        }

        let supported_amount = amount.min(SUPPORTED_LOAN_MAX);
        let market_amount = (amount - SUPPORTED_LOAN_MAX).max(0.0);
        let supported_payment = annuity_payment(supported_amount, SUPPORTED_LOAN_RATE, years)?;
        let market_payment = if market_amount > 0.0 {
            annuity_payment(market_amount, MARKET_LOAN_RATE, years)?
        } else {
            0
        };
        let monthly_payment = supported_payment + market_payment;
        let market_only_payment = annuity_payment(amount, MARKET_LOAN_RATE, years)?;

        let months = i64::from(years) * 12;
        let total_repaid = monthly_payment * months;
        let market_only_total_repaid = market_only_payment * months;

        let payment_ratio = (net_income > 0.0).then(|| monthly_payment as f64 / net_income);

        Ok(Self {
            amount: round_ft(amount),
            years,
            supported_amount: round_ft(supported_amount),
            market_amount: round_ft(market_amount),
            supported_payment,
            market_payment,
            monthly_payment,
            market_only_payment,
            is_split: amount > SUPPORTED_LOAN_MAX,
            total_repaid,
            market_only_total_repaid,
            market_only_extra_cost: market_only_total_repaid - total_repaid,
            payment_ratio,
            warning: LoanWarning::from_ratio(payment_ratio),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictEstimate {
    pub district_id: &'static str,
    pub district_name: &'static str,
    pub home_size: f64,
    pub price_sqm: f64,
    pub rent_sqm: f64,
    pub price: i64,
    pub rent: i64,
}

impl DistrictEstimate {
    pub fn new(district: &'static District, home_size: f64) -> FinanceResult<Self> {
        let home_size = ensure_in_range("homeSize", home_size, HOME_SIZE_RANGE.0, HOME_SIZE_RANGE.1)?;
        Ok(Self {
            district_id: district.id,
            district_name: district.name,
            home_size,
            price_sqm: district.price_sqm,
            rent_sqm: district.rent_sqm,
            price: round_ft(district.price_sqm * home_size),
            rent: round_ft(district.rent_sqm * home_size),
        })
    }
}

/// Appends a housing cost (rent or instalment) to the budget and returns the
/// confirmation shown to the student.
pub fn add_housing_cost_to_expenses(
    book: &mut ExpenseBook,
    name: &str,
    amount: f64,
) -> FinanceResult<String> {
    book.add(name, amount)?;
    let feedback = book.language().translations().added_feedback;
    Ok(format!("\"{}\" {feedback}", name.trim()))
}
