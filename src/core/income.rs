use serde::Serialize;

use super::error::{FinanceError, FinanceResult, ensure_in_range, ensure_non_negative};
use super::format::{parse_amount, round_ft};
use super::i18n::Language;
use super::reference::{
    AVG_GROSS, AVG_GROSS_BUDAPEST, MEDIAN_GROSS, MIN_WAGE_2025, QUINTILE_BANDS, TAX_SZJA,
    TAX_SZOCHO, TAX_TB,
};

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;
pub const HOURS_PER_WEEK_RANGE: (f64, f64) = (1.0, 80.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub gross: i64,
    pub szja: i64,
    pub tb: i64,
    pub net: i64,
    pub szocho: i64,
    pub employer_cost: i64,
}

impl TaxBreakdown {
    pub fn from_gross(gross: f64) -> FinanceResult<Self> {
        let gross = ensure_non_negative("grossIncome", gross)?;
        let szja = round_ft(gross * TAX_SZJA);
        let tb = round_ft(gross * TAX_TB);
        let net = round_ft(gross - szja as f64 - tb as f64);
        Ok(Self {
            gross: round_ft(gross),
            szja,
            tb,
            net,
            szocho: round_ft(gross * TAX_SZOCHO),
            employer_cost: round_ft(gross * (1.0 + TAX_SZOCHO)),
        })
    }

    pub fn total_employee_deductions(&self) -> i64 {
        self.szja + self.tb
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum WageMode {
    #[default]
    FromGross,
    FromHourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyWage {
    pub hours_per_week: f64,
    pub monthly_hours: f64,
    pub hourly_wage: i64,
    pub gross_monthly: i64,
}

pub fn monthly_work_hours(hours_per_week: f64) -> FinanceResult<f64> {
    let hours = ensure_in_range(
        "hoursPerWeek",
        hours_per_week,
        HOURS_PER_WEEK_RANGE.0,
        HOURS_PER_WEEK_RANGE.1,
    )?;
    Ok(hours * WEEKS_PER_YEAR / MONTHS_PER_YEAR)
}

pub fn hourly_from_gross(gross: f64, hours_per_week: f64) -> FinanceResult<HourlyWage> {
    let gross = ensure_non_negative("grossIncome", gross)?;
    let monthly_hours = monthly_work_hours(hours_per_week)?;
    Ok(HourlyWage {
        hours_per_week,
        monthly_hours,
        hourly_wage: round_ft(gross / monthly_hours),
        gross_monthly: round_ft(gross),
    })
}

pub fn gross_from_hourly(hourly_wage: f64, hours_per_week: f64) -> FinanceResult<HourlyWage> {
    let hourly_wage = ensure_non_negative("hourlyWage", hourly_wage)?;
    let monthly_hours = monthly_work_hours(hours_per_week)?;
    Ok(HourlyWage {
        hours_per_week,
        monthly_hours,
        hourly_wage: round_ft(hourly_wage),
        gross_monthly: round_ft(hourly_wage * monthly_hours),
    })
}

pub fn hourly_wage(
    mode: WageMode,
    gross: f64,
    hourly: f64,
    hours_per_week: f64,
) -> FinanceResult<HourlyWage> {
    match mode {
        WageMode::FromGross => hourly_from_gross(gross, hours_per_week),
        WageMode::FromHourly => gross_from_hourly(hourly, hours_per_week),
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerStatus {
    Missing,
    Correct,
    Incorrect,
}

impl AnswerStatus {
    fn grade(answer: &str, expected: i64) -> Self {
        if answer.trim().is_empty() {
            return AnswerStatus::Missing;
        }
        match parse_amount(answer) {
            Some(value) if value == expected => AnswerStatus::Correct,
            _ => AnswerStatus::Incorrect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCheck {
    pub szja: AnswerStatus,
    pub tb: AnswerStatus,
    /// The result card opens once both answers have been typed in.
    pub revealed: bool,
}

pub fn check_answers(breakdown: &TaxBreakdown, szja_answer: &str, tb_answer: &str) -> AnswerCheck {
    let szja = AnswerStatus::grade(szja_answer, breakdown.szja);
    let tb = AnswerStatus::grade(tb_answer, breakdown.tb);
    AnswerCheck {
        szja,
        tb,
        revealed: szja != AnswerStatus::Missing && tb != AnswerStatus::Missing,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuintileMatch {
    pub index: usize,
    pub label: &'static str,
    pub description: &'static str,
    pub range_lower: f64,
    /// `None` for the open-ended top band.
    pub range_upper: Option<f64>,
    pub gross_monthly: f64,
}

pub fn quintile_index(net: f64) -> usize {
    QUINTILE_BANDS
        .iter()
        .position(|band| net <= band.upper)
        .unwrap_or(QUINTILE_BANDS.len() - 1)
}

pub fn quintile_for(net: f64, lang: Language) -> QuintileMatch {
    let index = quintile_index(net);
    quintile_at(index, lang)
}

pub fn quintile_at(index: usize, lang: Language) -> QuintileMatch {
    let t = lang.translations();
    let band = QUINTILE_BANDS[index];
    QuintileMatch {
        index,
        label: t.quintile_labels[index],
        description: t.quintile_descs[index],
        range_lower: band.lower,
        range_upper: band.upper.is_finite().then_some(band.upper),
        gross_monthly: band.gross_monthly,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuintileGuess {
    pub guess: usize,
    pub actual: usize,
    pub correct: bool,
}

pub fn check_quintile_guess(guess: usize, net: f64) -> FinanceResult<QuintileGuess> {
    if guess >= QUINTILE_BANDS.len() {
        return Err(FinanceError::invalid("quintileGuess", "between 0 and 4"));
    }
    let actual = quintile_index(net);
    Ok(QuintileGuess {
        guess,
        actual,
        correct: guess == actual,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceComparison {
    pub min_wage_ratio: f64,
    pub median_ratio: f64,
    pub average_ratio: f64,
    pub budapest_average_ratio: f64,
}

pub fn compare_to_reference(gross: f64) -> ReferenceComparison {
    ReferenceComparison {
        min_wage_ratio: gross / MIN_WAGE_2025,
        median_ratio: gross / MEDIAN_GROSS,
        average_ratio: gross / AVG_GROSS,
        budapest_average_ratio: gross / AVG_GROSS_BUDAPEST,
    }
}
