use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{FinanceError, FinanceResult, ensure_in_range, ensure_non_negative};
use super::format::{format_ft, round_ft};
use super::i18n::Language;
use super::inflation::purchasing_power;
use super::reference::{INVEST_YEARS_RANGE, SCENARIOS, Scenario, ScenarioId};

const MONTHS_PER_YEAR: f64 = 12.0;
/// Share of the monthly net income a bank would accept as an instalment.
const MAX_LOAN_INCOME_SHARE: f64 = 0.5;
const DISASTER_MIN_COST: f64 = 50_000.0;
const DISASTER_COST_SPREAD: f64 = 300_000.0;
const BANKRUPTCY_LIMIT: f64 = -500_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    pub year: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentPlan {
    pub initial_savings: f64,
    pub monthly_savings: f64,
    pub years: u32,
    pub inflation_rate: f64,
    pub net_income: f64,
    pub disasters: Vec<Disaster>,
}

impl InvestmentPlan {
    pub fn validate(&self) -> FinanceResult<()> {
        if !self.initial_savings.is_finite() {
            return Err(FinanceError::invalid("initialSavings", "a finite number"));
        }
        ensure_non_negative("monthlySavings", self.monthly_savings)?;
        if !(INVEST_YEARS_RANGE.0..=INVEST_YEARS_RANGE.1).contains(&self.years) {
            return Err(FinanceError::invalid(
                "investYears",
                format!(
                    "between {} and {}",
                    INVEST_YEARS_RANGE.0, INVEST_YEARS_RANGE.1
                ),
            ));
        }
        ensure_in_range("inflationRate", self.inflation_rate, 0.0, 1.0)?;
        for disaster in &self.disasters {
            ensure_non_negative("disasters.cost", disaster.cost)?;
        }
        Ok(())
    }

    fn losses_in_year(&self, year: u32) -> f64 {
        self.disasters
            .iter()
            .filter(|d| d.year == year)
            .map(|d| d.cost)
            .sum()
    }

    /// Largest shortfall that one year of instalments could still cover.
    fn borrowing_capacity(&self) -> f64 {
        self.net_income.max(0.0) * MAX_LOAN_INCOME_SHARE * MONTHS_PER_YEAR
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Solvency {
    Solvent,
    Borrowing,
    Insolvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: i64,
    pub invested: i64,
    pub real_value: i64,
    pub solvency: Solvency,
}

pub fn project(plan: &InvestmentPlan, annual_rate: f64) -> Vec<ProjectionPoint> {
    let yearly_contribution = plan.monthly_savings * MONTHS_PER_YEAR;
    let capacity = plan.borrowing_capacity();
    let mut value = plan.initial_savings;
    let mut invested = plan.initial_savings;
    let mut points = Vec::with_capacity(plan.years as usize + 1);

    for year in 0..=plan.years {
        if year > 0 {
            value = value * (1.0 + annual_rate) + yearly_contribution;
            invested += yearly_contribution;
        }
        value -= plan.losses_in_year(year);

        let solvency = if value >= 0.0 {
            Solvency::Solvent
        } else if -value <= capacity {
            Solvency::Borrowing
        } else {
            Solvency::Insolvent
        };

        points.push(ProjectionPoint {
            year,
            value: round_ft(value),
            invested: round_ft(invested),
            real_value: round_ft(purchasing_power(value, plan.inflation_rate, year)),
            solvency,
        });
    }
    points
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub id: ScenarioId,
    pub name: &'static str,
    pub annual_rate: f64,
    pub color: &'static str,
    pub points: Vec<ProjectionPoint>,
}

pub fn project_scenarios(
    plan: &InvestmentPlan,
    lang: Language,
) -> FinanceResult<Vec<ScenarioProjection>> {
    plan.validate()?;
    let t = lang.translations();
    Ok(SCENARIOS
        .iter()
        .map(|scenario: &Scenario| ScenarioProjection {
            id: scenario.id,
            name: t.scenario_name(scenario.id),
            annual_rate: scenario.annual_rate,
            color: scenario.color,
            points: project(plan, scenario.annual_rate),
        })
        .collect())
}

/// One chart row per year, keyed by scenario name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub year: u32,
    #[serde(flatten)]
    pub values: BTreeMap<&'static str, i64>,
}

pub fn merge_chart(projections: &[ScenarioProjection]) -> Vec<ChartRow> {
    let years = projections.first().map_or(0, |p| p.points.len());
    (0..years)
        .map(|idx| ChartRow {
            year: idx as u32,
            values: projections
                .iter()
                .map(|p| (p.name, p.points[idx].value))
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterOutcome {
    pub event: &'static str,
    pub cost: i64,
    pub message: String,
    pub initial_savings: i64,
    pub bankrupt: bool,
}

/// Starting savings hit by random disasters on the investment tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsAccount {
    pub initial_savings: f64,
    pub bankrupt: bool,
}

impl SavingsAccount {
    pub fn new(initial_savings: f64) -> Self {
        Self {
            initial_savings,
            bankrupt: false,
        }
    }

    pub fn roll_disaster<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        lang: Language,
    ) -> FinanceResult<DisasterOutcome> {
        if self.bankrupt {
            return Err(FinanceError::Bankrupt);
        }

        let events = lang.translations().disaster_events;
        let event = events.choose(rng).copied().unwrap_or_default();
        let cost = round_ft(rng.gen_range(0.0..1.0) * DISASTER_COST_SPREAD) + DISASTER_MIN_COST as i64;

        self.initial_savings -= cost as f64;
        if self.initial_savings < BANKRUPTCY_LIMIT {
            self.bankrupt = true;
        }

        info!(
            target: "investment",
            event,
            cost,
            savings = self.initial_savings,
            bankrupt = self.bankrupt,
            "Disaster rolled"
        );

        Ok(DisasterOutcome {
            event,
            cost,
            message: format!("{event}: -{}", format_ft(cost as f64)),
            initial_savings: round_ft(self.initial_savings),
            bankrupt: self.bankrupt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_plan() -> InvestmentPlan {
        InvestmentPlan {
            initial_savings: 100_000.0,
            monthly_savings: 10_000.0,
            years: 3,
            inflation_rate: 0.045,
            net_income: 266_000.0,
            disasters: Vec::new(),
        }
    }

    #[test]
    fn pillow_scenario_only_accumulates_contributions() {
        let points = project(&sample_plan(), 0.0);
        let values = points.iter().map(|p| p.value).collect::<Vec<_>>();
        assert_eq!(values, vec![100_000, 220_000, 340_000, 460_000]);
        assert_eq!(points[3].invested, 460_000);
        assert!(points.iter().all(|p| p.solvency == Solvency::Solvent));
    }

    #[test]
    fn bond_scenario_compounds_before_adding_contribution() {
        let points = project(&sample_plan(), 0.07);
        // 100000*1.07 + 120000
        assert_eq!(points[1].value, 227_000);
        // 227000*1.07 + 120000
        assert_eq!(points[2].value, 362_890);
    }

    #[test]
    fn real_value_discounts_by_inflation() {
        let points = project(&sample_plan(), 0.0);
        // 220000 / 1.045
        assert_eq!(points[1].real_value, 210_526);
        assert_eq!(points[0].real_value, points[0].value);
    }

    #[test]
    fn disasters_are_subtracted_in_their_year() {
        let mut plan = sample_plan();
        plan.disasters = vec![
            Disaster { year: 0, cost: 50_000.0 },
            Disaster { year: 2, cost: 30_000.0 },
            Disaster { year: 2, cost: 10_000.0 },
        ];
        let values = project(&plan, 0.0)
            .iter()
            .map(|p| p.value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![50_000, 170_000, 250_000, 370_000]);
    }

    #[test]
    fn negative_balance_is_borrowing_until_capacity_exceeded() {
        let mut plan = sample_plan();
        plan.monthly_savings = 0.0;
        plan.initial_savings = -1_000_000.0;
        // capacity = 266000 * 0.5 * 12 = 1_596_000
        assert_eq!(project(&plan, 0.0)[0].solvency, Solvency::Borrowing);

        plan.initial_savings = -2_000_000.0;
        assert_eq!(project(&plan, 0.0)[0].solvency, Solvency::Insolvent);
    }

    #[test]
    fn scenarios_are_translated_and_merged_by_year() {
        let projections = project_scenarios(&sample_plan(), Language::En).expect("valid plan");
        assert_eq!(projections.len(), 3);
        assert_eq!(projections[1].name, "Government bond");

        let chart = merge_chart(&projections);
        assert_eq!(chart.len(), 4);
        assert_eq!(chart[1].values["Under the pillow"], 220_000);
        assert_eq!(chart[1].values["Government bond"], 227_000);

        let json = serde_json::to_value(&chart[1]).expect("serialize");
        assert_eq!(json["year"], 1);
        assert_eq!(json["S&P 500"], projections[2].points[1].value);
    }

    #[test]
    fn plan_validation_rejects_horizon_outside_slider() {
        let mut plan = sample_plan();
        plan.years = 0;
        assert!(project_scenarios(&plan, Language::Hu).is_err());
        plan.years = 31;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn disaster_roll_costs_between_fifty_and_three_hundred_fifty_thousand() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut account = SavingsAccount::new(10_000_000.0);
        for _ in 0..50 {
            let outcome = account.roll_disaster(&mut rng, Language::Hu).expect("solvent");
            assert!((50_000..=350_000).contains(&outcome.cost));
            assert!(outcome.message.ends_with(" Ft"));
        }
    }

    #[test]
    fn disaster_message_groups_thousands_with_dots() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut account = SavingsAccount::new(1_000_000.0);
        let outcome = account.roll_disaster(&mut rng, Language::En).expect("solvent");
        let expected = format!("-{} Ft", format_ft_digits(outcome.cost));
        assert!(outcome.message.ends_with(&expected), "{}", outcome.message);
        assert!(!outcome.message.contains(','));
    }

    fn format_ft_digits(value: i64) -> String {
        let digits = value.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        grouped
    }

    #[test]
    fn account_goes_bankrupt_below_limit_and_refuses_more_rolls() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut account = SavingsAccount::new(-460_000.0);
        let outcome = account.roll_disaster(&mut rng, Language::En).expect("first roll");
        assert!(outcome.bankrupt);
        assert_eq!(
            account.roll_disaster(&mut rng, Language::En),
            Err(FinanceError::Bankrupt)
        );
    }

    proptest! {
        #[test]
        fn prop_same_seed_rolls_same_disaster(seed in any::<u64>()) {
            let mut a = SavingsAccount::new(0.0);
            let mut b = SavingsAccount::new(0.0);
            let first = a.roll_disaster(&mut ChaCha8Rng::seed_from_u64(seed), Language::De).expect("roll");
            let second = b.roll_disaster(&mut ChaCha8Rng::seed_from_u64(seed), Language::De).expect("roll");
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_higher_rate_never_lowers_final_value(
            initial in 0u32..5_000_000,
            monthly in 0u32..300_000,
            years in 1u32..=30
        ) {
            let plan = InvestmentPlan {
                initial_savings: initial as f64,
                monthly_savings: monthly as f64,
                years,
                inflation_rate: 0.045,
                net_income: 266_000.0,
                disasters: Vec::new(),
            };
            let pillow = project(&plan, 0.0);
            let sp500 = project(&plan, 0.1254);
            prop_assert!(sp500[years as usize].value >= pillow[years as usize].value);
            prop_assert_eq!(pillow[years as usize].invested, pillow[years as usize].value);
        }
    }
}
