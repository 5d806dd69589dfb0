//! Reference figures the calculators are built on: 2025 Hungarian income
//! statistics, tax rates, Budapest housing prices and loan rates.

use serde::Serialize;

use super::error::{FinanceError, FinanceResult};

pub const MIN_WAGE_2025: f64 = 290_800.0;
pub const AVG_GROSS: f64 = 704_400.0;
pub const AVG_GROSS_BUDAPEST: f64 = 835_457.0;
pub const MEDIAN_GROSS: f64 = 567_700.0;

pub const TAX_SZJA: f64 = 0.15;
pub const TAX_TB: f64 = 0.185;
pub const TAX_SZOCHO: f64 = 0.13;

pub const AVG_HOME_SIZE_SQM: f64 = 72.2;
pub const MARKET_LOAN_RATE: f64 = 0.0724;
pub const SUPPORTED_LOAN_RATE: f64 = 0.03;
pub const SUPPORTED_LOAN_MAX: f64 = 50_000_000.0;

pub const DEFAULT_GROSS: f64 = 400_000.0;
pub const DEFAULT_HOURS_PER_WEEK: f64 = 40.0;
pub const DEFAULT_LOAN_AMOUNT: f64 = 20_000_000.0;
pub const DEFAULT_LOAN_YEARS: u32 = 20;
pub const DEFAULT_HOME_SIZE_SQM: f64 = 72.0;
pub const DEFAULT_INFLATION_RATE: f64 = 0.045;
pub const DEFAULT_INVEST_YEARS: u32 = 10;

pub const LOAN_AMOUNT_RANGE: (f64, f64) = (1_000_000.0, 80_000_000.0);
pub const LOAN_YEARS_RANGE: (u32, u32) = (5, 35);
pub const HOME_SIZE_RANGE: (f64, f64) = (20.0, 150.0);
pub const INFLATION_RANGE: (f64, f64) = (0.01, 0.20);
pub const INVEST_YEARS_RANGE: (u32, u32) = (1, 30);

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    pub income: &'static str,
    pub quintiles: &'static str,
    pub quintiles_households: &'static str,
    pub rental_prices: &'static str,
    pub sale_prices: &'static str,
    pub home_size: &'static str,
    pub loan_rate: &'static str,
}

pub const SOURCES: Sources = Sources {
    income: "https://www.ksh.hu/gyorstajekoztatok/ker/ker2506.html",
    quintiles: "https://www.ksh.hu/stadat_files/jov/hu/jov0052.html",
    quintiles_households: "https://www.ksh.hu/stadat_files/jov/hu/jov0055.html",
    rental_prices: "https://negyzetmeterarak.hu/statisztika?ugylet=kiado&tipus=lakas",
    sale_prices: "https://negyzetmeterarak.hu/statisztika?ugylet=elado&tipus=lakas",
    home_size: "https://koltozzbe.hu/statisztikak/budapest/",
    loan_rate: "https://bankmonitor.hu/mediatar/cikk/mire-szamithatsz-2025-oktobereben-ha-most-vennel-fel-lakashitelt/",
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: &'static str,
    pub name: &'static str,
    pub price_sqm: f64,
    pub rent_sqm: f64,
}

const fn district(id: &'static str, name: &'static str, price_sqm: f64, rent_sqm: f64) -> District {
    District {
        id,
        name,
        price_sqm,
        rent_sqm,
    }
}

/// Median sale and rent prices per m² (negyzetmeterarak.hu, 2024).
pub const DISTRICTS: [District; 23] = [
    district("I", "I. kerület", 1_846_150.0, 6_000.0),
    district("II", "II. kerület", 1_811_630.0, 5_480.0),
    district("III", "III. kerület", 1_490_980.0, 5_000.0),
    district("IV", "IV. kerület", 1_216_670.0, 4_760.0),
    district("V", "V. kerület (Belváros)", 2_030_360.0, 6_360.0),
    district("VI", "VI. kerület", 1_604_570.0, 5_970.0),
    district("VII", "VII. kerület", 1_515_470.0, 5_560.0),
    district("VIII", "VIII. kerület (Józsefváros)", 1_355_560.0, 5_700.0),
    district("IX", "IX. kerület", 1_612_860.0, 5_640.0),
    district("X", "X. kerület", 1_105_320.0, 4_470.0),
    district("XI", "XI. kerület (Újbuda)", 1_694_170.0, 5_380.0),
    district("XII", "XII. kerület", 1_873_750.0, 5_180.0),
    district("XIII", "XIII. kerület (Angyalföld)", 1_641_850.0, 5_490.0),
    district("XIV", "XIV. kerület", 1_404_690.0, 4_820.0),
    district("XV", "XV. kerület", 1_185_630.0, 4_470.0),
    district("XVI", "XVI. kerület", 1_177_290.0, 4_460.0),
    district("XVII", "XVII. kerület", 1_147_970.0, 4_020.0),
    district("XVIII", "XVIII. kerület (Pestszentlőrinc)", 1_116_070.0, 4_870.0),
    district("XIX", "XIX. kerület", 1_353_940.0, 4_840.0),
    district("XX", "XX. kerület", 1_055_900.0, 4_210.0),
    district("XXI", "XXI. kerület", 1_045_460.0, 4_090.0),
    district("XXII", "XXII. kerület", 1_269_490.0, 3_910.0),
    district("XXIII", "XXIII. kerület", 1_214_700.0, 3_850.0),
];

pub fn default_district() -> &'static District {
    &DISTRICTS[1]
}

pub fn find_district(id: &str) -> FinanceResult<&'static District> {
    let id = id.trim();
    DISTRICTS
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| FinanceError::UnknownDistrict(id.to_string()))
}

/// Estimated working-population bands of monthly income. The upper bound of
/// the last band is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuintileBand {
    pub lower: f64,
    pub upper: f64,
    pub gross_monthly: f64,
}

pub const QUINTILE_BANDS: [QuintileBand; 5] = [
    QuintileBand {
        lower: 0.0,
        upper: 350_000.0,
        gross_monthly: 290_000.0,
    },
    QuintileBand {
        lower: 350_001.0,
        upper: 500_000.0,
        gross_monthly: 425_000.0,
    },
    QuintileBand {
        lower: 500_001.0,
        upper: 650_000.0,
        gross_monthly: MEDIAN_GROSS,
    },
    QuintileBand {
        lower: 650_001.0,
        upper: 900_000.0,
        gross_monthly: 775_000.0,
    },
    QuintileBand {
        lower: 900_001.0,
        upper: f64::INFINITY,
        gross_monthly: 1_200_000.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioId {
    Pillow,
    Bond,
    Sp500,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub id: ScenarioId,
    pub annual_rate: f64,
    pub color: &'static str,
}

pub const SCENARIOS: [Scenario; 3] = [
    Scenario {
        id: ScenarioId::Pillow,
        annual_rate: 0.0,
        color: "#8884d8",
    },
    Scenario {
        id: ScenarioId::Bond,
        annual_rate: 0.07,
        color: "#82ca9d",
    },
    Scenario {
        id: ScenarioId::Sp500,
        annual_rate: 0.1254,
        color: "#ffc658",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_twenty_three_districts_have_unique_ids() {
        let mut ids = DISTRICTS.iter().map(|d| d.id).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 23);
    }

    #[test]
    fn find_district_is_case_insensitive() {
        let d = find_district(" xiii ").expect("district exists");
        assert_eq!(d.id, "XIII");
        assert!((d.price_sqm - 1_641_850.0).abs() < 1e-9);
    }

    #[test]
    fn find_district_rejects_unknown_id() {
        assert_eq!(
            find_district("XXIV"),
            Err(FinanceError::UnknownDistrict("XXIV".to_string()))
        );
    }

    #[test]
    fn default_district_is_second_table_entry() {
        assert_eq!(default_district().id, "II");
    }

    #[test]
    fn quintile_bands_are_contiguous_on_whole_forints() {
        for pair in QUINTILE_BANDS.windows(2) {
            assert!((pair[1].lower - pair[0].upper - 1.0).abs() < 1e-9);
        }
    }
}
