use serde::Serialize;

use super::error::{FinanceResult, ensure_in_range};
use super::format::round_ft;
use super::reference::INFLATION_RANGE;

pub const EROSION_YEARS: [u32; 4] = [1, 3, 5, 10];

/// What `amount` will buy after `years` of constant `rate` inflation, in
/// today's money.
pub fn purchasing_power(amount: f64, rate: f64, years: u32) -> f64 {
    amount / (1.0 + rate).powi(years as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErosionRow {
    pub year: u32,
    pub future_value: i64,
    pub loss: i64,
}

pub fn erosion_table(net: f64, rate: f64) -> FinanceResult<Vec<ErosionRow>> {
    let rate = ensure_in_range("inflationRate", rate, INFLATION_RANGE.0, INFLATION_RANGE.1)?;
    Ok(EROSION_YEARS
        .iter()
        .map(|&year| {
            let future = purchasing_power(net, rate, year);
            ErosionRow {
                year,
                future_value: round_ft(future),
                loss: round_ft(net - future),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn purchasing_power_discounts_by_compound_rate() {
        let value = purchasing_power(110_250.0, 0.05, 2);
        assert!((value - 100_000.0).abs() < 1e-6);
        assert!((purchasing_power(1_000.0, 0.05, 0) - 1_000.0).abs() < 1e-12);
    }

    #[test]
    fn erosion_table_covers_fixed_horizons() {
        let rows = erosion_table(266_000.0, 0.045).expect("valid rate");
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), EROSION_YEARS);
        // 266000 / 1.045
        assert_eq!(rows[0].future_value, 254_545);
        assert_eq!(rows[0].loss, 11_455);
    }

    #[test]
    fn erosion_table_rejects_rate_outside_slider() {
        assert!(erosion_table(266_000.0, 0.25).is_err());
        assert!(erosion_table(266_000.0, 0.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_losses_grow_with_horizon(net in 1u32..5_000_000, rate_bp in 100u32..=2000) {
            let rows = erosion_table(net as f64, rate_bp as f64 / 10_000.0).expect("valid");
            for pair in rows.windows(2) {
                prop_assert!(pair[1].future_value <= pair[0].future_value);
                prop_assert!(pair[1].loss >= pair[0].loss);
            }
        }
    }
}
