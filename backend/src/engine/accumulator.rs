//! Band accumulator
//!
//! Walks the schedule in ascending order and produces one `BandContribution`
//! per band the billed EV reaches.
//!
//! # Billing Rules
//!
//! - Sliding scale accrues cumulatively: every band traversed charges its rate
//!   on the slice of EV inside it.
//! - Fixed fees are billed once, by the **highest band reached** (the band
//!   with `billed_ev <= max_ev`). Lower bands crossed on the way up list
//!   their fixed components at zero.
//! - Sliding fees are rounded per row, so rows foot to totals.
//!
//! # Edge Cases
//!
//! - EV on a boundary belongs to the lower band; the next band is not emitted.
//! - EV exactly at the floor makes the first band reached but empty. It is
//!   still emitted so its fixed fees appear in the breakdown.

use super::result::{round_whole, BandContribution};
use crate::schedule::{FeeBand, FeeSchedule, FixedFee};

/// Compute per-band contributions for an already clamped EV
///
/// `billed_ev` must come from `clamp::check_enterprise_value`, i.e. lie in
/// `[schedule.floor(), schedule.cap()]`.
pub fn accumulate(schedule: &FeeSchedule, billed_ev: f64) -> Vec<BandContribution> {
    let mut rows = Vec::new();

    for (index, band) in schedule.bands().iter().enumerate() {
        let ev_in_band = band.ev_in_band(billed_ev);
        let is_highest = billed_ev <= band.max_ev as f64;

        if ev_in_band <= 0.0 && !is_highest {
            break;
        }

        let row = contribution(index, band, ev_in_band, is_highest);
        tracing::trace!(
            band = %row.band_label(),
            ev_in_band,
            sliding_scale_fee = row.sliding_scale_fee(),
            fixed = row.fixed_fee_total(),
            "band contribution"
        );
        rows.push(row);

        if is_highest {
            break;
        }
    }

    rows
}

fn contribution(index: usize, band: &FeeBand, ev_in_band: f64, is_highest: bool) -> BandContribution {
    let sliding_scale_fee = round_whole(ev_in_band * band.sliding_scale_rate);

    let fixed_fees_applied = if is_highest {
        band.fixed_fees.clone()
    } else {
        band.fixed_fees
            .iter()
            .map(|fee| FixedFee::new(fee.name.clone(), 0))
            .collect()
    };

    BandContribution::new(
        index,
        band.label.clone(),
        ev_in_band,
        band.sliding_scale_rate,
        fixed_fees_applied,
        sliding_scale_fee,
        is_highest,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_band_schedule() -> FeeSchedule {
        FeeSchedule::new(vec![
            FeeBand::new("$2M - $5M", 2_000_000, 5_000_000, 0.035)
                .with_fixed_fee("terms_agreed", 20_000)
                .with_fixed_fee("completion", 125_000),
            FeeBand::new("$5M - $10M", 5_000_000, 10_000_000, 0.025)
                .with_fixed_fee("terms_agreed", 30_000)
                .with_fixed_fee("completion", 270_000),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_band_reached() {
        let rows = accumulate(&two_band_schedule(), 4_000_000.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ev_in_band(), 2_000_000.0);
        assert_eq!(rows[0].sliding_scale_fee(), 70_000);
        assert_eq!(rows[0].fixed_fee_total(), 145_000);
        assert!(rows[0].is_highest_band());
    }

    #[test]
    fn test_lower_band_gets_sliding_only() {
        let rows = accumulate(&two_band_schedule(), 7_000_000.0);
        assert_eq!(rows.len(), 2);

        assert!(!rows[0].is_highest_band());
        assert_eq!(rows[0].sliding_scale_fee(), 105_000);
        assert_eq!(rows[0].fixed_fee_total(), 0);
        let zeroed: Vec<(&str, i64)> = rows[0]
            .fixed_fees_applied()
            .iter()
            .map(|f| (f.name.as_str(), f.amount))
            .collect();
        assert_eq!(zeroed, vec![("terms_agreed", 0), ("completion", 0)]);

        assert!(rows[1].is_highest_band());
        assert_eq!(rows[1].ev_in_band(), 2_000_000.0);
        assert_eq!(rows[1].sliding_scale_fee(), 50_000);
        assert_eq!(rows[1].fixed_fee_total(), 300_000);
    }

    #[test]
    fn test_boundary_belongs_to_lower_band() {
        let rows = accumulate(&two_band_schedule(), 5_000_000.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].band_index(), 0);
        assert!(rows[0].is_highest_band());
        assert_eq!(rows[0].fixed_fee_total(), 145_000);
    }

    #[test]
    fn test_floor_band_is_reached_but_empty() {
        let rows = accumulate(&two_band_schedule(), 2_000_000.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ev_in_band(), 0.0);
        assert_eq!(rows[0].sliding_scale_fee(), 0);
        assert_eq!(rows[0].fixed_fee_total(), 145_000);
    }

    #[test]
    fn test_sliding_fee_rounded_per_row() {
        // 1 unit into the first band at 3.5% is 0.035 -> 0
        let rows = accumulate(&two_band_schedule(), 2_000_001.0);
        assert_eq!(rows[0].sliding_scale_fee(), 0);

        // 15 units at 3.5% is 0.525 -> 1
        let rows = accumulate(&two_band_schedule(), 2_000_015.0);
        assert_eq!(rows[0].sliding_scale_fee(), 1);
    }
}
