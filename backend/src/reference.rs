//! Reference table
//!
//! The fee quoted at the ceiling of every band, for display next to the
//! calculator. Each row is a real evaluation, so the table always agrees
//! with what `evaluate` would return for that EV.

use serde::Serialize;

use crate::engine::{evaluate, FeeError, FeeOutcome};
use crate::schedule::FeeSchedule;

/// Fee quoted at one band's ceiling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub band_label: String,
    pub enterprise_value: i64,
    pub fixed_fee_total: i64,
    pub sliding_scale_total: i64,
    pub total_fee: i64,
    pub percentage_of_ev: f64,
}

/// Build the reference table for `schedule`, one row per band
///
/// # Errors
///
/// Propagates any `FeeError` from evaluating a band ceiling.
pub fn reference_table(schedule: &FeeSchedule) -> Result<Vec<ReferenceRow>, FeeError> {
    let mut rows = Vec::with_capacity(schedule.bands().len());

    for band in schedule.bands() {
        match evaluate(schedule, band.max_ev as f64)? {
            FeeOutcome::Priced(result) => rows.push(ReferenceRow {
                band_label: band.label.clone(),
                enterprise_value: band.max_ev,
                fixed_fee_total: result.fixed_fee_total(),
                sliding_scale_total: result.sliding_scale_total(),
                total_fee: result.total_fee(),
                percentage_of_ev: result.percentage_of_ev(),
            }),
            FeeOutcome::Ineligible { minimum, .. } => {
                tracing::warn!(
                    band = %band.label,
                    ceiling = band.max_ev,
                    minimum,
                    "band ceiling below schedule floor, skipped"
                );
            }
        }
    }

    Ok(rows)
}
