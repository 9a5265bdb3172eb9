//! Result assembly
//!
//! Sums already-rounded band contributions into a `FeeResult`. Totals are
//! sums of rounded rows, never rounded sums, so a rendered breakdown table
//! always foots to its totals.

use serde::Serialize;

use crate::schedule::FixedFee;

/// Round to the nearest whole currency unit (half away from zero)
pub(crate) fn round_whole(amount: f64) -> i64 {
    amount.round() as i64
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// What a single band contributed to a quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandContribution {
    band_index: usize,
    band_label: String,
    ev_in_band: f64,
    sliding_scale_rate: f64,
    fixed_fees_applied: Vec<FixedFee>,
    sliding_scale_fee: i64,
    is_highest_band: bool,
}

impl BandContribution {
    pub(crate) fn new(
        band_index: usize,
        band_label: String,
        ev_in_band: f64,
        sliding_scale_rate: f64,
        fixed_fees_applied: Vec<FixedFee>,
        sliding_scale_fee: i64,
        is_highest_band: bool,
    ) -> Self {
        Self {
            band_index,
            band_label,
            ev_in_band,
            sliding_scale_rate,
            fixed_fees_applied,
            sliding_scale_fee,
            is_highest_band,
        }
    }

    /// Position of the band in its schedule
    pub fn band_index(&self) -> usize {
        self.band_index
    }

    pub fn band_label(&self) -> &str {
        &self.band_label
    }

    /// EV attributable to this band (>= 0)
    pub fn ev_in_band(&self) -> f64 {
        self.ev_in_band
    }

    pub fn sliding_scale_rate(&self) -> f64 {
        self.sliding_scale_rate
    }

    /// Fixed fees billed by this row; all zero unless this is the highest band
    pub fn fixed_fees_applied(&self) -> &[FixedFee] {
        &self.fixed_fees_applied
    }

    /// Sliding-scale fee, rounded to whole units
    pub fn sliding_scale_fee(&self) -> i64 {
        self.sliding_scale_fee
    }

    pub fn is_highest_band(&self) -> bool {
        self.is_highest_band
    }

    pub fn fixed_fee_total(&self) -> i64 {
        self.fixed_fees_applied.iter().map(|fee| fee.amount).sum()
    }

    /// Fixed plus sliding for this row
    pub fn total(&self) -> i64 {
        self.fixed_fee_total() + self.sliding_scale_fee
    }
}

/// Fee quote for one enterprise value
///
/// Immutable once built; produced fresh by every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeResult {
    enterprise_value: f64,
    billed_enterprise_value: f64,
    capped: bool,
    fixed_fee_totals: Vec<FixedFee>,
    fixed_fee_total: i64,
    sliding_scale_total: i64,
    total_fee: i64,
    percentage_of_ev: f64,
    breakdown: Vec<BandContribution>,
}

impl FeeResult {
    /// Assemble a result from the accumulator's rows
    ///
    /// `enterprise_value` is the original, uncapped input; it is the
    /// denominator of `percentage_of_ev`.
    pub(crate) fn assemble(
        enterprise_value: f64,
        billed_enterprise_value: f64,
        capped: bool,
        breakdown: Vec<BandContribution>,
    ) -> Self {
        let mut fixed_fee_totals: Vec<FixedFee> = Vec::new();
        for fee in breakdown.iter().flat_map(|row| row.fixed_fees_applied()) {
            match fixed_fee_totals.iter_mut().find(|total| total.name == fee.name) {
                Some(total) => total.amount += fee.amount,
                None => fixed_fee_totals.push(fee.clone()),
            }
        }

        let fixed_fee_total: i64 = fixed_fee_totals.iter().map(|fee| fee.amount).sum();
        let sliding_scale_total: i64 = breakdown.iter().map(|row| row.sliding_scale_fee()).sum();
        let total_fee = fixed_fee_total + sliding_scale_total;

        let percentage_of_ev = if enterprise_value > 0.0 {
            round2(total_fee as f64 / enterprise_value * 100.0)
        } else {
            0.0
        };

        Self {
            enterprise_value,
            billed_enterprise_value,
            capped,
            fixed_fee_totals,
            fixed_fee_total,
            sliding_scale_total,
            total_fee,
            percentage_of_ev,
            breakdown,
        }
    }

    /// Original, uncapped input EV
    pub fn enterprise_value(&self) -> f64 {
        self.enterprise_value
    }

    /// EV actually billed (`min(ev, cap)`)
    pub fn billed_enterprise_value(&self) -> f64 {
        self.billed_enterprise_value
    }

    /// True when the input EV exceeded the schedule cap
    pub fn capped(&self) -> bool {
        self.capped
    }

    /// Fixed fees summed per component name, in first-seen order
    pub fn fixed_fee_totals(&self) -> &[FixedFee] {
        &self.fixed_fee_totals
    }

    /// Total of a single fixed component, 0 if absent
    pub fn fixed_fee(&self, name: &str) -> i64 {
        self.fixed_fee_totals
            .iter()
            .find(|fee| fee.name == name)
            .map_or(0, |fee| fee.amount)
    }

    pub fn fixed_fee_total(&self) -> i64 {
        self.fixed_fee_total
    }

    pub fn sliding_scale_total(&self) -> i64 {
        self.sliding_scale_total
    }

    pub fn total_fee(&self) -> i64 {
        self.total_fee
    }

    /// `total_fee / enterprise_value * 100`, two decimals
    pub fn percentage_of_ev(&self) -> f64 {
        self.percentage_of_ev
    }

    pub fn breakdown(&self) -> &[BandContribution] {
        &self.breakdown
    }

    /// The breakdown row that billed fixed fees
    pub fn highest_band(&self) -> Option<&BandContribution> {
        self.breakdown.iter().find(|row| row.is_highest_band())
    }
}
