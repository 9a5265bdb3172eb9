//! Fee band model
//!
//! A band is one contiguous slice of the enterprise-value axis with its own
//! sliding-scale rate and its own fixed milestone fees.
//!
//! CRITICAL: All money values are i64 (whole currency units)

use serde::{Deserialize, Serialize};

/// A named fixed fee, e.g. `terms_agreed` or `completion`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFee {
    /// Component name, stable across bands so totals can be summed per name
    pub name: String,

    /// Amount in whole currency units
    pub amount: i64,
}

impl FixedFee {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// One entry of a fee schedule
///
/// Membership is half-open from below and inclusive above: an EV belongs to
/// this band when `min_ev < ev <= max_ev`. The first band of a schedule also
/// owns its own floor (see `engine::accumulator`).
///
/// # Example
/// ```
/// use advisory_fee_core_rs::FeeBand;
///
/// let band = FeeBand::new("$2M - $5M", 2_000_000, 5_000_000, 0.035)
///     .with_fixed_fee("terms_agreed", 20_000)
///     .with_fixed_fee("completion", 125_000);
///
/// assert_eq!(band.fixed_fee_total(), 145_000);
/// assert!(band.contains(5_000_000.0));
/// assert!(!band.contains(2_000_000.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBand {
    /// Display label used in breakdown rows
    pub label: String,

    /// Lower bound of the band (exclusive, except for the schedule floor)
    pub min_ev: i64,

    /// Upper bound of the band (inclusive)
    pub max_ev: i64,

    /// Fraction of the EV inside this band charged as sliding-scale fee
    /// (e.g., 0.035 = 3.5%)
    pub sliding_scale_rate: f64,

    /// Fixed milestone fees, billed only when this is the highest band reached.
    /// Order is preserved in breakdowns and totals.
    #[serde(default)]
    pub fixed_fees: Vec<FixedFee>,
}

impl FeeBand {
    /// Create a band with no fixed fees
    pub fn new(label: impl Into<String>, min_ev: i64, max_ev: i64, sliding_scale_rate: f64) -> Self {
        Self {
            label: label.into(),
            min_ev,
            max_ev,
            sliding_scale_rate,
            fixed_fees: Vec::new(),
        }
    }

    /// Append a fixed fee component (builder pattern)
    pub fn with_fixed_fee(mut self, name: impl Into<String>, amount: i64) -> Self {
        self.fixed_fees.push(FixedFee::new(name, amount));
        self
    }

    /// Sum of all fixed fee components of this band
    pub fn fixed_fee_total(&self) -> i64 {
        self.fixed_fees.iter().map(|fee| fee.amount).sum()
    }

    /// Sum of fixed fee components, or `None` if it does not fit in i64
    pub fn checked_fixed_fee_total(&self) -> Option<i64> {
        self.fixed_fees
            .iter()
            .try_fold(0i64, |total, fee| total.checked_add(fee.amount))
    }

    /// Width of the band in whole currency units
    pub fn width(&self) -> i64 {
        self.max_ev - self.min_ev
    }

    /// True if `ev` falls in `(min_ev, max_ev]`
    pub fn contains(&self, ev: f64) -> bool {
        ev > self.min_ev as f64 && ev <= self.max_ev as f64
    }

    /// Portion of `ev` attributable to this band, never negative
    pub fn ev_in_band(&self, ev: f64) -> f64 {
        (ev.min(self.max_ev as f64) - self.min_ev as f64).max(0.0)
    }
}
