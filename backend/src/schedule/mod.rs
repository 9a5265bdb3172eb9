//! Fee schedule configuration
//!
//! The schedule is the pricing policy: an ordered, contiguous table of fee
//! bands. It is validated once on construction and never mutated afterwards;
//! a different policy means a different `FeeSchedule` value.
//!
//! # Critical Invariants
//!
//! 1. Bands are sorted ascending and contiguous (`band[i].min_ev == band[i-1].max_ev`)
//! 2. The first band's `min_ev` is the eligibility floor
//! 3. The last band's `max_ev` is the global cap
//! 4. Fixed-fee totals never decrease from one band to the next, so the quoted
//!    fee never drops when EV crosses a band boundary
//! 5. The largest possible quote (every band's full sliding fee plus the
//!    largest fixed total) fits in i64, so evaluation cannot overflow

pub mod band;

pub use band::{FeeBand, FixedFee};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

use crate::engine::result::round_whole;
use crate::engine::{self, FeeError, FeeOutcome};

/// Errors raised while building or loading a schedule
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule must contain at least one band")]
    Empty,

    #[error("Band {index}: invalid range {min_ev}..={max_ev}")]
    InvalidRange { index: usize, min_ev: i64, max_ev: i64 },

    #[error("Band {index}: expected min_ev {expected} to continue previous band, got {actual}")]
    Gap {
        index: usize,
        expected: i64,
        actual: i64,
    },

    #[error("Band {index}: sliding scale rate {rate} outside [0, 1]")]
    InvalidRate { index: usize, rate: f64 },

    #[error("Band {index}: fixed fee '{name}' has negative amount {amount}")]
    NegativeFixedFee {
        index: usize,
        name: String,
        amount: i64,
    },

    #[error("Band {index}: fixed fee '{name}' listed more than once")]
    DuplicateFixedFee { index: usize, name: String },

    #[error("Band {index}: fixed fees total {upper} is below previous band's {lower}")]
    DownwardFeeCliff { index: usize, lower: i64, upper: i64 },

    #[error("Band {index}: fee amounts exceed the representable range")]
    AmountOverflow { index: usize },

    #[error("Schedule parse error: {0}")]
    Parse(String),

    #[error("Schedule serialization error: {0}")]
    Serialization(String),
}

/// Wire shape of a schedule before validation
#[derive(Debug, Clone, Deserialize)]
struct ScheduleDef {
    bands: Vec<FeeBand>,
}

impl TryFrom<ScheduleDef> for FeeSchedule {
    type Error = ScheduleError;

    fn try_from(def: ScheduleDef) -> Result<Self, Self::Error> {
        FeeSchedule::new(def.bands)
    }
}

/// Validated, immutable fee schedule
///
/// # Example
/// ```
/// use advisory_fee_core_rs::{FeeBand, FeeSchedule};
///
/// let schedule = FeeSchedule::new(vec![
///     FeeBand::new("$2M - $5M", 2_000_000, 5_000_000, 0.035)
///         .with_fixed_fee("terms_agreed", 20_000)
///         .with_fixed_fee("completion", 125_000),
/// ]).unwrap();
///
/// assert_eq!(schedule.floor(), 2_000_000);
/// assert_eq!(schedule.cap(), 5_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleDef")]
pub struct FeeSchedule {
    bands: Vec<FeeBand>,
}

static STANDARD: OnceLock<FeeSchedule> = OnceLock::new();

impl FeeSchedule {
    /// Build a schedule, validating every band
    ///
    /// # Errors
    ///
    /// Returns the first `ScheduleError` found, scanning bands in order.
    pub fn new(bands: Vec<FeeBand>) -> Result<Self, ScheduleError> {
        validate_bands(&bands)?;
        Ok(Self { bands })
    }

    /// The process-wide standard schedule
    ///
    /// Built on first use and shared read-only for the rest of the process.
    pub fn standard() -> &'static FeeSchedule {
        STANDARD.get_or_init(|| FeeSchedule {
            bands: standard_bands(),
        })
    }

    /// Load and validate a schedule from JSON
    ///
    /// ```json
    /// { "bands": [ { "label": "$2M - $5M", "min_ev": 2000000, "max_ev": 5000000,
    ///                "sliding_scale_rate": 0.035,
    ///                "fixed_fees": [ { "name": "completion", "amount": 125000 } ] } ] }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let def: ScheduleDef =
            serde_json::from_str(json).map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let schedule = FeeSchedule::new(def.bands)?;
        tracing::info!(
            bands = schedule.bands.len(),
            floor = schedule.floor(),
            cap = schedule.cap(),
            "loaded fee schedule"
        );
        Ok(schedule)
    }

    /// Serialize to pretty JSON in the same shape `from_json_str` accepts
    pub fn to_json_pretty(&self) -> Result<String, ScheduleError> {
        serde_json::to_string_pretty(self).map_err(|e| ScheduleError::Serialization(e.to_string()))
    }

    /// Bands in ascending order
    pub fn bands(&self) -> &[FeeBand] {
        &self.bands
    }

    /// Minimum eligible enterprise value
    pub fn floor(&self) -> i64 {
        self.bands.first().map_or(0, |band| band.min_ev)
    }

    /// Enterprise value above which fees stop growing
    pub fn cap(&self) -> i64 {
        self.bands.last().map_or(0, |band| band.max_ev)
    }

    /// Evaluate `enterprise_value` against this schedule
    ///
    /// Shorthand for [`engine::evaluate`].
    pub fn evaluate(&self, enterprise_value: f64) -> Result<FeeOutcome, FeeError> {
        engine::evaluate(self, enterprise_value)
    }

    /// SHA-256 of the schedule's canonical JSON, hex encoded
    ///
    /// Two schedules with the same bands always share a fingerprint, so a
    /// stored quote can be matched to the policy that priced it.
    pub fn fingerprint(&self) -> Result<String, ScheduleError> {
        use serde_json::Value;
        use std::collections::BTreeMap;

        let value =
            serde_json::to_value(self).map_err(|e| ScheduleError::Serialization(e.to_string()))?;

        // Sort object keys so the digest does not depend on field order
        fn canonicalize(value: Value) -> Value {
            match value {
                Value::Object(map) => {
                    let sorted: BTreeMap<String, Value> =
                        map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                    Value::Object(sorted.into_iter().collect())
                }
                Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
                other => other,
            }
        }

        let json = serde_json::to_string(&canonicalize(value))
            .map_err(|e| ScheduleError::Serialization(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Check all schedule invariants
fn validate_bands(bands: &[FeeBand]) -> Result<(), ScheduleError> {
    if bands.is_empty() {
        return Err(ScheduleError::Empty);
    }

    let mut previous: Option<(&FeeBand, i64)> = None;
    let mut sliding_ceiling: i64 = 0;
    let mut max_fixed_total: i64 = 0;
    for (index, band) in bands.iter().enumerate() {
        if band.min_ev < 0 || band.max_ev <= band.min_ev {
            return Err(ScheduleError::InvalidRange {
                index,
                min_ev: band.min_ev,
                max_ev: band.max_ev,
            });
        }

        let rate = band.sliding_scale_rate;
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(ScheduleError::InvalidRate { index, rate });
        }

        let mut seen = HashSet::new();
        for fee in &band.fixed_fees {
            if fee.amount < 0 {
                return Err(ScheduleError::NegativeFixedFee {
                    index,
                    name: fee.name.clone(),
                    amount: fee.amount,
                });
            }
            if !seen.insert(fee.name.as_str()) {
                return Err(ScheduleError::DuplicateFixedFee {
                    index,
                    name: fee.name.clone(),
                });
            }
        }

        let fixed_total = band
            .checked_fixed_fee_total()
            .ok_or(ScheduleError::AmountOverflow { index })?;

        // Largest sliding fee the accumulator can produce for this band
        let full_sliding = round_whole(band.ev_in_band(band.max_ev as f64) * rate);
        sliding_ceiling = sliding_ceiling
            .checked_add(full_sliding)
            .ok_or(ScheduleError::AmountOverflow { index })?;
        max_fixed_total = max_fixed_total.max(fixed_total);
        sliding_ceiling
            .checked_add(max_fixed_total)
            .ok_or(ScheduleError::AmountOverflow { index })?;

        if let Some((prev, prev_fixed_total)) = previous {
            if band.min_ev != prev.max_ev {
                return Err(ScheduleError::Gap {
                    index,
                    expected: prev.max_ev,
                    actual: band.min_ev,
                });
            }
            if fixed_total < prev_fixed_total {
                return Err(ScheduleError::DownwardFeeCliff {
                    index,
                    lower: prev_fixed_total,
                    upper: fixed_total,
                });
            }
        }
        previous = Some((band, fixed_total));
    }

    Ok(())
}

/// Bands of the standard advisory schedule ($2M floor, $50M cap)
///
/// Only the two bands up to $10M are agreed pricing. The bands above $10M
/// are placeholder policy; deployments with real rates should load their
/// own schedule with `--schedule`.
fn standard_bands() -> Vec<FeeBand> {
    vec![
        FeeBand::new("$2M - $5M", 2_000_000, 5_000_000, 0.035)
            .with_fixed_fee("terms_agreed", 20_000)
            .with_fixed_fee("completion", 125_000),
        FeeBand::new("$5M - $10M", 5_000_000, 10_000_000, 0.025)
            .with_fixed_fee("terms_agreed", 30_000)
            .with_fixed_fee("completion", 270_000),
        FeeBand::new("$10M - $20M", 10_000_000, 20_000_000, 0.02)
            .with_fixed_fee("terms_agreed", 40_000)
            .with_fixed_fee("completion", 300_000),
        FeeBand::new("$20M - $30M", 20_000_000, 30_000_000, 0.015)
            .with_fixed_fee("terms_agreed", 50_000)
            .with_fixed_fee("completion", 330_000),
        FeeBand::new("$30M - $50M", 30_000_000, 50_000_000, 0.01)
            .with_fixed_fee("terms_agreed", 50_000)
            .with_fixed_fee("completion", 350_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bands_pass_validation() {
        assert!(FeeSchedule::new(standard_bands()).is_ok());
    }

    #[test]
    fn test_standard_is_shared() {
        let a = FeeSchedule::standard();
        let b = FeeSchedule::standard();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.floor(), 2_000_000);
        assert_eq!(a.cap(), 50_000_000);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(FeeSchedule::new(vec![]), Err(ScheduleError::Empty));
    }

    #[test]
    fn test_gap_rejected() {
        let err = FeeSchedule::new(vec![
            FeeBand::new("a", 0, 10, 0.1),
            FeeBand::new("b", 11, 20, 0.1),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Gap {
                index: 1,
                expected: 10,
                actual: 11
            }
        );
    }

    #[test]
    fn test_overlap_rejected_as_gap() {
        let err = FeeSchedule::new(vec![
            FeeBand::new("a", 0, 10, 0.1),
            FeeBand::new("b", 5, 20, 0.1),
        ])
        .unwrap_err();
        assert!(matches!(err, ScheduleError::Gap { index: 1, .. }));
    }

    #[test]
    fn test_empty_range_rejected() {
        let err = FeeSchedule::new(vec![FeeBand::new("a", 10, 10, 0.1)]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange { index: 0, .. }));
    }

    #[test]
    fn test_bad_rate_rejected() {
        let err = FeeSchedule::new(vec![FeeBand::new("a", 0, 10, f64::NAN)]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRate { index: 0, .. }));

        let err = FeeSchedule::new(vec![FeeBand::new("a", 0, 10, 1.5)]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRate { index: 0, .. }));
    }

    #[test]
    fn test_fixed_fee_rules() {
        let err = FeeSchedule::new(vec![FeeBand::new("a", 0, 10, 0.1).with_fixed_fee("x", -1)])
            .unwrap_err();
        assert!(matches!(err, ScheduleError::NegativeFixedFee { .. }));

        let err = FeeSchedule::new(vec![FeeBand::new("a", 0, 10, 0.1)
            .with_fixed_fee("x", 1)
            .with_fixed_fee("x", 2)])
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::DuplicateFixedFee {
                index: 0,
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_downward_cliff_rejected() {
        let err = FeeSchedule::new(vec![
            FeeBand::new("a", 0, 10, 0.1).with_fixed_fee("x", 100),
            FeeBand::new("b", 10, 20, 0.1).with_fixed_fee("x", 50),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::DownwardFeeCliff {
                index: 1,
                lower: 100,
                upper: 50
            }
        );
    }

    #[test]
    fn test_amount_overflow_rejected() {
        let err = FeeSchedule::new(vec![
            FeeBand::new("a", 0, i64::MAX, 1.0).with_fixed_fee("x", i64::MAX)
        ])
        .unwrap_err();
        assert_eq!(err, ScheduleError::AmountOverflow { index: 0 });

        let err = FeeSchedule::new(vec![FeeBand::new("a", 0, 10, 0.1)
            .with_fixed_fee("x", i64::MAX)
            .with_fixed_fee("y", i64::MAX)])
        .unwrap_err();
        assert_eq!(err, ScheduleError::AmountOverflow { index: 0 });

        // Each band fits alone but the cumulative sliding fee does not
        let half = i64::MAX / 2 + 1;
        let err = FeeSchedule::new(vec![
            FeeBand::new("a", 0, half, 1.0),
            FeeBand::new("b", half, i64::MAX, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, ScheduleError::AmountOverflow { index: 1 });
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let standard = FeeSchedule::standard();
        let copy = FeeSchedule::new(standard_bands()).unwrap();
        assert_eq!(standard.fingerprint().unwrap(), copy.fingerprint().unwrap());
        assert_eq!(standard.fingerprint().unwrap().len(), 64);

        let mut bands = standard_bands();
        bands[0].sliding_scale_rate = 0.04;
        let changed = FeeSchedule::new(bands).unwrap();
        assert_ne!(standard.fingerprint().unwrap(), changed.fingerprint().unwrap());
    }
}
