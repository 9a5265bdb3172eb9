//! Fee evaluation engine
//!
//! Turns an enterprise value into a fee quote against a `FeeSchedule`.
//!
//! ```text
//! raw EV ──► clamp ──► accumulator ──► result
//!              │
//!              └──► Ineligible (EV below floor)
//! ```
//!
//! - **clamp**: refuses malformed EV, detects ineligibility, caps at the schedule top
//! - **accumulator**: per-band sliding-scale and fixed-fee rows
//! - **result**: totals, percentage of EV, breakdown
//!
//! Evaluation is pure: no I/O, no shared mutable state. The same schedule and
//! EV always produce a bit-identical outcome.

pub mod accumulator;
pub mod clamp;
pub mod result;

pub use clamp::Eligibility;
pub use result::{BandContribution, FeeResult};

use serde::Serialize;
use thiserror::Error;

use crate::schedule::FeeSchedule;

/// Errors that can occur during evaluation
#[derive(Debug, Error, PartialEq)]
pub enum FeeError {
    #[error("Enterprise value must be finite and non-negative, got {value}")]
    InvalidInput { value: f64 },
}

/// Outcome of evaluating one enterprise value
///
/// Ineligibility is an expected outcome, not an error; callers branch on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeeOutcome {
    /// EV is below the schedule floor
    Ineligible {
        enterprise_value: f64,
        /// The schedule floor
        minimum: i64,
    },

    /// EV is eligible and priced
    Priced(FeeResult),
}

impl FeeOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, FeeOutcome::Priced(_))
    }

    /// The fee result, if eligible
    pub fn result(&self) -> Option<&FeeResult> {
        match self {
            FeeOutcome::Priced(result) => Some(result),
            FeeOutcome::Ineligible { .. } => None,
        }
    }

    pub fn into_result(self) -> Option<FeeResult> {
        match self {
            FeeOutcome::Priced(result) => Some(result),
            FeeOutcome::Ineligible { .. } => None,
        }
    }
}

/// Evaluate the fee for `enterprise_value` under `schedule`
///
/// # Errors
///
/// `FeeError::InvalidInput` if the EV is NaN, infinite or negative.
///
/// # Example
/// ```
/// use advisory_fee_core_rs::{evaluate, FeeSchedule};
///
/// let outcome = evaluate(FeeSchedule::standard(), 10_000_000.0).unwrap();
/// let result = outcome.result().unwrap();
/// assert_eq!(result.total_fee(), 530_000);
/// assert_eq!(result.percentage_of_ev(), 5.3);
///
/// let outcome = evaluate(FeeSchedule::standard(), 1_999_999.0).unwrap();
/// assert!(!outcome.is_eligible());
/// ```
pub fn evaluate(schedule: &FeeSchedule, enterprise_value: f64) -> Result<FeeOutcome, FeeError> {
    let (billed_ev, capped) = match clamp::check_enterprise_value(schedule, enterprise_value)? {
        Eligibility::Ineligible { minimum } => {
            tracing::debug!(enterprise_value, minimum, "enterprise value below schedule floor");
            return Ok(FeeOutcome::Ineligible {
                enterprise_value,
                minimum,
            });
        }
        Eligibility::Eligible { billed_ev, capped } => (billed_ev, capped),
    };

    let breakdown = accumulator::accumulate(schedule, billed_ev);
    let result = FeeResult::assemble(enterprise_value, billed_ev, capped, breakdown);

    tracing::debug!(
        enterprise_value,
        billed_ev,
        capped,
        total_fee = result.total_fee(),
        percentage_of_ev = result.percentage_of_ev(),
        "evaluated fee"
    );

    Ok(FeeOutcome::Priced(result))
}
