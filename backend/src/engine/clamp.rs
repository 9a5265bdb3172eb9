//! Eligibility check and EV capping
//!
//! Runs before band traversal:
//! - EV below the schedule floor is ineligible (a normal outcome)
//! - EV above the schedule cap is billed as if it were the cap
//! - NaN, infinite or negative EV is refused

use super::FeeError;
use crate::schedule::FeeSchedule;

/// Result of checking a raw EV against a schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    /// EV is below the schedule floor
    Ineligible {
        /// Schedule floor the EV failed to reach
        minimum: i64,
    },

    /// EV is eligible and will be billed at `billed_ev`
    Eligible {
        /// `min(ev, cap)`
        billed_ev: f64,
        /// True when the raw EV exceeded the cap
        capped: bool,
    },
}

/// Validate and clamp a raw enterprise value
///
/// # Errors
///
/// `FeeError::InvalidInput` if `enterprise_value` is NaN, infinite or negative.
///
/// # Example
/// ```
/// use advisory_fee_core_rs::engine::clamp::{check_enterprise_value, Eligibility};
/// use advisory_fee_core_rs::FeeSchedule;
///
/// let schedule = FeeSchedule::standard();
/// let checked = check_enterprise_value(schedule, 80_000_000.0).unwrap();
/// assert_eq!(checked, Eligibility::Eligible { billed_ev: 50_000_000.0, capped: true });
/// ```
pub fn check_enterprise_value(
    schedule: &FeeSchedule,
    enterprise_value: f64,
) -> Result<Eligibility, FeeError> {
    if !enterprise_value.is_finite() || enterprise_value < 0.0 {
        return Err(FeeError::InvalidInput {
            value: enterprise_value,
        });
    }

    let floor = schedule.floor();
    if enterprise_value < floor as f64 {
        return Ok(Eligibility::Ineligible { minimum: floor });
    }

    let cap = schedule.cap() as f64;
    if enterprise_value > cap {
        Ok(Eligibility::Eligible {
            billed_ev: cap,
            capped: true,
        })
    } else {
        Ok(Eligibility::Eligible {
            billed_ev: enterprise_value,
            capped: false,
        })
    }
}
